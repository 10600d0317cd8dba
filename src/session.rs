use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::hydration::{
    apply_water_count, compute_goal, date_key, demo_week, empty_week, progress_percentage,
    summarize, trim_window,
};
use crate::models::{
    ActivityLevel, DayRecord, HydrationGoal, LocationSnapshot, SavedState, Summary,
    WeatherSnapshot,
};
use crate::platform::{Platform, PlatformError};

pub const NOTIFY_TITLE: &str = "💧 Time to Hydrate!";
pub const NOTIFY_BODY: &str =
    "Don't forget to drink a glass of water to stay healthy and refreshed!";

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub activity: ActivityLevel,
    pub demo_data: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            activity: ActivityLevel::Moderate,
            demo_data: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added { count: u32 },
    /// This add took the day from below the goal to the goal.
    GoalReached { count: u32 },
}

/// Owns the day's state and routes every mutation through the updater, the
/// aggregator and then storage.
pub struct Session<P: Platform> {
    platform: P,
    options: SessionOptions,
    today: NaiveDate,
    location: LocationSnapshot,
    weather: WeatherSnapshot,
    goal: HydrationGoal,
    using_fallback: bool,
    notifications_allowed: bool,
    week: Vec<DayRecord>,
    summary: Summary,
    water_count: u32,
}

impl<P: Platform> Session<P> {
    pub fn open(mut platform: P, options: SessionOptions, today: NaiveDate) -> Self {
        let notifications_allowed = platform.request_notify_permission();
        let (location, weather, using_fallback) = fetch_conditions(&mut platform);
        let goal = compute_goal(&weather, &location, options.activity);
        info!(
            "Goal for {}: {} glasses ({:?})",
            location.city, goal.adjusted_goal, goal.factors
        );

        let mut session = Self {
            platform,
            options,
            today,
            location,
            weather,
            goal,
            using_fallback,
            notifications_allowed,
            week: Vec::new(),
            summary: Summary::default(),
            water_count: 0,
        };
        session.load_or_seed();
        session
    }

    fn load_or_seed(&mut self) {
        match self.platform.load_state() {
            Ok(Some(state)) if !state.week.is_empty() => {
                debug!("Loaded {} stored days", state.week.len());
                self.summary = state.summary();
                self.week = trim_window(state.week);
            }
            Ok(_) => {
                info!("No stored history, starting a fresh week");
                self.seed();
            }
            Err(e) => {
                warn!("Stored history unreadable ({}), starting a fresh week", e);
                self.seed();
            }
        }
        self.water_count = self.count_for_today();
    }

    fn seed(&mut self) {
        let goal = self.goal.adjusted_goal;
        self.week = if self.options.demo_data {
            demo_week(self.today, goal)
        } else {
            empty_week(self.today, goal)
        };
        self.summary = summarize(&self.week);
        if let Err(e) = self.persist() {
            warn!("Could not save initial week: {}", e);
        }
    }

    fn count_for_today(&self) -> u32 {
        let key = self.today_key();
        self.week
            .iter()
            .find(|d| d.date == key)
            .map(|d| d.water_count)
            .unwrap_or(0)
    }

    fn persist(&mut self) -> Result<(), PlatformError> {
        let state = SavedState::new(self.week.clone(), self.summary);
        self.platform.save_state(&state)
    }

    fn commit(&mut self, count: u32) -> Result<(), PlatformError> {
        self.water_count = count;
        self.week = apply_water_count(&self.week, &self.today_key(), count, self.goal.adjusted_goal);
        self.summary = summarize(&self.week);
        self.persist()
    }

    pub fn add_glass(&mut self) -> Result<AddOutcome, PlatformError> {
        self.add_glasses(1)
    }

    pub fn add_glasses(&mut self, glasses: u32) -> Result<AddOutcome, PlatformError> {
        let before = self.water_count;
        let after = before.saturating_add(glasses);
        self.commit(after)?;

        let goal = self.goal.adjusted_goal;
        if before < goal && after >= goal {
            Ok(AddOutcome::GoalReached { count: after })
        } else {
            Ok(AddOutcome::Added { count: after })
        }
    }

    pub fn reset_day(&mut self) -> Result<(), PlatformError> {
        self.commit(0)
    }

    /// Look the weather up again and recompute the goal. Days already
    /// recorded keep their own goals.
    pub fn refetch(&mut self) {
        let (location, weather, using_fallback) = fetch_conditions(&mut self.platform);
        self.goal = compute_goal(&weather, &location, self.options.activity);
        self.location = location;
        self.weather = weather;
        self.using_fallback = using_fallback;
    }

    /// Move to a new calendar day. Returns `false` if `today` is unchanged.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.today {
            return false;
        }
        info!("Day changed to {}", date_key(today));
        self.today = today;
        self.water_count = self.count_for_today();
        true
    }

    pub fn notify(&mut self) -> Result<(), PlatformError> {
        if !self.notifications_allowed {
            return Ok(());
        }
        self.platform.show_notification(NOTIFY_TITLE, NOTIFY_BODY)
    }

    pub fn today_key(&self) -> String {
        date_key(self.today)
    }

    pub fn goal(&self) -> &HydrationGoal {
        &self.goal
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn location(&self) -> &LocationSnapshot {
        &self.location
    }

    pub fn week(&self) -> &[DayRecord] {
        &self.week
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn water_count(&self) -> u32 {
        self.water_count
    }

    pub fn progress(&self) -> u32 {
        progress_percentage(self.water_count, self.goal.adjusted_goal)
    }

    pub fn activity(&self) -> ActivityLevel {
        self.options.activity
    }

    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

/// Location then weather. Any failure falls back to fixed defaults so a
/// goal can always be computed.
fn fetch_conditions<P: Platform>(platform: &mut P) -> (LocationSnapshot, WeatherSnapshot, bool) {
    let location = match platform.get_location() {
        Ok(loc) => loc,
        Err(e) => {
            warn!("{}; using default conditions", e);
            return (LocationSnapshot::fallback(), WeatherSnapshot::fallback(), true);
        }
    };
    match platform.get_weather(&location) {
        Ok(weather) => (location, weather, false),
        Err(e) => {
            warn!("{}; using default weather", e);
            (location, WeatherSnapshot::fallback(), true)
        }
    }
}
