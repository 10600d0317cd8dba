use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

use crate::platform::{LocalPlatform, Platform};
use crate::reminder::{Reminder, ReminderEvent, ReminderOutcome, ReminderState, Scheduler, ThreadScheduler};
use crate::session::{AddOutcome, Session};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, reminder, stats, statusbar, tracker, weather, weekly};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

struct Toast {
    message: String,
    shown_at: Instant,
}

pub struct App<P: Platform, S: Scheduler> {
    pub view: View,
    pub should_quit: bool,
    session: Session<P>,
    reminder: Reminder<S>,
    toast: Option<Toast>,
}

impl<P: Platform, S: Scheduler> App<P, S> {
    pub fn new(session: Session<P>, reminder: Reminder<S>) -> Self {
        App {
            view: View::Dashboard,
            should_quit: false,
            session,
            reminder,
            toast: None,
        }
    }

    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    pub fn reminder_state(&self) -> ReminderState {
        self.reminder.state()
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.message.as_str())
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// UI refresh: expire the toast and follow the calendar.
    pub fn tick(&mut self, today: NaiveDate) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= TOAST_TTL)
        {
            self.toast = None;
        }
        if self.session.roll_over(today) {
            self.show_toast("🌅 New day, new goal!");
        }
    }

    pub fn handle_reminder(&mut self, event: ReminderEvent) {
        if let Some(ReminderOutcome::Notify) = self.reminder.handle(event) {
            if let Err(e) = self.session.notify() {
                warn!("Notification failed: {}", e);
            }
            self.show_toast("💧 Time to drink water!");
        }
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('a') | KeyCode::Enter => self.add_glass(),
            KeyCode::Char('r') => self.reset_day(),
            KeyCode::Char('s') => {
                let message = match self.reminder.toggle() {
                    ReminderState::Active => "⏰ Reminders started",
                    ReminderState::Inactive => "🔕 Reminders stopped",
                };
                self.show_toast(message);
            }
            KeyCode::Char('f') => {
                self.session.refetch();
                if self.session.using_fallback() {
                    self.show_toast("Weather unavailable, using default conditions");
                } else {
                    self.show_toast(format!(
                        "Weather updated, goal is {} glasses",
                        self.session.goal().adjusted_goal
                    ));
                }
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn add_glass(&mut self) {
        match self.session.add_glass() {
            Ok(AddOutcome::GoalReached { .. }) => {
                self.show_toast("🎉 Goal achieved! You earned 100 points today!");
            }
            Ok(AddOutcome::Added { count }) => {
                self.show_toast(format!(
                    "💧 Great job! {} glass{} of water today",
                    count,
                    if count == 1 { "" } else { "es" }
                ));
            }
            Err(e) => {
                warn!("Could not save water count: {}", e);
                self.show_toast(format!("Could not save: {}", e));
            }
        }
    }

    fn reset_day(&mut self) {
        match self.session.reset_day() {
            Ok(()) => self.show_toast("🔄 Day reset"),
            Err(e) => {
                warn!("Could not reset day: {}", e);
                self.show_toast(format!("Could not save: {}", e));
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let session = self.session();
        let goal = session.goal();

        header::render(frame, outer_chunks[0], &session.location().display_name());
        statusbar::render(frame, outer_chunks[2], self.toast());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        // Left column: weather/goal + tracker
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(13), Constraint::Min(0)])
            .split(columns[0]);

        weather::render(
            frame,
            left_chunks[0],
            session.weather(),
            goal,
            session.using_fallback(),
        );
        tracker::render(
            frame,
            left_chunks[1],
            session.water_count(),
            goal.adjusted_goal,
            session.progress(),
        );

        // Right column: stats + reminder + weekly chart
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        stats::render(frame, right_chunks[0], session.summary(), session.progress());
        reminder::render(
            frame,
            right_chunks[1],
            self.reminder_state(),
            self.reminder.remaining_secs(),
            self.reminder.interval_secs(),
        );
        weekly::render(frame, right_chunks[2], session.week(), &session.today_key());
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = help_popup_area(frame.area());

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [a] / Enter  ", "Add a glass"),
            ("  [r]          ", "Reset today's count"),
            ("  [s]          ", "Start / stop reminders"),
            ("  [f]          ", "Refresh weather and goal"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc] / [q]  ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::water().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::water()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::water()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::water())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Centered box that prefers eight rows of key list but never leaves `area`.
fn help_popup_area(area: Rect) -> Rect {
    let y = area.y + area.height / 4;
    let height = (area.height / 2)
        .max(10)
        .min(area.height.saturating_sub(area.height / 4));
    Rect {
        x: area.x + area.width / 4,
        y,
        width: area.width / 2,
        height,
    }
    .intersection(area)
}

/// Run the dashboard event loop.
pub fn run(session: Session<LocalPlatform>, interval_secs: u64) -> Result<()> {
    let events = EventHandler::new(250);
    let scheduler = ThreadScheduler::<Event>::new(events.sender());
    let mut app = App::new(session, Reminder::new(scheduler, interval_secs));

    let mut terminal = ratatui::init();

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Tick => app.tick(Local::now().date_naive()),
                Event::Reminder(event) => app.handle_reminder(event),
            }
        }
    })();

    // Disarm reminder threads before handing the terminal back.
    drop(app);
    ratatui::restore();
    result
}
