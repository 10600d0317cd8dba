use chrono::{Datelike, Duration, NaiveDate};

use crate::models::DayRecord;

/// Number of days kept in the rolling history.
pub const WINDOW_DAYS: usize = 7;

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns a new week with today's record set to `new_count`.
///
/// An existing record for `today` is replaced where it sits. Otherwise a new
/// record is appended and the oldest entries are dropped so that at most
/// [`WINDOW_DAYS`] remain.
pub fn apply_water_count(
    week: &[DayRecord],
    today: &str,
    new_count: u32,
    goal: u32,
) -> Vec<DayRecord> {
    let mut updated = week.to_vec();
    let record = DayRecord::new(today, new_count, goal);

    match updated.iter().position(|d| d.date == today) {
        Some(idx) => updated[idx] = record,
        None => {
            updated.push(record);
            let excess = updated.len().saturating_sub(WINDOW_DAYS);
            updated.drain(..excess);
        }
    }
    updated
}

/// Keep only the most recent [`WINDOW_DAYS`] records, sorted ascending.
pub fn trim_window(mut week: Vec<DayRecord>) -> Vec<DayRecord> {
    week.sort_by(|a, b| a.date.cmp(&b.date));
    week.dedup_by(|later, earlier| later.date == earlier.date);
    let excess = week.len().saturating_sub(WINDOW_DAYS);
    week.drain(..excess);
    week
}

/// Seven zero-count days ending at `today`.
pub fn empty_week(today: NaiveDate, goal: u32) -> Vec<DayRecord> {
    window_dates(today)
        .map(|d| DayRecord::new(&date_key(d), 0, goal))
        .collect()
}

/// Seven days of plausible intake ending at `today`, between 60% and 110%
/// of the goal. The same date always produces the same count.
pub fn demo_week(today: NaiveDate, goal: u32) -> Vec<DayRecord> {
    window_dates(today)
        .map(|d| {
            let ratio = 0.6 + unit_noise(d) * 0.5;
            let count = (f64::from(goal) * ratio).floor().max(0.0) as u32;
            DayRecord::new(&date_key(d), count, goal)
        })
        .collect()
}

fn window_dates(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..WINDOW_DAYS as i64)
        .rev()
        .map(move |back| today - Duration::days(back))
}

// splitmix64 over the day number, mapped into [0, 1)
fn unit_noise(date: NaiveDate) -> f64 {
    let mut z = (date.num_days_from_ce() as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
    }

    fn week_of(days: std::ops::RangeInclusive<u32>, count: u32, goal: u32) -> Vec<DayRecord> {
        days.map(|n| DayRecord::new(&date_key(day(n)), count, goal)).collect()
    }

    #[test]
    fn updates_today_in_place() {
        let week = week_of(1..=3, 2, 8);
        let updated = apply_water_count(&week, "2024-06-02", 8, 8);

        assert_eq!(updated.len(), 3);
        assert_eq!(updated[1].date, "2024-06-02");
        assert_eq!(updated[1].water_count, 8);
        assert!(updated[1].goal_met);
        assert_eq!(updated[1].points, 100);
        // untouched neighbours
        assert_eq!(updated[0], week[0]);
        assert_eq!(updated[2], week[2]);
        // input left alone
        assert_eq!(week[1].water_count, 2);
    }

    #[test]
    fn in_place_update_refreshes_goal() {
        let week = week_of(1..=2, 5, 8);
        let updated = apply_water_count(&week, "2024-06-02", 5, 10);
        assert_eq!(updated[1].goal, 10);
        assert_eq!(updated[1].points, 50);
    }

    #[test]
    fn appends_new_day() {
        let week = week_of(1..=3, 4, 8);
        let updated = apply_water_count(&week, "2024-06-04", 1, 8);
        assert_eq!(updated.len(), 4);
        assert_eq!(updated.last().unwrap().date, "2024-06-04");
        assert_eq!(updated.last().unwrap().points, 12);
    }

    #[test]
    fn full_week_evicts_oldest() {
        let week = week_of(1..=7, 8, 8);
        let updated = apply_water_count(&week, "2024-06-08", 1, 8);

        assert_eq!(updated.len(), WINDOW_DAYS);
        assert_eq!(updated.first().unwrap().date, "2024-06-02");
        assert_eq!(updated.last().unwrap().date, "2024-06-08");
        let dates: Vec<_> = updated.iter().map(|d| d.date.clone()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn reset_to_zero_recomputes() {
        let week = week_of(1..=1, 9, 8);
        let updated = apply_water_count(&week, "2024-06-01", 0, 8);
        assert_eq!(updated[0].water_count, 0);
        assert!(!updated[0].goal_met);
        assert_eq!(updated[0].points, 0);
    }

    #[test]
    fn empty_week_starts_from_nothing() {
        let updated = apply_water_count(&[], "2024-06-01", 1, 8);
        assert_eq!(updated, vec![DayRecord::new("2024-06-01", 1, 8)]);
    }

    #[test]
    fn trim_window_sorts_dedups_and_caps() {
        let mut week = week_of(1..=9, 3, 8);
        week.reverse();
        week.push(DayRecord::new("2024-06-09", 3, 8));
        let trimmed = trim_window(week);
        assert_eq!(trimmed.len(), WINDOW_DAYS);
        assert_eq!(trimmed[0].date, "2024-06-03");
        assert_eq!(trimmed[6].date, "2024-06-09");
    }

    #[test]
    fn empty_week_shape() {
        let week = empty_week(day(10), 9);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, "2024-06-04");
        assert_eq!(week[6].date, "2024-06-10");
        assert!(week.iter().all(|d| d.water_count == 0 && d.goal == 9 && !d.goal_met));
    }

    #[test]
    fn demo_week_is_deterministic_and_in_range() {
        let a = demo_week(day(20), 10);
        let b = demo_week(day(20), 10);
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
        assert_eq!(a[6].date, "2024-06-20");
        for d in &a {
            assert!((6..=10).contains(&d.water_count), "{:?}", d);
            assert_eq!(d.goal_met, d.water_count >= 10);
        }
    }

    #[test]
    fn demo_week_overlaps_consistently() {
        // the same calendar date yields the same demo count regardless of window end
        let a = demo_week(day(20), 8);
        let b = demo_week(day(21), 8);
        assert_eq!(a[1..], b[..6]);
    }
}
