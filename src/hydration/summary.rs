use crate::models::{DayRecord, Summary};

/// Total points over the window plus the goal-met run ending at the most
/// recent day. An unmet most-recent day means a streak of zero.
pub fn summarize(week: &[DayRecord]) -> Summary {
    let total_points = week.iter().map(|d| d.points).sum();

    let mut newest_first: Vec<&DayRecord> = week.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));

    let streak = newest_first.iter().take_while(|d| d.goal_met).count() as u32;

    Summary {
        total_points,
        streak,
    }
}

/// Today's progress toward the goal, capped at 100.
pub fn progress_percentage(water_count: u32, goal: u32) -> u32 {
    if goal == 0 {
        return 100;
    }
    ((u64::from(water_count) * 100 / u64::from(goal)) as u32).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, count: u32, goal: u32) -> DayRecord {
        DayRecord::new(date, count, goal)
    }

    #[test]
    fn three_day_example() {
        let week = vec![
            rec("2024-06-01", 8, 8),
            rec("2024-06-02", 8, 8),
            rec("2024-06-03", 3, 8),
        ];
        let points: Vec<u32> = week.iter().map(|d| d.points).collect();
        assert_eq!(points, vec![100, 100, 37]);

        let s = summarize(&week);
        assert_eq!(s.total_points, 237);
        assert_eq!(s.streak, 0);
    }

    #[test]
    fn streak_counts_run_ending_today() {
        let week = vec![
            rec("2024-06-01", 8, 8),
            rec("2024-06-02", 2, 8),
            rec("2024-06-03", 9, 8),
            rec("2024-06-04", 8, 8),
        ];
        assert_eq!(summarize(&week).streak, 2);
    }

    #[test]
    fn streak_ignores_input_order() {
        let week = vec![
            rec("2024-06-04", 8, 8),
            rec("2024-06-01", 1, 8),
            rec("2024-06-03", 8, 8),
            rec("2024-06-02", 8, 8),
        ];
        assert_eq!(summarize(&week).streak, 3);
    }

    #[test]
    fn all_met() {
        let week: Vec<_> = (1..=7)
            .map(|n| rec(&format!("2024-06-0{}", n), 10, 8))
            .collect();
        let s = summarize(&week);
        assert_eq!(s.streak, 7);
        assert_eq!(s.total_points, 700);
    }

    #[test]
    fn empty_week_is_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn summarize_is_idempotent() {
        let week = vec![rec("2024-06-01", 4, 8), rec("2024-06-02", 8, 8)];
        assert_eq!(summarize(&week), summarize(&week));
    }

    #[test]
    fn progress_caps() {
        assert_eq!(progress_percentage(4, 8), 50);
        assert_eq!(progress_percentage(12, 8), 100);
        assert_eq!(progress_percentage(0, 9), 0);
    }
}
