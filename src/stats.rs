//! Gamification: points, levels, focus time, streaks and badges.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const POINTS_PER_LEVEL: u64 = 100;

/// Points for checking off a todo.
pub const TODO_COMPLETION_POINTS: u64 = 10;

/// Extra points when the focus timer completes its selected task.
pub const TIMER_TASK_BONUS_POINTS: u64 = 15;

/// Level for a point total: one level per hundred points, starting at 1.
pub fn level_for_points(points: u64) -> u64 {
    points / POINTS_PER_LEVEL + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Local>,
    pub rarity: Rarity,
}

/// Cumulative engagement counters.
///
/// The level is derived from `total_points` on read and never stored, so
/// there is no way to set it on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    /// Todos ever added. Deleting a todo does not lower it.
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// Minutes of completed focus sessions
    pub focus_time: u64,
    pub current_streak: u64,
    total_points: u64,
    badges: Vec<Badge>,
}

impl UserStats {
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn level(&self) -> u64 {
        level_for_points(self.total_points)
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn add_points(&mut self, points: u64) {
        self.total_points = self.total_points.saturating_add(points);
    }

    pub fn add_focus_time(&mut self, minutes: u64) {
        self.focus_time = self.focus_time.saturating_add(minutes);
    }

    pub fn increment_streak(&mut self) {
        self.current_streak += 1;
    }

    pub fn unlock_badge(&mut self, badge: Badge) {
        self.badges.push(badge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_for_points() {
        let cases = [(0, 1), (99, 1), (100, 2), (250, 3), (1000, 11)];
        for (points, level) in cases {
            assert_eq!(level_for_points(points), level, "points = {}", points);
        }
    }

    #[test]
    fn test_level_follows_points() {
        let mut stats = UserStats::default();
        assert_eq!(stats.level(), 1);

        stats.add_points(99);
        assert_eq!(stats.level(), 1);

        stats.add_points(1);
        assert_eq!(stats.total_points(), 100);
        assert_eq!(stats.level(), 2);

        stats.add_points(150);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = UserStats::default();
        stats.add_focus_time(25);
        stats.add_focus_time(15);
        stats.increment_streak();
        stats.increment_streak();

        assert_eq!(stats.focus_time, 40);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_badges_append_in_order() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let mut stats = UserStats::default();
        for (id, rarity) in [("first", Rarity::Common), ("focus", Rarity::Epic)] {
            stats.unlock_badge(Badge {
                id: id.to_string(),
                name: id.to_string(),
                description: String::new(),
                icon: "*".to_string(),
                unlocked_at: at,
                rarity,
            });
        }

        let ids: Vec<&str> = stats.badges().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "focus"]);
    }

    #[test]
    fn test_stored_level_field_is_ignored_on_load() {
        let json = r#"{"total_tasks":3,"total_points":250,"level":42}"#;
        let stats: UserStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.level(), 3);
    }
}
