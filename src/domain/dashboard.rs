//! Precomputed statistics backing the dashboard widgets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Single row of `admin_dashboard_overview_cached`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStats {
    pub total_users: i64,
    pub male_users: i64,
    pub female_users: i64,
    pub non_binary_users: i64,
    pub banned_users: i64,
    pub active_users: i64,
    pub tester_users: i64,
    pub paused_users: i64,
    pub incomplete_users: i64,
    pub under_review_users: i64,
    pub active_last_2_months: i64,
    pub active_last_week: i64,
    pub active_last_month: i64,
    pub currently_online: i64,
    pub avg_hours_since_last_seen: f64,
    pub total_matches: i64,
    pub total_messages: i64,
    pub total_photos: i64,
    pub users_with_avatar: i64,
    pub like_rate_percentage: f64,
    pub generated_at: Option<DateTime<Utc>>,
}

impl DashboardStats {
    /// Gender split for the pie chart; empty slices are dropped.
    pub fn gender_distribution(&self) -> Vec<(&'static str, i64)> {
        [
            ("Male", self.male_users),
            ("Female", self.female_users),
            ("Non-Binary/Other", self.non_binary_users),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .collect()
    }
}

/// Row of `admin_relationship_stats`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RelationshipStat {
    pub relationship_type: String,
    pub user_count: i64,
    pub percentage: f64,
}

/// Row of `admin_profiles_by_month`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MonthlyProfiles {
    pub month: NaiveDate,
    pub profiles_created: i64,
    pub male_profiles: i64,
    pub female_profiles: i64,
    pub other_profiles: i64,
}

impl MonthlyProfiles {
    /// Chart label such as `Mar 2025`.
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_distribution_skips_empty_slices() {
        let stats = DashboardStats {
            male_users: 10,
            female_users: 0,
            non_binary_users: 3,
            ..DashboardStats::default()
        };
        assert_eq!(
            stats.gender_distribution(),
            vec![("Male", 10), ("Non-Binary/Other", 3)]
        );
    }

    #[test]
    fn month_label() {
        let row = MonthlyProfiles {
            month: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            profiles_created: 1,
            male_profiles: 1,
            female_profiles: 0,
            other_profiles: 0,
        };
        assert_eq!(row.label(), "Mar 2025");
    }
}
