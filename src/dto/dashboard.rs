use serde::Serialize;

use crate::domain::dashboard::{DashboardStats, MonthlyProfiles, RelationshipStat};

/// Named value of a pie chart.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: i64,
}

/// Data behind the dashboard page.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub gender_distribution: Vec<ChartSlice>,
    pub relationship_stats: Vec<RelationshipStat>,
    /// Oldest month first.
    pub profiles_by_month: Vec<MonthlyProfiles>,
}
