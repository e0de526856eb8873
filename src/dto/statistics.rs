use serde::{Deserialize, Serialize};

use crate::domain::statistics::{MeetStatusCounts, Timespan, UserStatistics};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsQuery {
    pub timespan: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsView {
    pub total_calls: usize,
    pub total_meets: usize,
    pub hot_leads: usize,
    pub warm_leads: usize,
    pub cold_leads: usize,
    pub meet_status_counts: MeetStatusCounts,
    pub timespan: Timespan,
}

impl From<UserStatistics> for StatisticsView {
    fn from(stats: UserStatistics) -> Self {
        Self {
            total_calls: stats.total_calls,
            total_meets: stats.meets.total(),
            hot_leads: stats.leads.hot,
            warm_leads: stats.leads.warm,
            cold_leads: stats.leads.cold,
            meet_status_counts: stats.meets,
            timespan: stats.timespan,
        }
    }
}
