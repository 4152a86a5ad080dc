use serde::{Deserialize, Serialize};

/// One synthetic day of traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub date: String,
    pub views: u64,
    pub github_views: u64,
    pub purchases: u64,
}
