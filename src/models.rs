use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Fast {
    pub id: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub target_hours: u32,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct StartRequest {
    pub target_hours: u32,
}

#[derive(Debug, Deserialize)]
pub struct HistoryPage {
    pub fasts: Vec<Fast>,
    #[serde(default)]
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyStats {
    #[serde(default)]
    pub week_start: Option<String>,
    pub completed: u32,
    #[serde(default)]
    pub total: u32,
    pub total_hours: f64,
    pub goal: u32,
    pub streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct GoalsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_fast_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_fast_goal: Option<u32>,
}
