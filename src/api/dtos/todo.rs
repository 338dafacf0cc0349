use serde::{Deserialize, Serialize};

/// Request body for POST and PUT. A client-supplied `id` field is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
