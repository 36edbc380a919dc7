use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user container for events and todos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}
