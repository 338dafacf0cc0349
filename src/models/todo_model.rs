use crate::api::dtos::todo::TodoPayload;
use crate::schema::*;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Insertable row, `id` is assigned by the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "todo"]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<TodoPayload> for NewTodo {
    fn from(payload: TodoPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
            completed_at: payload.completed_at,
        }
    }
}
