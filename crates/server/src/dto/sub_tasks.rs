//! # Sub-Task Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{sub_tasks, TaskStatus};
use serde::{Deserialize, Serialize};

use crate::dto::double_option;

/// Request body for creating a sub-task (admin only)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSubTaskRequest {
    pub title: String,

    /// Defaults to TODO when absent
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub responsible_user_id: Option<i32>,
}

/// Request body for updating a sub-task (admin only). Absent fields are
/// untouched; an explicit null clears the responsible user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateSubTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub responsible_user_id: Option<Option<i32>>,
}

/// Sub-task as embedded in task reads and sub-task listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubTaskResponse {
    pub id:                  i32,
    pub team_task_id:        i32,
    pub title:               String,
    pub status:              TaskStatus,
    pub responsible_user_id: Option<i32>,
    pub created_at:          DateTime<Utc>,
    pub updated_at:          DateTime<Utc>,
}

impl From<sub_tasks::Model> for SubTaskResponse {
    fn from(sub_task: sub_tasks::Model) -> Self {
        Self {
            id:                  sub_task.id,
            team_task_id:        sub_task.team_task_id,
            title:               sub_task.title,
            status:              sub_task.status,
            responsible_user_id: sub_task.responsible_user_id,
            created_at:          sub_task.created_at,
            updated_at:          sub_task.updated_at,
        }
    }
}
