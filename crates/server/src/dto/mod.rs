//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints.
//!
//! Patch-style requests distinguish "field absent" from "field null" with
//! `Option<Option<T>>`: the outer level is presence, the inner the value.

use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod private_todos;
pub mod sub_tasks;
pub mod team_tasks;
pub mod users;

/// Request body for status-only updates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status value
    pub status: String,
}

/// Deserializes a present field into `Some(value)`, where `value` itself
/// may be `None` for an explicit JSON `null`. Combine with
/// `#[serde(default)]` so an absent field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
