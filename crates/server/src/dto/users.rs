//! # User & Team Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{teams, users, UserRole};
use serde::Serialize;

/// Team information embedded in user responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResponse {
    pub id:   i32,
    pub name: String,
}

impl From<teams::Model> for TeamResponse {
    fn from(team: teams::Model) -> Self {
        Self {
            id:   team.id,
            name: team.name,
        }
    }
}

/// Full user profile, returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id:         i32,
    pub name:       String,
    pub email:      String,
    pub role:       UserRole,
    pub team_id:    Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team:       Option<TeamResponse>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: users::Model, team: Option<teams::Model>) -> Self {
        Self {
            id:         user.id,
            name:       user.name,
            email:      user.email,
            role:       user.role,
            team_id:    user.team_id,
            team:       team.map(TeamResponse::from),
            created_at: user.created_at,
        }
    }
}

/// Compact user shape for member listings and task assignment display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id:    i32,
    pub name:  String,
    pub email: String,
    pub role:  UserRole,
}

impl From<users::Model> for UserSummary {
    fn from(user: users::Model) -> Self {
        Self {
            id:    user.id,
            name:  user.name,
            email: user.email,
            role:  user.role,
        }
    }
}
