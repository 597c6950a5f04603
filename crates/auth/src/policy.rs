//! Stateless access-control policy predicates.
//!
//! Each predicate answers one authorization question from already-loaded
//! facts, so handlers decide access before touching the store and tests can
//! exercise every rule without a database.

use thiserror::Error;

/// Authorization failures, one variant per rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Access denied")]
    NotOwner,

    #[error("Access denied")]
    NotTeamMember,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Only the assigned user or admin can update status")]
    NotAssignee,

    #[error("Only the responsible user or admin can update status")]
    NotResponsible,
}

/// A private resource is visible only to the user who owns it.
pub fn ensure_owner(actor_id: i32, owner_user_id: i32) -> Result<(), PolicyError> {
    if actor_id == owner_user_id {
        Ok(())
    } else {
        Err(PolicyError::NotOwner)
    }
}

/// Team resources require membership in that exact team. A user without a
/// team is a member of nothing.
pub fn ensure_team_member(
    actor_team_id: Option<i32>,
    resource_team_id: i32,
) -> Result<(), PolicyError> {
    match actor_team_id {
        Some(team_id) if team_id == resource_team_id => Ok(()),
        _ => Err(PolicyError::NotTeamMember),
    }
}

/// Mutating team tasks and sub-tasks is an admin-only operation.
pub fn ensure_admin(is_admin: bool) -> Result<(), PolicyError> {
    if is_admin {
        Ok(())
    } else {
        Err(PolicyError::AdminRequired)
    }
}

/// Task status may be changed by an admin or by the assigned user. An
/// unassigned task is admin-only.
pub fn ensure_assignee_or_admin(
    is_admin: bool,
    actor_id: i32,
    assigned_user_id: Option<i32>,
) -> Result<(), PolicyError> {
    if is_admin {
        return Ok(());
    }
    match assigned_user_id {
        Some(user_id) if user_id == actor_id => Ok(()),
        _ => Err(PolicyError::NotAssignee),
    }
}

/// Sub-task status may be changed by an admin or by the responsible user.
/// A sub-task with nobody responsible is admin-only.
pub fn ensure_responsible_or_admin(
    is_admin: bool,
    actor_id: i32,
    responsible_user_id: Option<i32>,
) -> Result<(), PolicyError> {
    if is_admin {
        return Ok(());
    }
    match responsible_user_id {
        Some(user_id) if user_id == actor_id => Ok(()),
        _ => Err(PolicyError::NotResponsible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_access_own_resource() {
        assert!(ensure_owner(1, 1).is_ok());
    }

    #[test]
    fn test_non_owner_denied() {
        assert_eq!(ensure_owner(1, 2), Err(PolicyError::NotOwner));
        assert_eq!(ensure_owner(2, 1), Err(PolicyError::NotOwner));
    }

    #[test]
    fn test_team_member_allowed() {
        assert!(ensure_team_member(Some(3), 3).is_ok());
    }

    #[test]
    fn test_other_team_denied() {
        assert_eq!(
            ensure_team_member(Some(3), 4),
            Err(PolicyError::NotTeamMember)
        );
    }

    #[test]
    fn test_teamless_user_denied() {
        assert_eq!(ensure_team_member(None, 3), Err(PolicyError::NotTeamMember));
    }

    #[test]
    fn test_admin_required() {
        assert!(ensure_admin(true).is_ok());
        assert_eq!(ensure_admin(false), Err(PolicyError::AdminRequired));
    }

    #[test]
    fn test_assignee_can_update_status() {
        assert!(ensure_assignee_or_admin(false, 5, Some(5)).is_ok());
    }

    #[test]
    fn test_admin_can_update_any_status() {
        assert!(ensure_assignee_or_admin(true, 5, Some(9)).is_ok());
        assert!(ensure_assignee_or_admin(true, 5, None).is_ok());
    }

    #[test]
    fn test_non_assignee_denied() {
        assert_eq!(
            ensure_assignee_or_admin(false, 5, Some(9)),
            Err(PolicyError::NotAssignee)
        );
    }

    #[test]
    fn test_unassigned_task_rejects_non_admin() {
        assert_eq!(
            ensure_assignee_or_admin(false, 5, None),
            Err(PolicyError::NotAssignee)
        );
    }

    #[test]
    fn test_responsible_user_can_update_status() {
        assert!(ensure_responsible_or_admin(false, 7, Some(7)).is_ok());
        assert!(ensure_responsible_or_admin(true, 7, Some(2)).is_ok());
    }

    #[test]
    fn test_unrelated_user_denied_sub_task_status() {
        assert_eq!(
            ensure_responsible_or_admin(false, 7, Some(2)),
            Err(PolicyError::NotResponsible)
        );
        assert_eq!(
            ensure_responsible_or_admin(false, 7, None),
            Err(PolicyError::NotResponsible)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PolicyError::NotOwner.to_string(), "Access denied");
        assert_eq!(PolicyError::NotTeamMember.to_string(), "Access denied");
        assert_eq!(PolicyError::AdminRequired.to_string(), "Admin access required");
    }
}
