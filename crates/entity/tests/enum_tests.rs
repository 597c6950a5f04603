//! Enum round-trip tests for the entity crate.

use std::str::FromStr;

use entity::{TaskStatus, TodoStatus, UserRole};

#[test]
fn test_task_status_display_values() {
    assert_eq!(format!("{}", TaskStatus::Todo), "TODO");
    assert_eq!(format!("{}", TaskStatus::InProgress), "IN_PROGRESS");
    assert_eq!(format!("{}", TaskStatus::Blocked), "BLOCKED");
    assert_eq!(format!("{}", TaskStatus::Done), "DONE");
}

#[test]
fn test_task_status_from_str_round_trip() {
    for value in TaskStatus::VALUES {
        let parsed = TaskStatus::from_str(value).unwrap();
        assert_eq!(&format!("{}", parsed), value);
    }
}

#[test]
fn test_task_status_rejects_unknown() {
    assert!(TaskStatus::from_str("PENDING").is_err());
    assert!(TaskStatus::from_str("todo").is_err());
    assert!(TaskStatus::from_str("").is_err());
}

#[test]
fn test_todo_status_has_no_blocked_state() {
    assert!(TodoStatus::from_str("BLOCKED").is_err());
    assert_eq!(TodoStatus::VALUES, &["TODO", "IN_PROGRESS", "DONE"]);
}

#[test]
fn test_todo_status_display_values() {
    assert_eq!(format!("{}", TodoStatus::Todo), "TODO");
    assert_eq!(format!("{}", TodoStatus::InProgress), "IN_PROGRESS");
    assert_eq!(format!("{}", TodoStatus::Done), "DONE");
}

#[test]
fn test_user_role_admin_check() {
    assert!(UserRole::Admin.is_admin());
    assert!(!UserRole::Member.is_admin());
}

#[test]
fn test_user_role_display() {
    assert_eq!(format!("{}", UserRole::Admin), "ADMIN");
    assert_eq!(format!("{}", UserRole::Member), "MEMBER");
}

#[test]
fn test_status_serde_wire_format() {
    assert_eq!(
        serde_json::to_string(&TaskStatus::InProgress).unwrap(),
        "\"IN_PROGRESS\""
    );
    let parsed: TaskStatus = serde_json::from_str("\"BLOCKED\"").unwrap();
    assert_eq!(parsed, TaskStatus::Blocked);

    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
}
