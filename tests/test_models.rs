use chrono::{TimeZone, Utc};
use mileapp_provision::models::{
    Task, TaskPriority, TaskStatus, User, TASKS_COLLECTION, USERS_COLLECTION,
};
use mongodb::bson::{self, Bson};

#[test]
fn test_collection_names() {
    assert_eq!(USERS_COLLECTION, "users");
    assert_eq!(TASKS_COLLECTION, "tasks");
}

#[test]
fn test_user_wire_format() {
    let user = User::new("ada@example.com", "$2b$12$notarealhash");
    let doc = bson::to_document(&user).unwrap();

    // no _id until the server assigns one
    assert!(doc.get("_id").is_none());
    assert_eq!(doc.get_str("email").unwrap(), "ada@example.com");
    assert_eq!(doc.get_str("password").unwrap(), "$2b$12$notarealhash");
    assert!(matches!(doc.get("created_at"), Some(Bson::DateTime(_))));
    assert!(matches!(doc.get("updated_at"), Some(Bson::DateTime(_))));
}

#[test]
fn test_task_wire_format() {
    let due = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
    let task = Task::new(
        "write report",
        "quarterly numbers",
        TaskStatus::InProgress,
        TaskPriority::High,
        Some(due),
    );
    let doc = bson::to_document(&task).unwrap();

    // status and priority are stored as their snake_case string values
    assert_eq!(doc.get_str("status").unwrap(), "in_progress");
    assert_eq!(doc.get_str("priority").unwrap(), "high");
    assert_eq!(doc.get_datetime("due_date").unwrap().to_chrono(), due);
    assert!(matches!(doc.get("created_at"), Some(Bson::DateTime(_))));
    assert!(matches!(doc.get("updated_at"), Some(Bson::DateTime(_))));
}

#[test]
fn test_task_due_date_omitted_when_absent() {
    let task = Task::new(
        "triage inbox",
        "",
        TaskStatus::Pending,
        TaskPriority::Low,
        None,
    );
    let doc = bson::to_document(&task).unwrap();
    assert!(doc.get("due_date").is_none());

    // and a document without the field still deserializes
    let parsed: Task = bson::from_document(doc).unwrap();
    assert_eq!(parsed.due_date, None);
    assert_eq!(parsed.status, TaskStatus::Pending);
}
