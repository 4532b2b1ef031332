use chrono::{TimeZone, Utc};
use planboard_types::*;
use serde_json::json;

fn sample_task() -> Task {
    Task {
        task_id: TaskId::new(1),
        name: "Draft outline".to_string(),
        description: "First pass".to_string(),
        start_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
        end_at: None,
        status: TaskStatus::Unfinished,
        project_id: ProjectId::new(7),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    }
}

#[test]
fn test_task_wire_shape() {
    let value = serde_json::to_value(sample_task()).unwrap();
    assert_eq!(
        value,
        json!({
            "taskId": 1,
            "name": "Draft outline",
            "description": "First pass",
            "startAt": "2024-05-01T10:30:00.000Z",
            "endAt": null,
            "unfinished": true,
            "completed": false,
            "projectId": 7,
            "createdAt": "2024-05-01T09:00:00.000Z",
            "updatedAt": "2024-05-01T09:00:00.000Z",
        })
    );
}

#[test]
fn test_task_round_trip() {
    let task = sample_task();
    let value = serde_json::to_value(&task).unwrap();
    let back: Task = serde_json::from_value(value).unwrap();
    assert_eq!(back, task);
}

#[test]
fn test_task_status_decode_is_strict() {
    let mut both = serde_json::to_value(sample_task()).unwrap();
    both["completed"] = json!(true);
    assert!(serde_json::from_value::<Task>(both).is_err());

    let mut neither = serde_json::to_value(sample_task()).unwrap();
    neither["unfinished"] = json!(false);
    assert!(serde_json::from_value::<Task>(neither).is_err());
}

#[test]
fn test_fields_body_never_carries_server_fields() {
    let body = serde_json::to_value(sample_task().fields()).unwrap();
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("taskId"));
    assert!(!object.contains_key("createdAt"));
    assert!(!object.contains_key("updatedAt"));
    // A cleared end date travels as an explicit null, never an
    // omitted key.
    assert_eq!(object["endAt"], json!(null));
}

#[test]
fn test_project_decode_normalizes_offsets() {
    let project: Project = serde_json::from_value(json!({
        "projectId": 7,
        "name": "Launch",
        "description": "",
        "startAt": "2024-05-01T12:30:00.000+02:00",
        "endAt": "2024-06-01T00:00:00.000Z",
        "createdAt": "2024-04-30T08:00:00.000Z",
        "updatedAt": "2024-04-30T08:00:00.000Z",
    }))
    .unwrap();
    assert_eq!(project.start_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());
    assert_eq!(project.end_at, Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
}

#[test]
fn test_sanitize_scrubs_free_text_only() {
    let mut fields = sample_task().fields();
    fields.name = "Plan; drop".to_string();
    fields.description = r#"a "quoted" note"#.to_string();
    fields.sanitize();
    assert_eq!(fields.name, "Plan drop");
    assert_eq!(fields.description, "a quoted note");
    assert_eq!(fields.project_id, ProjectId::new(7));
}

#[test]
fn test_normalize_timestamps_truncates_to_wire_precision() {
    let mut fields = sample_task().fields();
    fields.start_at = Utc.timestamp_opt(1_714_559_400, 123_456_789).unwrap();
    fields.end_at = Some(Utc.timestamp_opt(1_714_559_400, 999_999_999).unwrap());
    fields.normalize_timestamps();
    assert_eq!(fields.start_at.timestamp_subsec_nanos(), 123_000_000);
    assert_eq!(fields.end_at.unwrap().timestamp_subsec_nanos(), 999_000_000);
}
