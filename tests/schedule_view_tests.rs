//! End-to-end view construction from an engine JSON payload.

use timetable_client::api::{Timetable, TimeslotId};
use timetable_client::services::build_schedule_view;
use timetable_client::services::ident::cell_key;

/// A realistic slice of the engine's timetable payload: two timeslots,
/// two teachers sharing one student group, one unassigned lesson and one
/// lesson with no subject at all.
const PAYLOAD: &str = r#"{
  "timeslots": [
    { "id": 1, "dayOfWeek": "MONDAY", "startTime": "08:30:00", "endTime": "09:15:00" },
    { "id": 2, "dayOfWeek": "MONDAY", "startTime": "09:15:00", "endTime": "10:00:00" }
  ],
  "lessons": [
    {
      "id": 10,
      "subject": { "subjectName": "Math" },
      "teacher": { "firstName": "Ada", "lastName": "Lovelace" },
      "section": { "sectionName": "A", "classMaster": { "className": "7" } },
      "timeslot": { "id": 1, "dayOfWeek": "MONDAY", "startTime": "08:30:00", "endTime": "09:15:00" }
    },
    {
      "id": 11,
      "subject": { "subjectName": "Physics" },
      "teacher": { "firstName": "Marie", "lastName": "Curie" },
      "section": { "sectionName": "A", "classMaster": { "className": "7" } },
      "timeslot": { "id": 2, "dayOfWeek": "MONDAY", "startTime": "09:15:00", "endTime": "10:00:00" }
    },
    {
      "id": 12,
      "subject": { "subjectName": "Chemistry" },
      "teacher": { "firstName": "Marie", "lastName": "Curie" },
      "section": { "sectionName": "A", "classMaster": { "className": "7" } },
      "timeslot": null
    },
    {
      "id": 13,
      "teacher": { "firstName": "Marie", "lastName": "Curie" },
      "section": { "sectionName": "A", "classMaster": { "className": "7" } }
    }
  ],
  "score": "0hard/-7soft",
  "solverStatus": "NOT_SOLVING"
}"#;

#[test]
fn builds_both_grids_from_engine_payload() {
    let timetable: Timetable = serde_json::from_str(PAYLOAD).expect("payload decodes");
    let view = build_schedule_view(&timetable);

    assert_eq!(view.score.as_deref(), Some("0hard/-7soft"));
    assert!(!view.solving);

    // Two distinct teachers, one student group, two rows each.
    assert_eq!(view.by_teacher.columns.len(), 2);
    assert_eq!(view.by_student_group.columns.len(), 1);
    assert_eq!(view.by_teacher.rows.len(), 2);
    assert_eq!(view.by_student_group.rows.len(), 2);

    // Lessons 10 and 11 are placed; 12 is unassigned; 13 has no subject
    // and is dropped entirely.
    assert_eq!(view.by_teacher.card_count(), 2);
    assert_eq!(view.by_student_group.card_count(), 2);
    assert_eq!(view.unassigned.len(), 1);
    assert_eq!(view.unassigned[0].subject, "Chemistry");
}

#[test]
fn cells_are_addressed_by_encoded_name() {
    let timetable: Timetable = serde_json::from_str(PAYLOAD).expect("payload decodes");
    let view = build_schedule_view(&timetable);

    let cards = view
        .by_teacher
        .cell(TimeslotId(1), &cell_key("Ada Lovelace"))
        .expect("cell exists");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].subject, "Math");
    assert_eq!(cards[0].student_group, "7-A");

    // Same slot, other teacher: present but empty.
    let empty = view
        .by_teacher
        .cell(TimeslotId(1), &cell_key("Marie Curie"))
        .expect("cell exists");
    assert!(empty.is_empty());

    // Unknown key misses without panicking.
    assert!(view.by_teacher.cell(TimeslotId(1), "nope").is_none());
}

#[test]
fn rows_follow_server_timeslot_order_with_readable_labels() {
    let timetable: Timetable = serde_json::from_str(PAYLOAD).expect("payload decodes");
    let view = build_schedule_view(&timetable);

    let labels: Vec<&str> = view
        .by_student_group
        .rows
        .iter()
        .map(|row| row.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Monday 08:30 - 09:15", "Monday 09:15 - 10:00"]);
}

#[test]
fn same_name_maps_to_same_color_across_grids() {
    let timetable: Timetable = serde_json::from_str(PAYLOAD).expect("payload decodes");
    let view = build_schedule_view(&timetable);

    let teacher_card = view
        .by_teacher
        .cell(TimeslotId(2), &cell_key("Marie Curie"))
        .expect("cell exists")
        .first()
        .expect("card placed")
        .clone();
    let group_card = view
        .by_student_group
        .cell(TimeslotId(2), &cell_key("7-A"))
        .expect("cell exists")
        .first()
        .expect("card placed")
        .clone();

    assert_eq!(teacher_card.subject, group_card.subject);
    assert_eq!(teacher_card.color, group_card.color);
}

#[test]
fn empty_timetable_yields_empty_view() {
    let timetable: Timetable = serde_json::from_str(r#"{}"#).expect("decodes");
    let view = build_schedule_view(&timetable);

    assert!(view.score.is_none());
    assert!(view.by_teacher.columns.is_empty());
    assert!(view.by_teacher.rows.is_empty());
    assert!(view.unassigned.is_empty());
}
