//! Schedule-to-grid transformation.
//!
//! Turns a flat timetable snapshot into two cross-tab grids (rows =
//! timeslots in server order, columns = teachers / student groups in
//! first-seen order) plus an overflow list of unassigned lessons. The
//! output is plain structured data; rendering it into concrete UI
//! elements is a separate, thin adapter ([`crate::view`]).
//!
//! Every render pass rebuilds both grids from scratch. There is no
//! incremental diffing: the engine's snapshot is authoritative and is
//! replaced wholesale on every poll.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::api::{Lesson, Timeslot, TimeslotId, Timetable};
use crate::services::color::pick_color;
use crate::services::ident::cell_key;

/// One grid column: the display name and its structural cell key.
#[derive(Debug, Clone)]
pub struct GridColumn {
    pub name: String,
    pub key: String,
}

/// One grid row: a timeslot with one placement target per column.
#[derive(Debug, Clone)]
pub struct GridRow {
    pub timeslot_id: TimeslotId,
    /// Formatted `Weekday HH:MM - HH:MM` label.
    pub label: String,
    /// Indexed in lockstep with the grid's columns.
    pub cells: Vec<Vec<LessonCard>>,
}

/// Rendered lesson card content, cloned into each grid it appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub lesson_id: crate::api::LessonId,
    pub subject: String,
    pub teacher: String,
    pub student_group: String,
    pub color: &'static str,
}

/// Cross-tab grid keyed by `(timeslot id, cell key)`.
#[derive(Debug, Clone)]
pub struct LessonGrid {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
    /// Cell address → (row index, column index).
    index: HashMap<(i64, String), (usize, usize)>,
}

impl LessonGrid {
    /// Build the empty skeleton: one column per distinct non-empty name
    /// (first-seen order preserved), one row per timeslot (server order).
    fn skeleton(column_names: Vec<String>, timeslots: &[Timeslot]) -> Self {
        let columns: Vec<GridColumn> = column_names
            .into_iter()
            .map(|name| {
                let key = cell_key(&name);
                GridColumn { name, key }
            })
            .collect();

        let mut index = HashMap::new();
        let rows: Vec<GridRow> = timeslots
            .iter()
            .enumerate()
            .map(|(row_idx, timeslot)| {
                for (col_idx, column) in columns.iter().enumerate() {
                    index.insert(
                        (timeslot.id.value(), column.key.clone()),
                        (row_idx, col_idx),
                    );
                }
                GridRow {
                    timeslot_id: timeslot.id,
                    label: format_timeslot_label(timeslot),
                    cells: vec![Vec::new(); columns.len()],
                }
            })
            .collect();

        LessonGrid {
            columns,
            rows,
            index,
        }
    }

    /// Insert a card at `(timeslot, name)`. Returns false when the address
    /// does not exist; the caller tolerates that silently so a dangling
    /// name on one side never breaks placement on the other.
    fn place(&mut self, timeslot_id: TimeslotId, name: &str, card: LessonCard) -> bool {
        match self.index.get(&(timeslot_id.value(), cell_key(name))) {
            Some(&(row_idx, col_idx)) => {
                self.rows[row_idx].cells[col_idx].push(card);
                true
            }
            None => false,
        }
    }

    /// Look up a placement target by its structural address.
    pub fn cell(&self, timeslot_id: TimeslotId, key: &str) -> Option<&[LessonCard]> {
        self.index
            .get(&(timeslot_id.value(), key.to_string()))
            .map(|&(row_idx, col_idx)| self.rows[row_idx].cells[col_idx].as_slice())
    }

    /// Total number of placed cards across all cells.
    pub fn card_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}

/// Full view model for one timetable snapshot.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub score: Option<String>,
    pub solving: bool,
    pub by_teacher: LessonGrid,
    pub by_student_group: LessonGrid,
    pub unassigned: Vec<LessonCard>,
}

/// Build the by-teacher and by-student-group grids for a snapshot.
///
/// Invalid lessons (missing subject, teacher or section) are dropped
/// entirely. Valid lessons without a timeslot go to the unassigned list;
/// the rest are cloned into exactly one cell of each grid.
pub fn build_schedule_view(timetable: &Timetable) -> ScheduleView {
    let teacher_names = distinct_names(&timetable.lessons, |lesson| {
        lesson.teacher.as_ref().map(|t| t.display_name())
    });
    let group_names = distinct_names(&timetable.lessons, |lesson| {
        lesson.section.as_ref().map(|s| s.student_group_name())
    });

    let mut by_teacher = LessonGrid::skeleton(teacher_names, &timetable.timeslots);
    let mut by_student_group = LessonGrid::skeleton(group_names, &timetable.timeslots);
    let mut unassigned = Vec::new();

    for lesson in &timetable.lessons {
        if !lesson.is_valid() {
            tracing::debug!(lesson_id = %lesson.id, "skipping lesson with missing references");
            continue;
        }
        let card = lesson_card(lesson);

        match &lesson.timeslot {
            None => unassigned.push(card),
            Some(timeslot) => {
                let placed_teacher = by_teacher.place(timeslot.id, &card.teacher, card.clone());
                let placed_group =
                    by_student_group.place(timeslot.id, &card.student_group, card.clone());
                if !placed_teacher || !placed_group {
                    tracing::warn!(
                        lesson_id = %lesson.id,
                        timeslot_id = %timeslot.id,
                        placed_teacher,
                        placed_group,
                        "lesson did not match a grid address"
                    );
                }
            }
        }
    }

    ScheduleView {
        score: timetable.score.clone(),
        solving: timetable.is_solving(),
        by_teacher,
        by_student_group,
        unassigned,
    }
}

/// Distinct non-empty display names in first-seen order.
fn distinct_names<F>(lessons: &[Lesson], derive: F) -> Vec<String>
where
    F: Fn(&Lesson) -> Option<String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for lesson in lessons {
        if let Some(name) = derive(lesson) {
            if !name.is_empty() && seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}

fn lesson_card(lesson: &Lesson) -> LessonCard {
    // Callers guarantee validity; empty fallbacks keep this total anyway.
    let subject = lesson
        .subject
        .as_ref()
        .map(|s| s.subject_name.clone())
        .unwrap_or_default();
    let teacher = lesson
        .teacher
        .as_ref()
        .map(|t| t.display_name())
        .unwrap_or_default();
    let student_group = lesson
        .section
        .as_ref()
        .map(|s| s.student_group_name())
        .unwrap_or_default();
    let color = pick_color(&subject);
    LessonCard {
        lesson_id: lesson.id,
        subject,
        teacher,
        student_group,
        color,
    }
}

/// `MONDAY 08:30:00-09:15:00` → `Monday 08:30 - 09:15`.
fn format_timeslot_label(timeslot: &Timeslot) -> String {
    format!(
        "{} {} - {}",
        capitalize_weekday(&timeslot.day_of_week),
        format_time(&timeslot.start_time),
        format_time(&timeslot.end_time)
    )
}

fn capitalize_weekday(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Parse an ISO-like time-of-day string and render it as `HH:MM`.
/// Unparseable values pass through verbatim rather than failing a render.
fn format_time(raw: &str) -> String {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
