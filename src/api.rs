//! Wire DTOs shared with the timetabling engine.
//!
//! This file consolidates the JSON types exchanged with the external
//! optimization service. Field names follow the engine's camelCase wire
//! format; unknown fields are tolerated and missing optional fields default
//! so that partially populated payloads (fresh problems, mid-solve
//! snapshots) decode without errors.

use serde::{Deserialize, Serialize};

/// Timeslot identifier (engine-assigned).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeslotId(pub i64);

/// Lesson identifier (engine-assigned planning id).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LessonId(pub i64);

impl TimeslotId {
    pub fn new(value: i64) -> Self {
        TimeslotId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl LessonId {
    pub fn new(value: i64) -> Self {
        LessonId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TimeslotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Solver lifecycle state reported by the engine.
///
/// Anything other than `NotSolving` (when present at all) means a solve is
/// in flight; unknown states from newer engine versions map to `Unknown`
/// and are treated as solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    NotSolving,
    SolvingScheduled,
    SolvingActive,
    #[serde(other)]
    Unknown,
}

impl SolverStatus {
    pub fn is_solving(&self) -> bool {
        !matches!(self, SolverStatus::NotSolving)
    }
}

/// A schedulable period: weekday plus a start/end time of day.
///
/// Times arrive as ISO-like strings (`"08:30:00"` or `"08:30"`); they are
/// kept verbatim here and parsed at render time so a malformed value never
/// poisons deserialization of the whole timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeslot {
    pub id: TimeslotId,
    /// Upper-case weekday name (`"MONDAY"`).
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

/// Teaching staff reference carried inside a lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Teacher {
    /// Display name: trimmed concatenation with empty components omitted.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }
}

/// Class master (the class a section belongs to).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMaster {
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Student section within a class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub class_master: Option<ClassMaster>,
}

impl Section {
    /// Display "student group" name: `className-sectionName` when both
    /// exist, else whichever exists, else empty.
    pub fn student_group_name(&self) -> String {
        let class_name = self
            .class_master
            .as_ref()
            .and_then(|cm| cm.class_name.as_deref())
            .unwrap_or("");
        let section_name = self.section_name.as_deref().unwrap_or("");
        match (class_name.is_empty(), section_name.is_empty()) {
            (false, false) => format!("{}-{}", class_name, section_name),
            (false, true) => class_name.to_string(),
            (true, false) => section_name.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Taught subject; the name doubles as the deterministic color key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_name: String,
}

/// A single lesson to place into a timeslot.
///
/// Subject, teacher and section are required for a lesson to be valid;
/// the engine occasionally emits records with dangling references and
/// those are dropped from rendering entirely. A missing timeslot is
/// normal: the lesson simply has not been assigned yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub teacher: Option<Teacher>,
    #[serde(default)]
    pub section: Option<Section>,
    #[serde(default)]
    pub timeslot: Option<Timeslot>,
}

impl Lesson {
    /// A lesson missing any of subject/teacher/section is invalid and is
    /// skipped entirely: not rendered, not counted.
    pub fn is_valid(&self) -> bool {
        self.subject.is_some() && self.teacher.is_some() && self.section.is_some()
    }
}

/// Full timetable snapshot, replaced wholesale on every poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub solver_status: Option<SolverStatus>,
}

impl Timetable {
    pub fn is_solving(&self) -> bool {
        self.solver_status.map_or(false, |s| s.is_solving())
    }
}

/// Justification text attached to a constraint match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchJustification {
    #[serde(default)]
    pub description: String,
}

/// One concrete violation/satisfaction of a constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMatch {
    #[serde(default)]
    pub justification: MatchJustification,
}

/// Per-constraint entry of a score analysis response.
///
/// `weight` and `score` are composite score strings
/// (`"-3hard/2medium/-1soft"` style), parsed by [`crate::models::score`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintAnalysis {
    pub name: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub matches: Vec<ConstraintMatch>,
}

/// Score analysis response wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnalysis {
    #[serde(default)]
    pub constraints: Vec<ConstraintAnalysis>,
}

/// Constraint settings row from the engine's configuration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDescriptor {
    pub id: i64,
    pub constraint_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub constraint_type: String,
    #[serde(default)]
    pub enable_flag: bool,
    #[serde(default)]
    pub constraint_weight: i64,
}
