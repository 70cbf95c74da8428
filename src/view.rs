//! Thin text adapter over the structured view data.
//!
//! The transforms in [`crate::services`] return plain data; this module
//! turns that data into terminal tables for the board binary. No domain
//! logic lives here.

use crate::services::analysis::{AnalysisIcon, RankedConstraint};
use crate::services::grid::{LessonCard, LessonGrid, ScheduleView};

/// One-line card summary shown inside a grid cell.
fn card_line(card: &LessonCard) -> String {
    format!("{} by {} ({})", card.subject, card.teacher, card.lesson_id)
}

fn render_grid(title: &str, grid: &LessonGrid, out: &mut String) {
    out.push_str(title);
    out.push('\n');

    let mut header = String::from("Timeslot");
    for column in &grid.columns {
        header.push_str(" | ");
        header.push_str(&column.name);
    }
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for row in &grid.rows {
        out.push_str(&row.label);
        for cell in &row.cells {
            out.push_str(" | ");
            let lines: Vec<String> = cell.iter().map(card_line).collect();
            out.push_str(&lines.join("; "));
        }
        out.push('\n');
    }
    out.push('\n');
}

/// Render a full schedule view as text.
pub fn render_schedule(view: &ScheduleView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Score: {}\n\n",
        view.score.as_deref().unwrap_or("?")
    ));

    render_grid("By teacher", &view.by_teacher, &mut out);
    render_grid("By student group", &view.by_student_group, &mut out);

    out.push_str("Unassigned lessons\n");
    if view.unassigned.is_empty() {
        out.push_str("(none)\n");
    } else {
        for card in &view.unassigned {
            out.push_str(&format!("- {} [{}]\n", card_line(card), card.student_group));
        }
    }
    out
}

/// Render the ranked score breakdown as text.
pub fn render_analysis(ranked: &[RankedConstraint]) -> String {
    let mut out = String::new();
    out.push_str("   | Constraint | Type | # Matches | Weight | Score\n");
    for entry in ranked {
        let icon = match entry.icon {
            Some(AnalysisIcon::Warning) => "!!",
            Some(AnalysisIcon::Check) => "ok",
            None => "  ",
        };
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {}\n",
            icon,
            entry.name,
            entry.severity.as_str(),
            entry.match_count,
            entry.weight,
            entry.implicit_score
        ));
        for justification in &entry.justifications {
            out.push_str(&format!("     - {}\n", justification));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ClassMaster, Lesson, LessonId, Section, Subject, Teacher, Timeslot, TimeslotId, Timetable,
    };
    use crate::services::grid::build_schedule_view;

    fn one_lesson_timetable() -> Timetable {
        let slot = Timeslot {
            id: TimeslotId::new(1),
            day_of_week: "TUESDAY".to_string(),
            start_time: "10:00:00".to_string(),
            end_time: "10:45:00".to_string(),
        };
        Timetable {
            timeslots: vec![slot.clone()],
            lessons: vec![Lesson {
                id: LessonId::new(7),
                subject: Some(Subject {
                    subject_name: "Math".to_string(),
                }),
                teacher: Some(Teacher {
                    first_name: Some("Ada".to_string()),
                    last_name: Some("Lovelace".to_string()),
                }),
                section: Some(Section {
                    section_name: Some("A".to_string()),
                    class_master: Some(ClassMaster {
                        class_name: Some("PreKG".to_string()),
                    }),
                }),
                timeslot: Some(slot),
            }],
            score: Some("0hard/0soft".to_string()),
            solver_status: None,
        }
    }

    #[test]
    fn test_render_schedule_contains_card_text() {
        let view = build_schedule_view(&one_lesson_timetable());
        let text = render_schedule(&view);
        assert!(text.contains("Score: 0hard/0soft"));
        assert!(text.contains("Tuesday 10:00 - 10:45"));
        assert!(text.contains("Math by Ada Lovelace (7)"));
        assert!(text.contains("PreKG-A"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_render_schedule_without_score() {
        let mut timetable = one_lesson_timetable();
        timetable.score = None;
        let text = render_schedule(&build_schedule_view(&timetable));
        assert!(text.contains("Score: ?"));
    }

    #[test]
    fn test_render_analysis_marks_icons() {
        use crate::api::ConstraintAnalysis;
        use crate::services::analysis::rank_constraints;

        let ranked = rank_constraints(vec![ConstraintAnalysis {
            name: "Teacher conflict".to_string(),
            weight: "1hard".to_string(),
            score: "-2hard".to_string(),
            matches: vec![Default::default(), Default::default()],
        }]);
        let text = render_analysis(&ranked);
        assert!(text.starts_with("   | Constraint"));
        assert!(text.contains("!! | Teacher conflict | hard | 2 | 1 | -2"));
    }
}
