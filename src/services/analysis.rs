//! Constraint-analysis ranking for the score breakdown view.
//!
//! Orders constraint analyses so the worst offenders surface first (hard
//! violations, then magnitude, then medium, then soft) and projects each
//! composite weight/score down to the single severity level shown in the
//! breakdown table.

use std::cmp::Ordering;

use crate::api::ConstraintAnalysis;
use crate::models::ScoreComponents;

/// Severity level a constraint is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Hard,
    Medium,
    Soft,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hard => "hard",
            Severity::Medium => "medium",
            Severity::Soft => "soft",
        }
    }
}

/// Display icon attached to a ranked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisIcon {
    /// Hard constraint with a negative realized score.
    Warning,
    /// Negative-weight constraint with no matches.
    Check,
}

/// A constraint analysis annotated and ordered for display.
#[derive(Debug, Clone)]
pub struct RankedConstraint {
    pub name: String,
    pub severity: Severity,
    /// The single weight component at this entry's severity level.
    pub weight: i64,
    /// First nonzero component of the realized score (hard, then medium,
    /// then soft by value, regardless of the weight's severity).
    pub implicit_score: i64,
    pub match_count: usize,
    /// Human-readable justifications, one per match.
    pub justifications: Vec<String>,
    pub icon: Option<AnalysisIcon>,
}

/// Severity-then-magnitude comparator over realized score components.
///
/// Includes the asymmetric `a.hard > 0 && b.soft < 0` branch that
/// compares different levels of the two operands. That branch looks like
/// a latent defect, but the resulting order is what consumers of this
/// ranking expect, so it stays.
fn compare_components(a: &ScoreComponents, b: &ScoreComponents) -> Ordering {
    if a.hard < 0 && b.hard > 0 {
        return Ordering::Less;
    }
    if a.hard > 0 && b.soft < 0 {
        return Ordering::Greater;
    }
    if a.hard.abs() > b.hard.abs() {
        return Ordering::Less;
    }
    if a.medium < 0 && b.medium > 0 {
        return Ordering::Less;
    }
    if a.medium > 0 && b.medium < 0 {
        return Ordering::Greater;
    }
    if a.medium.abs() > b.medium.abs() {
        return Ordering::Less;
    }
    if a.soft < 0 && b.soft > 0 {
        return Ordering::Less;
    }
    if a.soft > 0 && b.soft < 0 {
        return Ordering::Greater;
    }
    b.soft.abs().cmp(&a.soft.abs())
}

/// Classify, annotate and order constraint analyses for display.
pub fn rank_constraints(constraints: Vec<ConstraintAnalysis>) -> Vec<RankedConstraint> {
    // The comparator is not antisymmetric (see compare_components), so it
    // cannot be handed to the standard sort, whose total-order contract it
    // would violate. A stable insertion keeps the result deterministic:
    // each entry moves left past exactly those entries it compares Less
    // than, and equal entries keep the engine's relative order.
    let mut entries: Vec<(ScoreComponents, ConstraintAnalysis)> = Vec::new();
    for analysis in constraints {
        let components = ScoreComponents::parse(&analysis.score);
        let mut pos = entries.len();
        while pos > 0 && compare_components(&components, &entries[pos - 1].0) == Ordering::Less {
            pos -= 1;
        }
        entries.insert(pos, (components, analysis));
    }

    entries
        .into_iter()
        .map(|(score, analysis)| annotate(score, analysis))
        .collect()
}

fn annotate(score: ScoreComponents, analysis: ConstraintAnalysis) -> RankedConstraint {
    let weight_components = ScoreComponents::parse(&analysis.weight);
    let (severity, weight) = if weight_components.hard != 0 {
        (Severity::Hard, weight_components.hard)
    } else if weight_components.medium != 0 {
        (Severity::Medium, weight_components.medium)
    } else {
        (Severity::Soft, weight_components.soft)
    };

    let implicit_score = if score.hard != 0 {
        score.hard
    } else if score.medium != 0 {
        score.medium
    } else {
        score.soft
    };

    let match_count = analysis.matches.len();
    let icon = if severity == Severity::Hard && implicit_score < 0 {
        Some(AnalysisIcon::Warning)
    } else if weight < 0 && match_count == 0 {
        Some(AnalysisIcon::Check)
    } else {
        None
    };

    RankedConstraint {
        name: analysis.name,
        severity,
        weight,
        implicit_score,
        match_count,
        justifications: analysis
            .matches
            .into_iter()
            .map(|m| m.justification.description)
            .collect(),
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConstraintMatch, MatchJustification};

    fn analysis(name: &str, weight: &str, score: &str, matches: usize) -> ConstraintAnalysis {
        ConstraintAnalysis {
            name: name.to_string(),
            weight: weight.to_string(),
            score: score.to_string(),
            matches: (0..matches)
                .map(|i| ConstraintMatch {
                    justification: MatchJustification {
                        description: format!("{} match {}", name, i),
                    },
                })
                .collect(),
        }
    }

    fn names(ranked: &[RankedConstraint]) -> Vec<&str> {
        ranked.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_negative_hard_sorts_before_positive_hard() {
        let ranked = rank_constraints(vec![
            analysis("rewarded", "1hard", "1hard", 1),
            analysis("violated", "-1hard", "-1hard", 1),
        ]);
        assert_eq!(names(&ranked), vec!["violated", "rewarded"]);
    }

    #[test]
    fn test_hard_magnitude_breaks_ties() {
        let ranked = rank_constraints(vec![
            analysis("small", "-1hard", "-2hard", 1),
            analysis("large", "-1hard", "-9hard", 1),
        ]);
        assert_eq!(names(&ranked), vec!["large", "small"]);
    }

    #[test]
    fn test_soft_ordering_negative_first_then_magnitude() {
        // soft=-5 before soft=+3; +3 before -2 is NOT required: with
        // equal hard/medium the sign rules run first, so -2 precedes +3.
        let ranked = rank_constraints(vec![
            analysis("plus3", "0soft", "3soft", 1),
            analysis("minus5", "0soft", "-5soft", 1),
            analysis("minus2", "0soft", "-2soft", 1),
        ]);
        assert_eq!(names(&ranked), vec!["minus5", "minus2", "plus3"]);
    }

    #[test]
    fn test_cross_level_quirk_reproduced() {
        // Documented quirk: the second branch compares a's hard
        // against b's soft. A positive-hard entry is pushed after a
        // negative-soft one even though hard normally dominates soft.
        let a = ScoreComponents::parse("2hard");
        let b = ScoreComponents::parse("-1soft");
        assert_eq!(compare_components(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_stable_for_equal_entries() {
        let ranked = rank_constraints(vec![
            analysis("first", "0soft", "0soft", 0),
            analysis("second", "0soft", "0soft", 0),
            analysis("third", "0soft", "0soft", 0),
        ]);
        assert_eq!(names(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_severity_from_first_nonzero_weight_level() {
        let ranked = rank_constraints(vec![analysis("medium rule", "0hard/5medium/1soft", "0", 0)]);
        assert_eq!(ranked[0].severity, Severity::Medium);
        assert_eq!(ranked[0].weight, 5);
    }

    #[test]
    fn test_implicit_score_is_value_first_projection() {
        // score has hard=0, medium=0, soft=-4: implicit score is -4 even
        // though the weight classifies the constraint as hard.
        let ranked = rank_constraints(vec![analysis("rule", "1hard", "0hard/0medium/-4soft", 1)]);
        assert_eq!(ranked[0].severity, Severity::Hard);
        assert_eq!(ranked[0].implicit_score, -4);
    }

    #[test]
    fn test_warning_icon_for_broken_hard_constraint() {
        let ranked = rank_constraints(vec![analysis("conflict", "1hard", "-3hard", 3)]);
        assert_eq!(ranked[0].icon, Some(AnalysisIcon::Warning));
    }

    #[test]
    fn test_check_icon_for_unmatched_negative_weight() {
        let ranked = rank_constraints(vec![analysis("penalty", "-2soft", "0soft", 0)]);
        assert_eq!(ranked[0].icon, Some(AnalysisIcon::Check));
    }

    #[test]
    fn test_no_icon_otherwise() {
        let ranked = rank_constraints(vec![analysis("reward", "2soft", "4soft", 2)]);
        assert_eq!(ranked[0].icon, None);
    }

    #[test]
    fn test_justifications_carried_through() {
        let ranked = rank_constraints(vec![analysis("rule", "-1soft", "-1soft", 2)]);
        assert_eq!(ranked[0].match_count, 2);
        assert_eq!(ranked[0].justifications[0], "rule match 0");
    }
}
