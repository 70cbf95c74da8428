//! Composite score string parsing.
//!
//! The engine reports scores as strings built from `(-?digits)(level)`
//! tokens, e.g. `"-3hard/2medium/-1soft"` or `"0hard/0soft"`. The grammar
//! does not fix order, separators, or completeness, so parsing scans for
//! tokens anywhere in the string and ignores everything else.

use once_cell::sync::Lazy;
use regex::Regex;

static SCORE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?[0-9]+)(hard|medium|soft)").expect("score token regex"));

/// Score split into its three severity levels.
///
/// Levels absent from the source string stay at 0. Duplicate tokens for
/// the same level are legal in the source grammar; the last one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreComponents {
    pub hard: i64,
    pub medium: i64,
    pub soft: i64,
}

impl ScoreComponents {
    /// Extract components from a composite score string.
    ///
    /// Never fails: non-matching characters are skipped and a value too
    /// large for i64 degrades to 0 for that token.
    pub fn parse(score: &str) -> Self {
        let mut components = ScoreComponents::default();
        for captures in SCORE_TOKEN.captures_iter(score) {
            let value: i64 = captures[1].parse().unwrap_or(0);
            match &captures[2] {
                "hard" => components.hard = value,
                "medium" => components.medium = value,
                _ => components.soft = value,
            }
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_score() {
        let components = ScoreComponents::parse("-3hard/2medium/-1soft");
        assert_eq!(
            components,
            ScoreComponents {
                hard: -3,
                medium: 2,
                soft: -1
            }
        );
    }

    #[test]
    fn test_parse_defaults_missing_levels_to_zero() {
        let components = ScoreComponents::parse("0hard/-7soft");
        assert_eq!(
            components,
            ScoreComponents {
                hard: 0,
                medium: 0,
                soft: -7
            }
        );
    }

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(ScoreComponents::parse(""), ScoreComponents::default());
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let components = ScoreComponents::parse("score is 4hard, trust me");
        assert_eq!(components.hard, 4);
        assert_eq!(components.medium, 0);
        assert_eq!(components.soft, 0);
    }

    #[test]
    fn test_parse_arbitrary_separators() {
        let components = ScoreComponents::parse("2medium -3hard;;-1soft");
        assert_eq!(
            components,
            ScoreComponents {
                hard: -3,
                medium: 2,
                soft: -1
            }
        );
    }

    #[test]
    fn test_duplicate_level_last_one_wins() {
        // The grammar allows repeats; downstream consumers rely on the
        // "last token overwrites" behavior.
        let components = ScoreComponents::parse("1hard/5hard/-2soft");
        assert_eq!(components.hard, 5);
        assert_eq!(components.soft, -2);
    }

    proptest! {
        #[test]
        fn prop_parse_recovers_generated_tokens(
            hard in -1000i64..1000,
            medium in -1000i64..1000,
            soft in -1000i64..1000,
            separator in "[ /;,]{1,3}",
        ) {
            let score = format!(
                "{}hard{}{}medium{}{}soft",
                hard, separator, medium, separator, soft
            );
            let components = ScoreComponents::parse(&score);
            prop_assert_eq!(components.hard, hard);
            prop_assert_eq!(components.medium, medium);
            prop_assert_eq!(components.soft, soft);
        }

        #[test]
        fn prop_parse_never_panics(input in ".{0,64}") {
            let _ = ScoreComponents::parse(&input);
        }
    }
}
