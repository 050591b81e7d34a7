use serde::{Deserialize, Serialize};

use crate::FlowError;

/// The five ordered severity categories of the CSSS answer scale.
///
/// The ordinal mapping Never=1 .. Very Often=5 is an external contract:
/// downstream scoring depends on exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Likert {
    Never,
    Rarely,
    Sometimes,
    Often,
    VeryOften,
}

impl Likert {
    /// All categories in scale order, for rendering answer buttons.
    pub const ALL: [Likert; 5] = [
        Likert::Never,
        Likert::Rarely,
        Likert::Sometimes,
        Likert::Often,
        Likert::VeryOften,
    ];

    /// Numeric score, 1..=5.
    pub fn score(&self) -> u8 {
        match self {
            Likert::Never => 1,
            Likert::Rarely => 2,
            Likert::Sometimes => 3,
            Likert::Often => 4,
            Likert::VeryOften => 5,
        }
    }

    /// The label shown to participants.
    pub fn label(&self) -> &'static str {
        match self {
            Likert::Never => "Never",
            Likert::Rarely => "Rarely",
            Likert::Sometimes => "Sometimes",
            Likert::Often => "Often",
            Likert::VeryOften => "Very Often",
        }
    }

    /// High-severity answers trigger exactly one follow-up question.
    pub fn is_severe(&self) -> bool {
        matches!(self, Likert::Often | Likert::VeryOften)
    }
}

impl std::fmt::Display for Likert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Likert {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(Likert::Never),
            "rarely" => Ok(Likert::Rarely),
            "sometimes" => Ok(Likert::Sometimes),
            "often" => Ok(Likert::Often),
            "very often" | "very-often" | "very_often" | "veryoften" => Ok(Likert::VeryOften),
            _ => Err(FlowError::InvalidAnswer(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scores_are_the_fixed_ordinal_mapping() {
        let scores: Vec<u8> = Likert::ALL.iter().map(|l| l.score()).collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ordering_follows_severity() {
        assert!(Likert::Never < Likert::Rarely);
        assert!(Likert::Often < Likert::VeryOften);
    }

    #[test]
    fn test_only_top_two_categories_are_severe() {
        assert!(!Likert::Never.is_severe());
        assert!(!Likert::Rarely.is_severe());
        assert!(!Likert::Sometimes.is_severe());
        assert!(Likert::Often.is_severe());
        assert!(Likert::VeryOften.is_severe());
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for likert in Likert::ALL {
            assert_eq!(Likert::from_str(likert.label()).unwrap(), likert);
        }
        assert_eq!(Likert::from_str("very often").unwrap(), Likert::VeryOften);
        assert_eq!(Likert::from_str("NEVER").unwrap(), Likert::Never);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = Likert::from_str("Occasionally").unwrap_err();
        assert!(matches!(err, FlowError::InvalidAnswer(_)));
    }
}
