//! Option exercise style.

use crr_core::Error;
use std::fmt;
use std::str::FromStr;

/// When an option can be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Can be exercised at any lattice node up to expiry.
    American,
    /// Can only be exercised at expiry.
    European,
}

impl ExerciseStyle {
    /// Whether early exercise is allowed.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::American => write!(f, "american"),
            ExerciseStyle::European => write!(f, "european"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = Error;

    /// Accepts `american` / `amer` / `a` and `european` / `euro` / `e`,
    /// case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "american" | "amer" | "a" => Ok(ExerciseStyle::American),
            "european" | "euro" | "e" => Ok(ExerciseStyle::European),
            other => Err(Error::invalid_argument(
                "style",
                format!("expected `american` or `european`, got `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_styles() {
        assert_eq!("amer".parse::<ExerciseStyle>().unwrap(), ExerciseStyle::American);
        assert_eq!("European".parse::<ExerciseStyle>().unwrap(), ExerciseStyle::European);
        assert_eq!("euro".parse::<ExerciseStyle>().unwrap(), ExerciseStyle::European);
    }

    #[test]
    fn parse_rejects_bermudan() {
        let err = "bermudan".parse::<ExerciseStyle>().unwrap_err();
        assert_eq!(err.parameter(), Some("style"));
    }

    #[test]
    fn early_exercise_flag() {
        assert!(ExerciseStyle::American.allows_early_exercise());
        assert!(!ExerciseStyle::European.allows_early_exercise());
    }
}
