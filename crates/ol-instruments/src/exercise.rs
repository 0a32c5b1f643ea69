//! Option exercise style.
//!
//! Only vanilla European and American rights are modelled; path-dependent
//! contracts are outside the lattice engines' scope.

use ol_core::errors::Error;
use std::{fmt, str::FromStr};

/// When an option can be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExerciseStyle {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any lattice node up to expiry.
    American,
}

impl ExerciseStyle {
    /// `true` if early exercise is allowed.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "am" => Ok(ExerciseStyle::American),
            _ => Err(Error::InvalidParameter(format!(
                "unknown exercise style '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!(
            "American".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
        assert_eq!(ExerciseStyle::default(), ExerciseStyle::European);
        assert_eq!(ExerciseStyle::European.to_string(), "European");
        assert!("asian".parse::<ExerciseStyle>().is_err());
        assert!(ExerciseStyle::American.allows_early_exercise());
        assert!(!ExerciseStyle::European.allows_early_exercise());
    }
}
