#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a mass tolerance is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MassErrorType {
    /// Absolute error in daltons
    #[default]
    Exact,
    /// Relative error in parts-per-million
    PPM,
}

impl MassErrorType {
    /// Interpret an xQuest `tolerancemeasure` string. Only `"ppm"` is relative,
    /// anything else is treated as an absolute tolerance.
    pub fn from_measure(measure: &str) -> Self {
        if measure == "ppm" {
            Self::PPM
        } else {
            Self::Exact
        }
    }

    pub fn is_ppm(&self) -> bool {
        matches!(self, Self::PPM)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_measure() {
        assert_eq!(MassErrorType::from_measure("ppm"), MassErrorType::PPM);
        assert_eq!(MassErrorType::from_measure("Da"), MassErrorType::Exact);
        assert_eq!(MassErrorType::from_measure("PPM"), MassErrorType::Exact);
        assert!(MassErrorType::PPM.is_ppm());
        assert!(!MassErrorType::default().is_ppm());
    }
}
