//! Degree/radian interpretation of trigonometric functions.

use serde::{Deserialize, Serialize};

/// How trigonometric arguments and inverse-trig results are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Check if angles are read and written in degrees.
    pub fn is_degrees(self) -> bool {
        matches!(self, Self::Degrees)
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Short label for the mode toggle ("Deg" / "Rad").
    pub fn label(self) -> &'static str {
        match self {
            Self::Degrees => "Deg",
            Self::Radians => "Rad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_degrees() {
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
        assert!(AngleMode::default().is_degrees());
    }

    #[test]
    fn test_toggle_and_label() {
        assert_eq!(AngleMode::Degrees.toggled(), AngleMode::Radians);
        assert_eq!(AngleMode::Radians.toggled(), AngleMode::Degrees);
        assert_eq!(AngleMode::Degrees.label(), "Deg");
        assert_eq!(AngleMode::Radians.label(), "Rad");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&AngleMode::Radians).unwrap(),
            "\"radians\""
        );
        let mode: AngleMode = serde_json::from_str("\"degrees\"").unwrap();
        assert_eq!(mode, AngleMode::Degrees);
    }
}
