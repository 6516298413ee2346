use std::fmt;

use crate::error::{AdvisorError, Result};

/// Bidirectional code/label mapping for a categorical input field.
pub trait Category: Sized + Copy + 'static {
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn code(self) -> u8;
    fn label(self) -> &'static str;

    fn from_code(code: i64) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|value| i64::from(value.code()) == code)
            .ok_or(AdvisorError::UnknownCode {
                field: Self::FIELD,
                code,
            })
    }

    fn from_label(label: &str) -> Result<Self> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdvisorError::UnknownLabel {
                field: Self::FIELD,
                label: wanted.to_string(),
            })
    }

    /// Accepts either a numeric code or a label.
    fn parse(input: &str) -> Result<Self> {
        match input.trim().parse::<i64>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_label(input),
        }
    }

    /// Dataset columns store codes as floats; only whole numbers map.
    fn from_f64(value: f64) -> Result<Self> {
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(AdvisorError::InvalidValue {
                field: Self::FIELD,
                reason: format!("expected an integer code, got {value}"),
            });
        }
        Self::from_code(value as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentalEducation {
    None,
    HighSchool,
    SomeCollege,
    Bachelors,
    Higher,
}

impl Category for ParentalEducation {
    const FIELD: &'static str = "ParentalEducation";
    const ALL: &'static [Self] = &[
        Self::None,
        Self::HighSchool,
        Self::SomeCollege,
        Self::Bachelors,
        Self::Higher,
    ];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HighSchool => "High School",
            Self::SomeCollege => "Some College",
            Self::Bachelors => "Bachelor's",
            Self::Higher => "Higher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParentalSupport {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Category for ParentalSupport {
    const FIELD: &'static str = "ParentalSupport";
    const ALL: &'static [Self] = &[
        Self::None,
        Self::Low,
        Self::Moderate,
        Self::High,
        Self::VeryHigh,
    ];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

/// Binary participation flag shared by tutoring and the activity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

impl Category for YesNo {
    const FIELD: &'static str = "flag";
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(ParentalEducation, ParentalSupport, YesNo);

/// `(code, label)` pairs for display in help output.
pub fn label_table<C: Category>() -> Vec<(u8, &'static str)> {
    C::ALL.iter().map(|value| (value.code(), value.label())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_labels_round_trip() {
        for value in ParentalEducation::ALL {
            assert_eq!(
                ParentalEducation::from_code(i64::from(value.code())).unwrap(),
                *value
            );
            assert_eq!(ParentalEducation::from_label(value.label()).unwrap(), *value);
        }
        for value in ParentalSupport::ALL {
            assert_eq!(ParentalSupport::from_label(value.label()).unwrap(), *value);
        }
    }

    #[test]
    fn support_labels_follow_codes() {
        assert_eq!(ParentalSupport::from_code(0).unwrap().label(), "None");
        assert_eq!(ParentalSupport::from_code(4).unwrap().label(), "Very High");
        assert_eq!(ParentalEducation::from_code(3).unwrap().label(), "Bachelor's");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let err = ParentalSupport::from_code(5).unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::UnknownCode {
                field: "ParentalSupport",
                code: 5
            }
        ));
        assert!(YesNo::from_code(-1).is_err());
        assert!(YesNo::from_code(2).is_err());
    }

    #[test]
    fn parse_accepts_codes_and_labels() {
        assert_eq!(ParentalSupport::parse("3").unwrap(), ParentalSupport::High);
        assert_eq!(ParentalSupport::parse(" very high ").unwrap(), ParentalSupport::VeryHigh);
        assert_eq!(YesNo::parse("yes").unwrap(), YesNo::Yes);
        assert!(ParentalEducation::parse("PhD").is_err());
    }

    #[test]
    fn fractional_codes_are_rejected() {
        assert!(YesNo::from_f64(0.5).is_err());
        assert!(YesNo::from_f64(f64::NAN).is_err());
        assert_eq!(YesNo::from_f64(1.0).unwrap(), YesNo::Yes);
    }

    #[test]
    fn label_table_lists_every_code() {
        let table = label_table::<ParentalEducation>();
        assert_eq!(table.len(), 5);
        assert_eq!(table[0], (0, "None"));
        assert_eq!(table[4], (4, "Higher"));
    }
}
