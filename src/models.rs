use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::categories::{Category, ParentalEducation, ParentalSupport, YesNo};
use crate::error::{AdvisorError, Result};
use crate::grade::GradeClass;

pub const FEATURE_COUNT: usize = 10;

/// Input fields in the order the regression model was fit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureField {
    Age,
    ParentalEducation,
    StudyTimeWeekly,
    Absences,
    Tutoring,
    ParentalSupport,
    Extracurricular,
    Sports,
    Music,
    Volunteering,
}

impl FeatureField {
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        Self::Age,
        Self::ParentalEducation,
        Self::StudyTimeWeekly,
        Self::Absences,
        Self::Tutoring,
        Self::ParentalSupport,
        Self::Extracurricular,
        Self::Sports,
        Self::Music,
        Self::Volunteering,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::ParentalEducation => "ParentalEducation",
            Self::StudyTimeWeekly => "StudyTimeWeekly",
            Self::Absences => "Absences",
            Self::Tutoring => "Tutoring",
            Self::ParentalSupport => "ParentalSupport",
            Self::Extracurricular => "Extracurricular",
            Self::Sports => "Sports",
            Self::Music => "Music",
            Self::Volunteering => "Volunteering",
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentFeatures {
    pub age: u8,
    pub parental_education: ParentalEducation,
    pub study_time_weekly: f64,
    pub absences: u32,
    pub tutoring: YesNo,
    pub parental_support: ParentalSupport,
    pub extracurricular: YesNo,
    pub sports: YesNo,
    pub music: YesNo,
    pub volunteering: YesNo,
}

impl StudentFeatures {
    pub const AGE_RANGE: (f64, f64) = (15.0, 18.0);
    pub const STUDY_TIME_RANGE: (f64, f64) = (0.0, 20.0);
    pub const ABSENCE_RANGE: (f64, f64) = (0.0, 30.0);

    /// Builds a record from raw numeric values keyed by field, validating
    /// ranges and category codes.
    pub fn from_values(values: &BTreeMap<FeatureField, f64>) -> Result<Self> {
        let get = |field: FeatureField| -> Result<f64> {
            values
                .get(&field)
                .copied()
                .ok_or(AdvisorError::MissingField(field.name()))
        };

        let age = whole_in_range(FeatureField::Age, get(FeatureField::Age)?, Self::AGE_RANGE)?;
        let study_time_weekly = in_range(
            FeatureField::StudyTimeWeekly,
            get(FeatureField::StudyTimeWeekly)?,
            Self::STUDY_TIME_RANGE,
        )?;
        let absences = whole_in_range(
            FeatureField::Absences,
            get(FeatureField::Absences)?,
            Self::ABSENCE_RANGE,
        )?;

        Ok(Self {
            age: age as u8,
            parental_education: ParentalEducation::from_f64(get(FeatureField::ParentalEducation)?)?,
            study_time_weekly,
            absences: absences as u32,
            tutoring: flag(FeatureField::Tutoring, get(FeatureField::Tutoring)?)?,
            parental_support: ParentalSupport::from_f64(get(FeatureField::ParentalSupport)?)?,
            extracurricular: flag(FeatureField::Extracurricular, get(FeatureField::Extracurricular)?)?,
            sports: flag(FeatureField::Sports, get(FeatureField::Sports)?)?,
            music: flag(FeatureField::Music, get(FeatureField::Music)?)?,
            volunteering: flag(FeatureField::Volunteering, get(FeatureField::Volunteering)?)?,
        })
    }

    pub fn value(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::Age => f64::from(self.age),
            FeatureField::ParentalEducation => f64::from(self.parental_education.code()),
            FeatureField::StudyTimeWeekly => self.study_time_weekly,
            FeatureField::Absences => f64::from(self.absences),
            FeatureField::Tutoring => f64::from(self.tutoring.code()),
            FeatureField::ParentalSupport => f64::from(self.parental_support.code()),
            FeatureField::Extracurricular => f64::from(self.extracurricular.code()),
            FeatureField::Sports => f64::from(self.sports.code()),
            FeatureField::Music => f64::from(self.music.code()),
            FeatureField::Volunteering => f64::from(self.volunteering.code()),
        }
    }

    /// Fixed-order encoding passed to the model.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        FeatureField::ALL.map(|field| self.value(field))
    }
}

fn in_range(field: FeatureField, value: f64, (min, max): (f64, f64)) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(AdvisorError::OutOfRange {
            field: field.name(),
            min,
            max,
            value,
        });
    }
    Ok(value)
}

fn whole_in_range(field: FeatureField, value: f64, range: (f64, f64)) -> Result<f64> {
    let value = in_range(field, value, range)?;
    if value.fract() != 0.0 {
        return Err(AdvisorError::InvalidValue {
            field: field.name(),
            reason: format!("expected a whole number, got {value}"),
        });
    }
    Ok(value)
}

/// Decodes a binary flag, reporting errors against the concrete field.
fn flag(field: FeatureField, value: f64) -> Result<YesNo> {
    YesNo::from_f64(value).map_err(|err| match err {
        AdvisorError::UnknownCode { code, .. } => AdvisorError::UnknownCode {
            field: field.name(),
            code,
        },
        AdvisorError::InvalidValue { reason, .. } => AdvisorError::InvalidValue {
            field: field.name(),
            reason,
        },
        other => other,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub gpa: f64,
    pub grade_class: u8,
    pub grade_label: &'static str,
}

impl PredictionResult {
    pub fn new(gpa: f64) -> Self {
        let grade = GradeClass::classify(gpa);
        Self {
            gpa,
            grade_class: grade.id(),
            grade_label: grade.label(),
        }
    }

    pub fn grade(&self) -> GradeClass {
        GradeClass::classify(self.gpa)
    }
}

/// Recommendation urgency. Declaration order is the sort rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(AdvisorError::UnknownPriority(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub rationale: String,
    pub action: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub prediction: PredictionResult,
    pub recommendations: Vec<Recommendation>,
}

/// One student of a batch run, labelled by id or row number.
#[derive(Debug, Clone)]
pub struct StudentAdvice {
    pub label: String,
    pub advice: Advice,
}

#[derive(Debug, Clone)]
pub struct GradeSummary {
    pub grade: GradeClass,
    pub count: usize,
    pub avg_gpa: f64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_values() -> BTreeMap<FeatureField, f64> {
        [
            (FeatureField::Age, 17.0),
            (FeatureField::ParentalEducation, 3.0),
            (FeatureField::StudyTimeWeekly, 8.0),
            (FeatureField::Absences, 2.0),
            (FeatureField::Tutoring, 0.0),
            (FeatureField::ParentalSupport, 2.0),
            (FeatureField::Extracurricular, 1.0),
            (FeatureField::Sports, 0.0),
            (FeatureField::Music, 0.0),
            (FeatureField::Volunteering, 0.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn sample_student() -> StudentFeatures {
        StudentFeatures::from_values(&sample_values()).unwrap()
    }
}
