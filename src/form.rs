use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use log::error;

use crate::categories::{label_table, Category, ParentalEducation, ParentalSupport, YesNo};
use crate::error::{AdvisorError, Result};
use crate::models::{FeatureField, StudentFeatures};
use crate::predictor::AppContext;
use crate::report;
use crate::usage;

/// Order in which the interactive form asks for fields. Differs from the
/// model order; assembly into the feature vector is by field, not position.
pub const FORM_ORDER: [FeatureField; 10] = [
    FeatureField::Age,
    FeatureField::StudyTimeWeekly,
    FeatureField::Absences,
    FeatureField::ParentalEducation,
    FeatureField::ParentalSupport,
    FeatureField::Tutoring,
    FeatureField::Extracurricular,
    FeatureField::Sports,
    FeatureField::Music,
    FeatureField::Volunteering,
];

#[derive(Debug, Default, Clone)]
pub struct FormInput {
    values: BTreeMap<FeatureField, f64>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores one raw answer.
    pub fn set(&mut self, field: FeatureField, raw: &str) -> Result<()> {
        let value = parse_field(field, raw)?;
        self.values.insert(field, value);
        Ok(())
    }

    pub fn finish(&self) -> Result<StudentFeatures> {
        StudentFeatures::from_values(&self.values)
    }
}

pub fn parse_field(field: FeatureField, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    let number = || {
        raw.parse::<f64>().map_err(|_| AdvisorError::InvalidValue {
            field: field.name(),
            reason: format!("'{raw}' is not a number"),
        })
    };

    let value = match field {
        FeatureField::Age => whole(field, checked(field, number()?, StudentFeatures::AGE_RANGE)?)?,
        FeatureField::Absences => {
            whole(field, checked(field, number()?, StudentFeatures::ABSENCE_RANGE)?)?
        }
        FeatureField::StudyTimeWeekly => {
            let hours = checked(field, number()?, StudentFeatures::STUDY_TIME_RANGE)?;
            if (hours * 2.0).fract() != 0.0 {
                return Err(AdvisorError::InvalidValue {
                    field: field.name(),
                    reason: format!("{hours} is not a multiple of 0.5 hours"),
                });
            }
            hours
        }
        FeatureField::ParentalEducation => f64::from(ParentalEducation::parse(raw)?.code()),
        FeatureField::ParentalSupport => f64::from(ParentalSupport::parse(raw)?.code()),
        FeatureField::Tutoring
        | FeatureField::Extracurricular
        | FeatureField::Sports
        | FeatureField::Music
        | FeatureField::Volunteering => {
            let flag = YesNo::parse(raw).map_err(|err| match err {
                AdvisorError::UnknownCode { code, .. } => AdvisorError::UnknownCode {
                    field: field.name(),
                    code,
                },
                AdvisorError::UnknownLabel { label, .. } => AdvisorError::UnknownLabel {
                    field: field.name(),
                    label,
                },
                other => other,
            })?;
            f64::from(flag.code())
        }
    };
    Ok(value)
}

fn checked(field: FeatureField, value: f64, (min, max): (f64, f64)) -> Result<f64> {
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

fn whole(field: FeatureField, value: f64) -> Result<f64> {
    if value.fract() != 0.0 {
        return Err(AdvisorError::InvalidValue {
            field: field.name(),
            reason: format!("{value} is not a whole number"),
        });
    }
    Ok(value)
}

pub fn hint(field: FeatureField) -> String {
    fn codes<C: Category>() -> String {
        label_table::<C>()
            .iter()
            .map(|(code, label)| format!("{code}={label}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    match field {
        FeatureField::Age => "15-18".to_string(),
        FeatureField::StudyTimeWeekly => "hours per week, 0-20 in steps of 0.5".to_string(),
        FeatureField::Absences => "0-30".to_string(),
        FeatureField::ParentalEducation => codes::<ParentalEducation>(),
        FeatureField::ParentalSupport => codes::<ParentalSupport>(),
        _ => codes::<YesNo>(),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub served: usize,
    pub failed: usize,
}

/// Prompts for students until the input ends or the user types `q`.
///
/// Invalid answers re-prompt the same field. A failed prediction is logged
/// and reported, and the session moves on to the next student.
pub fn run_session<R: BufRead, W: Write>(
    ctx: &AppContext,
    mut input: R,
    mut out: W,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    writeln!(out, "Academic performance predictor. Enter 'q' to quit.")?;
    writeln!(
        out,
        "Predictions made so far: {}",
        usage::count_predictions(ctx.log_path())
    )?;
    'students: loop {
        writeln!(out)?;
        let mut form = FormInput::new();
        for field in FORM_ORDER {
            loop {
                write!(out, "{field} ({}): ", hint(field))?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
                    break 'students;
                }
                match form.set(field, &line) {
                    Ok(()) => break,
                    Err(err) => writeln!(out, "  {err}")?,
                }
            }
        }

        let advice = form.finish().and_then(|student| ctx.advise(&student));
        match advice {
            Ok(advice) => {
                summary.served += 1;
                write!(out, "{}", report::format_advice(&advice))?;
            }
            Err(err) => {
                summary.failed += 1;
                error!("Prediction failed: {err:?}");
                writeln!(out, "Prediction failed: {err}")?;
            }
        }
    }

    Ok(summary)
}
