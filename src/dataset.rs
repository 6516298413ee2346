use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AdvisorError, Result};
use crate::models::{FeatureField, StudentFeatures};

#[derive(Debug, Clone)]
pub struct DatasetRow {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    pub student_id: Option<String>,
    pub features: StudentFeatures,
    pub gpa: Option<f64>,
}

/// Columns are matched by header name; anything else in the file, such as
/// `Gender` or `GradeClass`, is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    #[serde(rename = "StudentID", default)]
    student_id: Option<String>,
    age: f64,
    parental_education: f64,
    study_time_weekly: f64,
    absences: f64,
    tutoring: f64,
    parental_support: f64,
    extracurricular: f64,
    sports: f64,
    music: f64,
    volunteering: f64,
    #[serde(rename = "GPA", default)]
    gpa: Option<f64>,
}

impl CsvRow {
    fn values(&self) -> BTreeMap<FeatureField, f64> {
        [
            (FeatureField::Age, self.age),
            (FeatureField::ParentalEducation, self.parental_education),
            (FeatureField::StudyTimeWeekly, self.study_time_weekly),
            (FeatureField::Absences, self.absences),
            (FeatureField::Tutoring, self.tutoring),
            (FeatureField::ParentalSupport, self.parental_support),
            (FeatureField::Extracurricular, self.extracurricular),
            (FeatureField::Sports, self.sports),
            (FeatureField::Music, self.music),
            (FeatureField::Volunteering, self.volunteering),
        ]
        .into_iter()
        .collect()
    }
}

pub fn read_path(path: &Path) -> Result<Vec<DatasetRow>> {
    let file = std::fs::File::open(path)?;
    read(file)
}

pub fn read<R: Read>(source: R) -> Result<Vec<DatasetRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let record = result?;
        let features = StudentFeatures::from_values(&record.values()).map_err(|source| {
            AdvisorError::Row {
                row,
                source: Box::new(source),
            }
        })?;
        rows.push(DatasetRow {
            row,
            student_id: record.student_id,
            features,
            gpa: record.gpa,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{ParentalSupport, YesNo};

    const SAMPLE: &str = "\
StudentID,Age,Gender,Ethnicity,ParentalEducation,StudyTimeWeekly,Absences,Tutoring,ParentalSupport,Extracurricular,Sports,Music,Volunteering,GPA,GradeClass
1001,17,1,0,2,19.833722807854713,7,1,2,0,0,1,0,2.929195591667681,2.0
1002,18,0,0,1,15.408756055056764,0,0,1,0,0,0,0,3.042914833436377,1.0
";

    #[test]
    fn reads_training_layout_and_ignores_extra_columns() {
        let rows = read(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.row, 1);
        assert_eq!(first.student_id.as_deref(), Some("1001"));
        assert_eq!(first.features.age, 17);
        assert_eq!(first.features.absences, 7);
        assert_eq!(first.features.music, YesNo::Yes);
        assert!((first.features.study_time_weekly - 19.833722807854713).abs() < 1e-12);
        assert!((first.gpa.unwrap() - 2.929195591667681).abs() < 1e-12);

        assert_eq!(rows[1].features.parental_support, ParentalSupport::Low);
    }

    #[test]
    fn gpa_and_id_are_optional() {
        let csv = "\
Age,ParentalEducation,StudyTimeWeekly,Absences,Tutoring,ParentalSupport,Extracurricular,Sports,Music,Volunteering
16,0,4.5,12,0,0,0,1,0,1
";
        let rows = read(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].gpa.is_none());
        assert!(rows[0].student_id.is_none());
    }

    #[test]
    fn invalid_rows_report_their_position() {
        let csv = "\
Age,ParentalEducation,StudyTimeWeekly,Absences,Tutoring,ParentalSupport,Extracurricular,Sports,Music,Volunteering
16,0,4.5,12,0,0,0,1,0,1
16,0,4.5,12,0,7,0,1,0,1
";
        let err = read(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AdvisorError::Row { row: 2, .. }));
        assert_eq!(err.to_string(), "row 2: invalid ParentalSupport code 7");
    }

    #[test]
    fn missing_columns_are_csv_errors() {
        let csv = "Age,Absences\n16,2\n";
        assert!(matches!(read(csv.as_bytes()), Err(AdvisorError::Csv(_))));
    }
}
