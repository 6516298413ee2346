use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::grade::GradeClass;
use crate::models::{Advice, GradeSummary, StudentAdvice};

/// Terminal rendering of a single prediction.
pub fn format_advice(advice: &Advice) -> String {
    let mut output = String::new();
    let prediction = &advice.prediction;

    let _ = writeln!(output, "Predicted GPA: {:.3}", prediction.gpa);
    let _ = writeln!(
        output,
        "Grade class: {} ({})",
        prediction.grade_class, prediction.grade_label
    );
    let _ = writeln!(output);

    if advice.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations. Keep up the current habits.");
        return output;
    }

    let _ = writeln!(output, "Recommendations:");
    for (index, rec) in advice.recommendations.iter().enumerate() {
        let _ = writeln!(output, "{}. [{}] {}", index + 1, rec.priority, rec.title);
        let _ = writeln!(output, "   Why: {}", rec.rationale);
        let _ = writeln!(output, "   Action: {}", rec.action);
    }

    output
}

pub fn summarize_by_grade(students: &[StudentAdvice]) -> Vec<GradeSummary> {
    GradeClass::ALL
        .iter()
        .map(|grade| {
            let gpas: Vec<f64> = students
                .iter()
                .filter(|s| s.advice.prediction.grade() == *grade)
                .map(|s| s.advice.prediction.gpa)
                .collect();
            GradeSummary {
                grade: *grade,
                count: gpas.len(),
                avg_gpa: if gpas.is_empty() {
                    0.0
                } else {
                    gpas.iter().sum::<f64>() / gpas.len() as f64
                },
            }
        })
        .collect()
}

pub fn build_report(
    source: &str,
    generated_at: NaiveDateTime,
    students: &[StudentAdvice],
) -> String {
    let summaries = summarize_by_grade(students);

    let mut output = String::new();

    let _ = writeln!(output, "# Academic Performance Report");
    let _ = writeln!(
        output,
        "Generated from {} on {}",
        source,
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");

    if students.is_empty() {
        let _ = writeln!(output, "No students in this file.");
        return output;
    }

    for summary in summaries.iter().filter(|s| s.count > 0) {
        let _ = writeln!(
            output,
            "- {}: {} students (avg predicted GPA {:.2})",
            summary.grade, summary.count, summary.avg_gpa
        );
    }

    let mut ranked: Vec<&StudentAdvice> = students.iter().collect();
    ranked.sort_by(|a, b| a.advice.prediction.gpa.total_cmp(&b.advice.prediction.gpa));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students");

    for student in ranked {
        let prediction = &student.advice.prediction;
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "### {}: GPA {:.3} ({})",
            student.label, prediction.gpa, prediction.grade_label
        );
        if student.advice.recommendations.is_empty() {
            let _ = writeln!(output, "No recommendations.");
        }
        for rec in student.advice.recommendations.iter() {
            let _ = writeln!(output, "- **{}** [{}]: {}", rec.title, rec.priority, rec.action);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice;
    use crate::models::fixtures::sample_student;
    use crate::models::PredictionResult;

    fn student(label: &str, gpa: f64) -> StudentAdvice {
        StudentAdvice {
            label: label.to_string(),
            advice: advice::advise(&sample_student(), PredictionResult::new(gpa)),
        }
    }

    #[test]
    fn terminal_output_lists_recommendations_in_order() {
        let text = format_advice(&student("x", 1.8).advice);
        assert!(text.starts_with("Predicted GPA: 1.800\nGrade class: 4 (F)"));
        assert!(text.contains("1. [Critical] Intensive recovery plan"));
    }

    #[test]
    fn grade_summary_counts_each_band() {
        let students = vec![student("a", 3.6), student("b", 3.8), student("c", 1.0)];
        let summaries = summarize_by_grade(&students);
        assert_eq!(summaries.len(), 5);
        assert_eq!(summaries[0].count, 2);
        assert!((summaries[0].avg_gpa - 3.7).abs() < 1e-9);
        assert_eq!(summaries[4].count, 1);
        assert_eq!(summaries[2].count, 0);
    }

    #[test]
    fn report_lists_weakest_students_first() {
        let generated = chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let report = build_report(
            "students.csv",
            generated,
            &[student("1001", 3.6), student("1002", 2.1)],
        );
        assert!(report.contains("Generated from students.csv on 2026-03-01 09:30:00"));
        assert!(report.contains("- A: 1 students (avg predicted GPA 3.60)"));
        let weak = report.find("### 1002").unwrap();
        let strong = report.find("### 1001").unwrap();
        assert!(weak < strong);
    }

    #[test]
    fn empty_report_says_so() {
        let generated = chrono::Utc::now().naive_utc();
        let report = build_report("empty.csv", generated, &[]);
        assert!(report.contains("No students in this file."));
    }
}
