use crate::categories::{Category, ParentalSupport};
use crate::models::{Advice, PredictionResult, Priority, Recommendation, StudentFeatures};

pub const STUDY_TARGET_HOURS: f64 = 10.0;
pub const ABSENCE_LIMIT: u32 = 5;
pub const CRITICAL_ABSENCES: u32 = 15;
pub const TUTORING_GPA_CEILING: f64 = 3.2;
pub const RECOVERY_TARGET_GPA: f64 = 2.5;

pub const STUDY_TITLE: &str = "Increase weekly study time";
pub const ABSENCE_TITLE: &str = "Reduce absences";
pub const TUTORING_TITLE: &str = "Consider tutoring";
pub const SUPPORT_TITLE: &str = "Strengthen family support";
pub const EXTRACURRICULAR_TITLE: &str = "Join an extracurricular activity";
pub const PHYSICAL_TITLE: &str = "Add physical activity";
pub const ENRICHMENT_TITLE: &str = "Explore music or volunteering";
pub const RECOVERY_TITLE: &str = "Intensive recovery plan";

pub fn advise(student: &StudentFeatures, prediction: PredictionResult) -> Advice {
    Advice {
        prediction,
        recommendations: recommend(student, prediction.gpa),
    }
}

/// Runs every rule against the student and returns the matches ordered by
/// priority. Rules are independent; ties keep rule order.
pub fn recommend(student: &StudentFeatures, gpa: f64) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if student.study_time_weekly < STUDY_TARGET_HOURS {
        let gap = STUDY_TARGET_HOURS - student.study_time_weekly;
        recs.push(Recommendation {
            title: STUDY_TITLE.to_string(),
            rationale: format!(
                "You currently study {:.1} hours per week, below the {STUDY_TARGET_HOURS:.0} hour baseline.",
                student.study_time_weekly
            ),
            action: format!(
                "Add {gap:.1} more hours per week to reach at least {STUDY_TARGET_HOURS:.0} hours."
            ),
            priority: Priority::High,
        });
    }

    if student.absences > ABSENCE_LIMIT {
        let excess = student.absences - ABSENCE_LIMIT;
        recs.push(Recommendation {
            title: ABSENCE_TITLE.to_string(),
            rationale: format!(
                "You have {} absences; attendance is one of the strongest drivers of GPA.",
                student.absences
            ),
            action: format!(
                "Cut at least {excess} absences to stay at or below {ABSENCE_LIMIT} per term."
            ),
            priority: if student.absences > CRITICAL_ABSENCES {
                Priority::Critical
            } else {
                Priority::High
            },
        });
    }

    if !student.tutoring.is_yes() && gpa < TUTORING_GPA_CEILING {
        recs.push(Recommendation {
            title: TUTORING_TITLE.to_string(),
            rationale: format!(
                "Your predicted GPA is {gpa:.2} and you are not receiving tutoring."
            ),
            action: "Book 2 tutoring sessions per week in your weakest subject.".to_string(),
            priority: if gpa < RECOVERY_TARGET_GPA {
                Priority::High
            } else {
                Priority::Medium
            },
        });
    }

    if student.parental_support <= ParentalSupport::Low {
        recs.push(Recommendation {
            title: SUPPORT_TITLE.to_string(),
            rationale: format!(
                "Parental support is currently rated '{}'.",
                student.parental_support.label()
            ),
            action: "Schedule a 30-minute weekly check-in with a parent or mentor.".to_string(),
            priority: Priority::Medium,
        });
    }

    if !student.extracurricular.is_yes() {
        recs.push(Recommendation {
            title: EXTRACURRICULAR_TITLE.to_string(),
            rationale: "You are not taking part in any extracurricular activity.".to_string(),
            action: "Join one club and commit 2 hours per week.".to_string(),
            priority: Priority::Low,
        });
    }

    if !student.sports.is_yes() {
        recs.push(Recommendation {
            title: PHYSICAL_TITLE.to_string(),
            rationale: "You are not involved in any sport.".to_string(),
            action: "Add 3 sessions of 30 minutes of exercise per week.".to_string(),
            priority: Priority::Low,
        });
    }

    if !student.music.is_yes() && !student.volunteering.is_yes() {
        recs.push(Recommendation {
            title: ENRICHMENT_TITLE.to_string(),
            rationale: "You take part in neither music nor volunteering.".to_string(),
            action: "Spend 4 hours per month on music practice or volunteering.".to_string(),
            priority: Priority::Low,
        });
    }

    let grade = PredictionResult::new(gpa).grade();
    if grade.is_failing() {
        let gap = (RECOVERY_TARGET_GPA - gpa).max(0.0);
        recs.insert(
            0,
            Recommendation {
                title: RECOVERY_TITLE.to_string(),
                rationale: format!("Predicted GPA {gpa:.2} falls in grade band {grade}."),
                action: format!(
                    "Meet an academic advisor this week and build a plan to gain {gap:.2} GPA points to reach {RECOVERY_TARGET_GPA:.1}."
                ),
                priority: Priority::Critical,
            },
        );
    }

    recs.sort_by_key(|rec| rec.priority);
    recs
}
