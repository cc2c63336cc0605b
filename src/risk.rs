use crate::config::{ConfigError, ScoringWeights};
use crate::models::{PerformanceAssessment, RiskLevel, ScoreBreakdown, StudentMetricsInput};

const LOW_RISK_RECOMMENDATIONS: &[&str] = &[
    "Continue maintaining good attendance",
    "Keep up the excellent work",
    "Consider mentoring struggling students",
    "Participate in advanced projects",
];

const MODERATE_RISK_RECOMMENDATIONS: &[&str] = &[
    "Improve attendance to above 85%",
    "Focus on assignment submissions",
    "Attend extra classes for weak subjects",
    "Form study groups with peers",
    "Review exam preparation strategies",
];

const HIGH_RISK_RECOMMENDATIONS: &[&str] = &[
    "Immediate intervention required",
    "Meet with academic advisor within 48 hours",
    "Attend all classes and tutorials",
    "Submit all pending assignments",
    "Consider peer tutoring programs",
    "Create a structured study schedule",
];

const CRITICAL_RISK_RECOMMENDATIONS: &[&str] = &[
    "URGENT: Schedule meeting with HOD immediately",
    "Enroll in remedial classes",
    "Complete all pending work immediately",
    "Consider academic counseling",
    "Parents/Guardian meeting recommended",
    "May need to consider course withdrawal options",
];

pub const LOW_ATTENDANCE_INSIGHT: &str = "⚠️ Low attendance detected - Major concern";
pub const POOR_EXAMS_INSIGHT: &str = "⚠️ Poor exam performance - Needs immediate attention";
pub const ASSIGNMENTS_INSIGHT: &str = "⚠️ Assignment completion needs improvement";
pub const LAB_WORK_INSIGHT: &str = "⚠️ Lab work performance is below average";

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lower bound is inclusive: 75.0 is Low, 60.0 is Moderate, 45.0 is High.
pub fn risk_level_for(score: f64) -> RiskLevel {
    if score >= 75.0 {
        RiskLevel::Low
    } else if score >= 60.0 {
        RiskLevel::Moderate
    } else if score >= 45.0 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

pub fn recommendations_for(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => LOW_RISK_RECOMMENDATIONS,
        RiskLevel::Moderate => MODERATE_RISK_RECOMMENDATIONS,
        RiskLevel::High => HIGH_RISK_RECOMMENDATIONS,
        RiskLevel::Critical => CRITICAL_RISK_RECOMMENDATIONS,
    }
}

/// Threshold warnings, in a fixed check order and independent of the tier.
pub fn insights_for(input: &StudentMetricsInput) -> Vec<String> {
    let checks = [
        (input.attendance < 75.0, LOW_ATTENDANCE_INSIGHT),
        (input.exam_average() < 50.0, POOR_EXAMS_INSIGHT),
        (input.assignments < 70.0, ASSIGNMENTS_INSIGHT),
        (input.lab_work < 70.0, LAB_WORK_INSIGHT),
    ];

    checks
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, insight)| insight.to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn standard() -> Self {
        Self {
            weights: ScoringWeights::standard(),
        }
    }

    pub fn compute_score(&self, input: &StudentMetricsInput) -> f64 {
        let w = &self.weights;
        let score = input.attendance * w.attendance
            + input.exam_average() * w.exams
            + input.assignments * w.assignments
            + input.quizzes * w.quizzes
            + input.lab_work * w.lab_work
            + input.extracurricular * w.extracurricular;
        round2(score)
    }

    /// Each category is weighted and rounded on its own, so the parts may
    /// differ from the rounded score by a few hundredths.
    pub fn breakdown(&self, input: &StudentMetricsInput) -> ScoreBreakdown {
        let w = &self.weights;
        ScoreBreakdown {
            attendance: round2(input.attendance * w.attendance),
            exams: round2(input.exam_average() * w.exams),
            assignments: round2(input.assignments * w.assignments),
            quizzes: round2(input.quizzes * w.quizzes),
            lab_work: round2(input.lab_work * w.lab_work),
            extracurricular: round2(input.extracurricular * w.extracurricular),
        }
    }

    pub fn assess_risk(&self, score: f64, input: &StudentMetricsInput) -> PerformanceAssessment {
        let risk_level = risk_level_for(score);

        PerformanceAssessment {
            score,
            risk_level,
            status: risk_level.status().to_string(),
            color: risk_level.color(),
            recommendations: recommendations_for(risk_level)
                .iter()
                .map(|r| r.to_string())
                .collect(),
            insights: insights_for(input),
            breakdown: self.breakdown(input),
        }
    }

    pub fn predict(&self, input: &StudentMetricsInput) -> PerformanceAssessment {
        let score = self.compute_score(input);
        self.assess_risk(score, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskColor;

    fn sample_input(values: [f64; 7]) -> StudentMetricsInput {
        let [attendance, mid_sem1, mid_sem2, assignments, quizzes, lab_work, extracurricular] =
            values;
        StudentMetricsInput {
            student_name: "Avery Lee".to_string(),
            roll_number: "HIT-001".to_string(),
            attendance,
            mid_sem1,
            mid_sem2,
            assignments,
            quizzes,
            lab_work,
            extracurricular,
        }
    }

    #[test]
    fn strong_student_scores_low_risk() {
        let engine = ScoringEngine::standard();
        let input = sample_input([90.0, 80.0, 70.0, 85.0, 90.0, 88.0, 60.0]);

        let assessment = engine.predict(&input);
        assert!((assessment.score - 82.95).abs() < 1e-9);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.status, "Excellent Performance");
        assert_eq!(assessment.color, RiskColor::Green);
        assert_eq!(assessment.recommendations.len(), 4);
        assert!(assessment.insights.is_empty());
    }

    #[test]
    fn struggling_student_triggers_every_insight() {
        let engine = ScoringEngine::standard();
        let input = sample_input([40.0, 30.0, 20.0, 50.0, 40.0, 35.0, 10.0]);

        let assessment = engine.predict(&input);
        assert!(assessment.score < 45.0);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert_eq!(assessment.color, RiskColor::Red);
        assert_eq!(
            assessment.insights,
            vec![
                LOW_ATTENDANCE_INSIGHT,
                POOR_EXAMS_INSIGHT,
                ASSIGNMENTS_INSIGHT,
                LAB_WORK_INSIGHT
            ]
        );
        assert_eq!(
            assessment.recommendations[0],
            "URGENT: Schedule meeting with HOD immediately"
        );
    }

    #[test]
    fn tier_boundaries_fall_into_higher_tier() {
        assert_eq!(risk_level_for(75.0), RiskLevel::Low);
        assert_eq!(risk_level_for(74.99), RiskLevel::Moderate);
        assert_eq!(risk_level_for(60.0), RiskLevel::Moderate);
        assert_eq!(risk_level_for(59.99), RiskLevel::High);
        assert_eq!(risk_level_for(45.0), RiskLevel::High);
        assert_eq!(risk_level_for(44.99), RiskLevel::Critical);
        assert_eq!(risk_level_for(-10.0), RiskLevel::Critical);
        assert_eq!(risk_level_for(140.0), RiskLevel::Low);
    }

    #[test]
    fn recommendation_lists_follow_tier_sizes() {
        let sizes: Vec<usize> = RiskLevel::ALL
            .iter()
            .map(|level| recommendations_for(*level).len())
            .collect();
        assert_eq!(sizes, vec![4, 5, 6, 6]);
    }

    #[test]
    fn breakdown_rounds_each_category_independently() {
        let engine = ScoringEngine::standard();
        let input = sample_input([33.33, 41.1, 47.3, 66.67, 12.34, 55.55, 7.77]);

        let breakdown = engine.breakdown(&input);
        assert_eq!(breakdown.attendance, round2(33.33 * 0.25));
        assert_eq!(breakdown.exams, round2(44.2 * 0.30));
        assert_eq!(breakdown.assignments, round2(66.67 * 0.15));
        assert_eq!(breakdown.quizzes, round2(12.34 * 0.10));
        assert_eq!(breakdown.lab_work, round2(55.55 * 0.15));
        assert_eq!(breakdown.extracurricular, round2(7.77 * 0.05));

        let parts = breakdown.attendance
            + breakdown.exams
            + breakdown.assignments
            + breakdown.quizzes
            + breakdown.lab_work
            + breakdown.extracurricular;
        assert!((parts - engine.compute_score(&input)).abs() < 0.05);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let engine = ScoringEngine::standard();
        let input = sample_input([200.0, 150.0, 150.0, 120.0, 130.0, 110.0, 100.0]);
        let score = engine.compute_score(&input);
        assert!(score > 100.0);

        let negative = sample_input([-20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(engine.compute_score(&negative), -5.0);
    }

    #[test]
    fn score_never_decreases_when_one_field_rises() {
        let engine = ScoringEngine::standard();
        let base = [60.0, 55.0, 65.0, 70.0, 50.0, 72.0, 40.0];
        let baseline = engine.compute_score(&sample_input(base));

        for field in 0..base.len() {
            let mut raised = base;
            raised[field] += 10.0;
            assert!(engine.compute_score(&sample_input(raised)) >= baseline);
        }
    }

    #[test]
    fn insights_fire_independently_of_tier() {
        let engine = ScoringEngine::standard();
        let input = sample_input([70.0, 95.0, 95.0, 95.0, 95.0, 95.0, 95.0]);

        let assessment = engine.predict(&input);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.insights, vec![LOW_ATTENDANCE_INSIGHT]);
    }

    #[test]
    fn rejects_unbalanced_weights() {
        let weights = ScoringWeights {
            exams: 0.5,
            ..ScoringWeights::standard()
        };
        assert!(ScoringEngine::new(weights).is_err());
    }
}
