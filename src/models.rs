use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMetricsInput {
    pub student_name: String,
    pub roll_number: String,
    #[serde(default)]
    pub attendance: f64,
    #[serde(default)]
    pub mid_sem1: f64,
    #[serde(default)]
    pub mid_sem2: f64,
    #[serde(default)]
    pub assignments: f64,
    #[serde(default)]
    pub quizzes: f64,
    #[serde(default)]
    pub lab_work: f64,
    #[serde(default)]
    pub extracurricular: f64,
}

impl StudentMetricsInput {
    pub fn exam_average(&self) -> f64 {
        (self.mid_sem1 + self.mid_sem2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Critical Risk")]
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Risk",
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            RiskLevel::Low => "Excellent Performance",
            RiskLevel::Moderate => "Needs Improvement",
            RiskLevel::High => "At Risk of Failing",
            RiskLevel::Critical => "Severe Risk of Failure",
        }
    }

    pub fn color(self) -> RiskColor {
        match self {
            RiskLevel::Low => RiskColor::Green,
            RiskLevel::Moderate => RiskColor::Yellow,
            RiskLevel::High => RiskColor::Orange,
            RiskLevel::Critical => RiskColor::Red,
        }
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Weighted contribution of each category, rounded per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub attendance: f64,
    pub exams: f64,
    pub assignments: f64,
    pub quizzes: f64,
    pub lab_work: f64,
    pub extracurricular: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAssessment {
    pub score: f64,
    pub risk_level: RiskLevel,
    pub status: String,
    pub color: RiskColor,
    pub recommendations: Vec<String>,
    pub insights: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub student_name: String,
    pub roll_number: String,
    pub prediction: PerformanceAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionListing {
    pub total: usize,
    pub records: Vec<PredictionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total_predictions: usize,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightSummary {
    pub insight: String,
    pub count: usize,
}
