use std::path::PathBuf;

use thiserror::Error;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weight for {name} must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("scoring weights must sum to 1.0 (got {0})")]
    WeightSum(f64),
}

/// Per-category weights applied to the raw percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    pub attendance: f64,
    pub exams: f64,
    pub assignments: f64,
    pub quizzes: f64,
    pub lab_work: f64,
    pub extracurricular: f64,
}

impl ScoringWeights {
    pub fn standard() -> Self {
        Self {
            attendance: 0.25,
            exams: 0.30,
            assignments: 0.15,
            quizzes: 0.10,
            lab_work: 0.15,
            extracurricular: 0.05,
        }
    }

    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("attendance", self.attendance),
            ("exams", self.exams),
            ("assignments", self.assignments),
            ("quizzes", self.quizzes),
            ("labWork", self.lab_work),
            ("extracurricular", self.extracurricular),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut sum = 0.0;
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
            sum += value;
        }

        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding a built frontend, served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}
