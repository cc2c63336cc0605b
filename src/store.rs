use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{
    PerformanceAssessment, PredictionListing, PredictionRecord, PredictionStats, RiskLevel,
    StudentMetricsInput,
};
use crate::risk::round2;

/// Append-only history of predictions for the lifetime of the process.
///
/// Writers take the lock only to push; readers clone out a snapshot, so a
/// record is never observed half-written.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<PredictionRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: PredictionRecord) {
        self.records.write().push(record);
    }

    /// Stamps the assessment with the current time and a fresh id, then appends it.
    pub fn record(
        &self,
        input: &StudentMetricsInput,
        prediction: PerformanceAssessment,
    ) -> PredictionRecord {
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            student_name: input.student_name.clone(),
            roll_number: input.roll_number.clone(),
            prediction,
        };
        self.append(record.clone());
        record
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Earliest record for the roll number, not the latest.
    pub fn find_by_roll_number(&self, roll_number: &str) -> Option<PredictionRecord> {
        self.records
            .read()
            .iter()
            .find(|record| record.roll_number == roll_number)
            .cloned()
    }

    pub fn list_all(&self) -> PredictionListing {
        let records = self.records.read().clone();
        PredictionListing {
            total: records.len(),
            records,
        }
    }

    pub fn statistics(&self) -> PredictionStats {
        let records = self.records.read();
        if records.is_empty() {
            return PredictionStats {
                total_predictions: 0,
                risk_distribution: BTreeMap::new(),
                average_score: 0.0,
            };
        }

        let mut risk_distribution: BTreeMap<RiskLevel, usize> =
            RiskLevel::ALL.iter().map(|level| (*level, 0)).collect();
        let mut total_score = 0.0;

        for record in records.iter() {
            *risk_distribution
                .entry(record.prediction.risk_level)
                .or_insert(0) += 1;
            total_score += record.prediction.score;
        }

        PredictionStats {
            total_predictions: records.len(),
            risk_distribution,
            average_score: round2(total_score / records.len() as f64),
        }
    }
}
