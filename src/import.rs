use std::path::Path;

use anyhow::Context;

use crate::models::StudentMetricsInput;
use crate::risk::ScoringEngine;
use crate::store::RecordStore;

/// Reads student metrics from a CSV whose header uses the request field names
/// (`studentName,rollNumber,attendance,midSem1,...`).
pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<StudentMetricsInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let mut students = Vec::new();
    for (index, result) in reader.deserialize::<StudentMetricsInput>().enumerate() {
        let row = result
            .with_context(|| format!("invalid row {} in {}", index + 1, csv_path.display()))?;
        students.push(row);
    }

    Ok(students)
}

/// Scores every student and appends the results, returning how many were recorded.
pub fn score_into(
    engine: &ScoringEngine,
    store: &RecordStore,
    students: &[StudentMetricsInput],
) -> usize {
    for student in students {
        let assessment = engine.predict(student);
        tracing::debug!(
            roll_number = %student.roll_number,
            score = assessment.score,
            "scored student"
        );
        store.record(student, assessment);
    }
    students.len()
}
