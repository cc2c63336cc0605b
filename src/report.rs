use std::fmt::Write;

use crate::models::{InsightSummary, PredictionRecord, RiskLevel};
use crate::store::RecordStore;

const ATTENTION_LIMIT: usize = 10;

pub fn summarize_insights(records: &[PredictionRecord]) -> Vec<InsightSummary> {
    let mut map: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for record in records {
        for insight in &record.prediction.insights {
            *map.entry(insight.as_str()).or_insert(0) += 1;
        }
    }

    let mut summaries: Vec<InsightSummary> = map
        .into_iter()
        .map(|(insight, count)| InsightSummary {
            insight: insight.to_string(),
            count,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.insight.cmp(&b.insight)));
    summaries
}

/// Lowest score first; ties keep submission order.
pub fn rank_weakest(records: &[PredictionRecord]) -> Vec<&PredictionRecord> {
    let mut ranked: Vec<&PredictionRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        a.prediction
            .score
            .partial_cmp(&b.prediction.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

pub fn build_report(source_label: &str, store: &RecordStore) -> String {
    let listing = store.list_all();
    let stats = store.statistics();
    let insights = summarize_insights(&listing.records);

    let mut output = String::new();

    let _ = writeln!(output, "# Student Performance Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} students)",
        source_label, stats.total_predictions
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Distribution");

    if stats.total_predictions == 0 {
        let _ = writeln!(output, "No predictions recorded.");
    } else {
        for level in RiskLevel::ALL {
            let count = stats.risk_distribution.get(&level).copied().unwrap_or(0);
            let _ = writeln!(output, "- {}: {}", level.as_str(), count);
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "Average score: {:.2}", stats.average_score);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students Needing Attention");

    let flagged: Vec<&PredictionRecord> = rank_weakest(&listing.records)
        .into_iter()
        .filter(|record| record.prediction.risk_level.needs_attention())
        .take(ATTENTION_LIMIT)
        .collect();

    if flagged.is_empty() {
        let _ = writeln!(output, "No students at high or critical risk.");
    } else {
        for record in flagged {
            let _ = writeln!(
                output,
                "- {} ({}) score {:.2}: {}",
                record.student_name,
                record.roll_number,
                record.prediction.score,
                record.prediction.risk_level.as_str()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Common Insights");

    if insights.is_empty() {
        let _ = writeln!(output, "No warnings raised.");
    } else {
        for summary in insights.iter() {
            let _ = writeln!(output, "- {} ({} students)", summary.insight, summary.count);
        }
    }

    output
}
