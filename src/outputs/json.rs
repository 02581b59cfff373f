//! JSON rendering of a report.
//!
//! The document mirrors [`Report`]: articles with their summaries, labels and
//! compound scores, the label distribution, the dominant sentiment and the
//! common headline keywords.

use crate::report::Report;

/// Serialize `report` as pretty-printed JSON.
pub fn report_to_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
