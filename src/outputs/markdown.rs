//! Markdown rendering of a report.

use crate::report::Report;
use std::fmt::Write;

/// Render `report` as a Markdown document.
///
/// Layout:
/// ```text
/// # News digest: Acme
///
/// ## Sentiment Distribution
/// | Sentiment | Articles |
/// ...
/// ## Article Summaries
/// ### <title>
/// ...
/// ## News Insight Highlight
/// ```
pub fn report_to_markdown(report: &Report) -> String {
    let mut md = String::new();

    writeln!(md, "# News digest: {}\n", report.company).unwrap();

    writeln!(md, "## Sentiment Distribution\n").unwrap();
    writeln!(md, "| Sentiment | Articles |").unwrap();
    writeln!(md, "|-----------|----------|").unwrap();
    for (label, count) in report.distribution_rows() {
        writeln!(md, "| {label} | {count} |").unwrap();
    }
    writeln!(md).unwrap();

    writeln!(md, "## Article Summaries\n").unwrap();
    if report.articles.is_empty() {
        writeln!(md, "_No articles matched the selected sentiment range._\n").unwrap();
    }
    for article in &report.articles {
        writeln!(md, "### {}\n", article.title).unwrap();
        if let Some(summary) = &article.summary {
            writeln!(md, "**Summary:** {summary}\n").unwrap();
        }
        if let Some(sentiment) = article.sentiment {
            match article.compound {
                Some(compound) => {
                    writeln!(md, "**Sentiment:** {sentiment} ({compound:+.3})\n").unwrap()
                }
                None => writeln!(md, "**Sentiment:** {sentiment}\n").unwrap(),
            }
        }
        if !article.is_placeholder() {
            writeln!(md, "[Read full article]({})\n", article.url).unwrap();
        }
    }

    writeln!(md, "## News Insight Highlight\n").unwrap();
    match report.dominant_sentiment {
        Some(dominant) => writeln!(
            md,
            "The most dominant tone in {}'s recent news is **{}**; overall coverage is {}.\n",
            report.company, dominant, report.conclusion
        )
        .unwrap(),
        None => writeln!(md, "Not enough coverage to determine a dominant tone.\n").unwrap(),
    }

    if !report.common_keywords.is_empty() {
        writeln!(md, "**Common headline keywords:** {}", report.common_keywords.join(", ")).unwrap();
    }

    md
}
