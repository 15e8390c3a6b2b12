// src/report.rs
// =============================================================================
// Turns a CrawlResult into something a person (or a script) can read.
//
// Two formats:
// - JSON: the result map as-is, for piping into other tools
// - Table: one row per page, shallowest pages first, plus a summary
//
// Both write to any `io::Write` so they can be tested without a terminal.
// =============================================================================

use std::io::{self, Write};

use crate::crawl::{CrawlResult, PageRecord};

pub fn write_json<W: Write>(out: &mut W, result: &CrawlResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

pub fn write_table<W: Write>(out: &mut W, result: &CrawlResult) -> io::Result<()> {
    writeln!(out, "{:<6} {:<60} {:<7} {:<30}", "DEPTH", "URL", "LINKS", "STATUS")?;
    writeln!(out, "{}", "=".repeat(106))?;

    let mut records: Vec<&PageRecord> = result.records().collect();
    records.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.url.cmp(&b.url)));

    for record in records {
        writeln!(
            out,
            "{:<6} {:<60} {:<7} {:<30}",
            record.depth,
            truncate(&record.url, 57),
            record.outbound_links.len(),
            format_status(record)
        )?;
    }

    writeln!(out)?;

    let failed = result.error_count();
    writeln!(out, "Summary:")?;
    writeln!(out, "   Fetched: {}", result.len() - failed)?;
    writeln!(out, "   Failed: {}", failed)?;
    writeln!(out, "   Total pages: {}", result.len())?;
    Ok(())
}

fn format_status(record: &PageRecord) -> String {
    match &record.fetch_error {
        None => "OK".to_string(),
        Some(error) => format!("ERROR ({})", error),
    }
}

// Shortens long URLs so the table columns stay aligned
fn truncate(url: &str, max: usize) -> String {
    if url.chars().count() > max {
        let head: String = url.chars().take(max).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
