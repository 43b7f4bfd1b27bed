//! Output formatting: table and JSON.
//!
//! Table mode renders the snapshot section by section with `tabled`;
//! JSON mode serializes the snapshot together with the active status
//! messages into one document.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{Table, Tabled, settings::Style};

use grayscope_core::{Severity, StatusMessage, TrafficSnapshot};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Print a snapshot and the session's active status messages.
pub fn print_snapshot(
    format: OutputFormat,
    snapshot: &TrafficSnapshot,
    status: &[StatusMessage],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "snapshot": snapshot,
                "status": status,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Table => print_tables(snapshot, status),
    }
    Ok(())
}

fn print_tables(snapshot: &TrafficSnapshot, status: &[StatusMessage]) {
    let mut out = io::stdout().lock();
    let color = io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err();

    for message in status {
        let line = format!("[{}] {}", message.severity, message.text);
        let rendered = if color {
            match message.severity {
                Severity::Success => line.green().to_string(),
                Severity::Error => line.red().to_string(),
                Severity::Info => line.blue().to_string(),
            }
        } else {
            line
        };
        let _ = writeln!(out, "{rendered}");
    }

    let _ = writeln!(out, "\nTraffic Source Distribution ({})", snapshot.origin);
    let source_rows: Vec<SourceRow> = snapshot
        .traffic_sources
        .iter()
        .map(|(category, share)| SourceRow {
            category: category.to_string(),
            share: format!("{share:.1}%"),
        })
        .collect();
    let _ = writeln!(out, "{}", render_table(&source_rows));

    let _ = writeln!(out, "\nTraffic Type Distribution");
    let type_rows: Vec<TypeRow> = snapshot
        .traffic_types
        .iter()
        .map(|(protocol, count)| TypeRow {
            protocol: protocol.to_string(),
            count: *count,
        })
        .collect();
    let _ = writeln!(out, "{}", render_table(&type_rows));

    let _ = writeln!(out, "\nTraffic Over Time ({} buckets)", snapshot.time_series.len());
    let series_rows: Vec<SeriesRow> = snapshot
        .time_series
        .iter()
        .map(|point| SeriesRow {
            bucket: point.bucket_start.format("%Y-%m-%d %H:%M").to_string(),
            total: point.total,
            blocked: point.blocked,
            allowed: point.allowed,
        })
        .collect();
    let _ = writeln!(out, "{}", render_table(&series_rows));

    let _ = writeln!(out, "\nSecurity Events");
    let security_rows: Vec<SecurityRow> = snapshot
        .security_events
        .iter()
        .map(|event| SecurityRow {
            timestamp: format_ts(event.timestamp),
            event_type: event.event_type.clone(),
            severity: event.severity.to_string(),
            source: event.source.clone(),
            status: event.status.to_string(),
        })
        .collect();
    let _ = writeln!(out, "{}", render_table(&security_rows));

    let _ = writeln!(out, "\nSystem Events");
    let system_rows: Vec<SystemRow> = snapshot
        .system_events
        .iter()
        .map(|event| SystemRow {
            timestamp: format_ts(event.timestamp),
            event_type: event.event_type.clone(),
            description: event.description.clone(),
            status: event.status.to_string(),
        })
        .collect();
    let _ = writeln!(out, "{}", render_table(&system_rows));
}

fn format_ts(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map_or_else(
        || "-".into(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Row types ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Count")]
    count: u64,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Blocked")]
    blocked: u64,
    #[tabled(rename = "Allowed")]
    allowed: u64,
}

#[derive(Tabled)]
struct SecurityRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct SystemRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: String,
}
