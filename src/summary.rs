// Summary rendering - the multi-section session report
//
// Pure projection over session state: builds the report lines from the
// current event log and a freshly sampled DeviceInfo. The session writes
// the lines through its sink, so this module never touches a display
// surface itself.

use crate::device::DeviceInfo;
use crate::events::Event;
use crate::session::{self, Session};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display columns the DATA cell may occupy before truncation
const DATA_COLUMN_MAX: usize = 44;

/// Build the full report. Section order is part of the report's shape:
/// timing, aggregates, device descriptors, the ordered event list, the
/// name frequency table, then the aligned event table.
pub fn render(session: &Session, device: &DeviceInfo) -> Vec<String> {
    let now = Utc::now();
    let duration = session::duration_seconds(session.started_at(), now);
    let events = session.events();

    let mut lines = Vec::new();
    lines.push("=== SESSION ANALYTICS SUMMARY ===".to_string());
    lines.push(String::new());

    lines.push("SESSION INFO:".to_string());
    lines.push(format!("Duration: {duration:.2} seconds"));
    lines.push(format!(
        "Start Time: {}",
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("End Time: {}", now.format("%Y-%m-%d %H:%M:%S UTC")));
    lines.push(String::new());

    lines.push("USER METRICS:".to_string());
    lines.push(format!("Max Scroll Depth: {}%", session.max_scroll_depth()));
    lines.push(format!("Form Interactions: {}", session.form_interactions()));
    lines.push(format!("Total Events Tracked: {}", events.len()));
    lines.push(format!("Viewport Size: {}", device.viewport));
    lines.push(String::new());

    lines.push("BROWSER INFO:".to_string());
    lines.push(format!("User Agent: {}", device.user_agent));
    lines.push(format!("Locale: {}", device.locale));
    lines.push(format!("Platform: {}", device.platform));
    lines.push(String::new());

    lines.push("EVENTS TRACKED:".to_string());
    for (index, event) in events.iter().enumerate() {
        lines.push(format!(
            "{}. {} - {} {}",
            index + 1,
            event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            event.name,
            Value::Object(event.data.clone())
        ));
    }
    lines.push(String::new());

    lines.push("EVENT COUNTS:".to_string());
    for (name, count) in event_counts(events) {
        lines.push(format!("{name}: {count}"));
    }
    lines.push(String::new());

    lines.push("FULL EVENT LOG:".to_string());
    lines.extend(render_event_table(events));
    lines.push(String::new());
    lines.push("======================================".to_string());
    lines
}

/// Occurrence count per distinct event name, single pass, first-seen order
pub fn event_counts(events: &[Event]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for event in events {
        match counts.iter_mut().find(|(name, _)| name == &event.name) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.name.clone(), 1)),
        }
    }
    counts
}

fn render_event_table(events: &[Event]) -> Vec<String> {
    if events.is_empty() {
        return vec!["(no events)".to_string()];
    }

    let header = [
        "#".to_string(),
        "TIMESTAMP".to_string(),
        "EVENT".to_string(),
        "DATA".to_string(),
    ];
    let rows: Vec<[String; 4]> = events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            [
                (index + 1).to_string(),
                event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                event.name.clone(),
                truncate_cell(&Value::Object(event.data.clone()).to_string(), DATA_COLUMN_MAX),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
    for row in &rows {
        for (column, cell) in row.iter().enumerate() {
            widths[column] = widths[column].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&header, &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
    lines
}

fn format_row(cells: &[String; 4], widths: &[usize]) -> String {
    let mut line = String::new();
    for (column, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if column < cells.len() - 1 {
            let pad = widths[column].saturating_sub(cell.width());
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    line
}

/// Truncate to at most `max_width` display columns, respecting character
/// boundaries and double-width glyphs. Truncated cells end in "...".
fn truncate_cell(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}
