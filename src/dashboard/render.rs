use chrono::{DateTime, Local, Utc};

use super::state::CheckState;
use crate::types::HealthReport;

/// Render seconds as `"{h}h {m}m {s}s"`, flooring each component.
pub fn format_uptime(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}h {}m {}s", hours, minutes, secs)
}

/// Render a timestamp in the viewer's local time zone.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}

/// Known statuses render as-is; anything else is flagged.
fn render_status(report: &HealthReport) -> String {
    match report.health_status() {
        Some(status) => status.to_string(),
        None if report.status.is_empty() => "unknown".to_string(),
        None => format!("{} (unrecognized)", report.status),
    }
}

fn render_report(report: &HealthReport) -> String {
    format!(
        "Status:      {}\nTimestamp:   {}\nUptime:      {}\nMessage:     {}\nEnvironment: {}",
        render_status(report),
        format_timestamp(&report.timestamp),
        format_uptime(report.uptime),
        report.message,
        report.environment
    )
}

/// Text shown for a dashboard state
pub fn render(state: &CheckState) -> String {
    match state {
        CheckState::Idle => "Press Enter to check backend health, q to quit.".to_string(),
        CheckState::Loading { previous: None } => "Checking...".to_string(),
        CheckState::Loading { previous: Some(report) } => {
            format!("Checking...\n{}", render_report(report))
        }
        CheckState::Success(report) => render_report(report),
        CheckState::Failure(err) => format!("Error: {}", err),
    }
}
