//! Output formatting utilities

use colored::*;
use serde::Serialize;
use thing_registry_client::{RegistryOutcome, UpdateOutcome};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Serializable view of a single registry answer
#[derive(Debug, Serialize)]
struct OutcomeView<'a> {
    status: u16,
    success: bool,
    body: serde_json::Value,
    #[serde(skip)]
    raw: &'a str,
}

impl<'a> From<&'a RegistryOutcome> for OutcomeView<'a> {
    fn from(outcome: &'a RegistryOutcome) -> Self {
        let raw = outcome.body();
        let body = if raw.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
        };

        Self {
            status: outcome.status().as_u16(),
            success: outcome.is_success(),
            body,
            raw,
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateView<'a> {
    success: bool,
    partial_failure: bool,
    delete: OutcomeView<'a>,
    create: OutcomeView<'a>,
}

/// Render one registry answer
pub fn render_outcome(action: &str, outcome: &RegistryOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => status_line(action, outcome),
        OutputFormat::Json => to_json(&OutcomeView::from(outcome)),
    }
}

/// Render both steps of an update
pub fn render_update(outcome: &UpdateOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut text = format!(
                "{}\n{}",
                status_line("delete", &outcome.delete),
                status_line("create", &outcome.create)
            );
            if outcome.is_partial_failure() {
                text.push_str(&format!(
                    "\n{} thing was deleted but not recreated",
                    "⚠".yellow()
                ));
            }
            text
        }
        OutputFormat::Json => to_json(&UpdateView {
            success: outcome.is_success(),
            partial_failure: outcome.is_partial_failure(),
            delete: OutcomeView::from(&outcome.delete),
            create: OutcomeView::from(&outcome.create),
        }),
    }
}

fn status_line(action: &str, outcome: &RegistryOutcome) -> String {
    let view = OutcomeView::from(outcome);
    let marker = if view.success {
        "✓".green()
    } else {
        "✗".red()
    };

    let mut line = format!("{} {} {}", marker, action, outcome.status());
    if !view.raw.is_empty() {
        line.push_str(&format!("\n{}", view.raw.dimmed()));
    }
    line
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use thing_registry_client::StatusCode;

    #[test]
    fn test_text_output() {
        colored::control::set_override(false);
        let outcome = RegistryOutcome::from_parts(StatusCode::CREATED, "");
        assert_eq!(
            render_outcome("create", &outcome, OutputFormat::Text),
            "✓ create 201 Created"
        );

        let outcome = RegistryOutcome::from_parts(StatusCode::NOT_FOUND, "no such thing");
        assert_eq!(
            render_outcome("delete", &outcome, OutputFormat::Text),
            "✗ delete 404 Not Found\nno such thing"
        );
    }

    #[test]
    fn test_json_output_parses_body() {
        let outcome = RegistryOutcome::from_parts(StatusCode::CREATED, r#"{"id":"x"}"#);
        let rendered = render_outcome("create", &outcome, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["status"], 201);
        assert_eq!(value["success"], true);
        assert_eq!(value["body"]["id"], "x");
    }

    #[test]
    fn test_update_json_output() {
        let outcome = UpdateOutcome {
            delete: RegistryOutcome::from_parts(StatusCode::NO_CONTENT, ""),
            create: RegistryOutcome::from_parts(StatusCode::BAD_REQUEST, "bad"),
        };
        let value: serde_json::Value =
            serde_json::from_str(&render_update(&outcome, OutputFormat::Json)).unwrap();

        assert_eq!(value["partial_failure"], true);
        assert_eq!(value["delete"]["body"], serde_json::Value::Null);
        assert_eq!(value["create"]["body"], "bad");
    }
}
