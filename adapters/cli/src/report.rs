//! Renders round reports and scenario errors into the output file body.

use clap::ValueEnum;
use insect_forage_core::InsectReport;

use crate::scenario::ScenarioError;

/// Layout of the output file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// One `<Color> <Kind> <Direction> <food>` line per insect.
    #[default]
    Text,
    /// A JSON array of report objects.
    Json,
}

/// Renders the reports in the requested format, newline-terminated.
pub(crate) fn render(
    reports: &[InsectReport],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let mut body = match format {
        OutputFormat::Text => reports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(reports)?,
    };
    body.push('\n');
    Ok(body)
}

/// Renders a rejected scenario as its single-line message.
pub(crate) fn render_error(error: &ScenarioError) -> String {
    format!("{error}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insect_forage_core::{Direction, InsectColor, InsectKind};

    fn reports() -> Vec<InsectReport> {
        vec![
            InsectReport {
                color: InsectColor::Red,
                kind: InsectKind::Grasshopper,
                direction: Direction::North,
                food_eaten: 10,
            },
            InsectReport {
                color: InsectColor::Yellow,
                kind: InsectKind::Spider,
                direction: Direction::SouthEast,
                food_eaten: 0,
            },
        ]
    }

    #[test]
    fn text_lists_one_line_per_insect() {
        let body = render(&reports(), OutputFormat::Text).expect("render");
        assert_eq!(body, "Red Grasshopper North 10\nYellow Spider South-East 0\n");
    }

    #[test]
    fn json_keeps_report_fields() {
        let body = render(&reports(), OutputFormat::Json).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("valid json");
        assert_eq!(parsed[1]["direction"], "South-East");
        assert_eq!(parsed[0]["kind"], "Grasshopper");
        assert_eq!(parsed[0]["food_eaten"], 10);
    }

    #[test]
    fn errors_render_as_message_line() {
        assert_eq!(
            render_error(&ScenarioError::BoardSize),
            "Invalid board size\n"
        );
    }
}
