//! Table output formatting for CLI commands
//!
//! Provides formatted table output for pending batches, applied records,
//! and statistics using comfy-table, with color-coded status cells.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{AppliedBatch, Batch, SuggestionStatus};
use crate::services::UpdateStatistics;

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format pending batches with their suggestions as a table.
    pub fn format_pending(&self, batches: &[Batch]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Batch").add_attribute(Attribute::Bold),
            Cell::new("Suggestion").add_attribute(Attribute::Bold),
            Cell::new("Section").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Reasoning").add_attribute(Attribute::Bold),
        ]);

        for batch in batches {
            for suggestion in &batch.suggestions {
                table.add_row(vec![
                    Cell::new(&batch.batch_id),
                    Cell::new(&suggestion.suggestion_id),
                    Cell::new(truncate(&suggestion.section_title, 30)),
                    self.status_cell(suggestion.status),
                    Cell::new(format!("{:.2}", suggestion.confidence_score)),
                    Cell::new(truncate(&suggestion.reasoning, 40)),
                ]);
            }
        }

        table.to_string()
    }

    /// Format applied records as a table.
    pub fn format_applied(&self, batches: &[AppliedBatch]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Batch").add_attribute(Attribute::Bold),
            Cell::new("Suggestion").add_attribute(Attribute::Bold),
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Applied At").add_attribute(Attribute::Bold),
        ]);

        for batch in batches {
            for suggestion in &batch.suggestions {
                let file = suggestion
                    .file_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(&batch.batch_id),
                    Cell::new(&suggestion.suggestion_id),
                    Cell::new(truncate(&file, 40)),
                    self.status_cell(suggestion.status),
                    Cell::new(batch.applied_at.format("%Y-%m-%d %H:%M:%S").to_string()),
                ]);
            }
        }

        table.to_string()
    }

    /// Format update statistics as a two-column table.
    pub fn format_statistics(&self, stats: &UpdateStatistics) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Pending batches"),
            Cell::new(stats.pending_batches),
        ]);
        table.add_row(vec![
            Cell::new("Pending suggestions"),
            Cell::new(stats.pending_suggestions),
        ]);
        table.add_row(vec![
            Cell::new("Applied batches"),
            Cell::new(stats.applied_batches),
        ]);
        table.add_row(vec![
            Cell::new("Applied suggestions"),
            Cell::new(stats.applied_suggestions),
        ]);
        table.add_row(vec![
            Cell::new("Total suggestions"),
            Cell::new(stats.total_suggestions),
        ]);
        table.to_string()
    }

    fn status_cell(&self, status: SuggestionStatus) -> Cell {
        if self.use_colors {
            Cell::new(status.as_str()).fg(status_color(status))
        } else {
            Cell::new(format!("{} {}", status_icon(status), status))
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map suggestion status to color
fn status_color(status: SuggestionStatus) -> Color {
    match status {
        SuggestionStatus::Pending => Color::White,
        SuggestionStatus::Approved => Color::Cyan,
        SuggestionStatus::Rejected => Color::DarkGrey,
        SuggestionStatus::SuccessfullyApplied => Color::Green,
        SuggestionStatus::Failed => Color::Red,
        SuggestionStatus::Reverted => Color::Yellow,
    }
}

/// Map suggestion status to icon
fn status_icon(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Pending => "○",
        SuggestionStatus::Approved => "●",
        SuggestionStatus::Rejected => "⊘",
        SuggestionStatus::SuccessfullyApplied => "✓",
        SuggestionStatus::Failed => "✗",
        SuggestionStatus::Reverted => "↩",
    }
}
