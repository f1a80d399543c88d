//! Multi-column packing of [`DisplayItem`]s.

use crate::render::measure::{padding_for, visible_width};
use crate::render::theme::Theme;

/// A single cell in a columned listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    /// Secondary text shown after the name; empty means none.
    pub description: String,
    pub is_current: bool,
}

impl DisplayItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn current(mut self, is_current: bool) -> Self {
        self.is_current = is_current;
        self
    }
}

impl From<&str> for DisplayItem {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DisplayItem {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Default number of items per row.
pub const DEFAULT_COLUMNS: usize = 2;
/// Default visible width of each cell.
pub const DEFAULT_COLUMN_WIDTH: usize = 35;
/// Cells are joined with this separator.
const CELL_SEPARATOR: &str = "  ";

/// How items are packed into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub columns: usize,
    pub column_width: usize,
    pub highlight_char: String,
    pub indent: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            column_width: DEFAULT_COLUMN_WIDTH,
            highlight_char: "▶".to_string(),
            indent: "  ".to_string(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_column_width(mut self, column_width: usize) -> Self {
        self.column_width = column_width;
        self
    }
}

/// Lay `items` out in rows of `config.columns` cells.
///
/// Rows are filled left-to-right, top-to-bottom in input order; the last row
/// may hold fewer cells. Each cell is padded to `config.column_width` visible
/// columns, measured on the unstyled label so styling never skews alignment.
/// A column count of zero is treated as one.
pub fn layout_columns(items: &[DisplayItem], config: &LayoutConfig, theme: &Theme) -> String {
    let per_row = config.columns.max(1);

    items
        .chunks(per_row)
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|item| format_cell(item, config, theme))
                .collect();
            format!("{}{}", config.indent, cells.join(CELL_SEPARATOR))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The label of `item` before any styling is applied.
pub fn unstyled_label(item: &DisplayItem, config: &LayoutConfig) -> String {
    let mut label = name_prefix(item, config);
    if !item.description.is_empty() {
        label.push(' ');
        label.push_str(&item.description);
    }
    label
}

fn name_prefix(item: &DisplayItem, config: &LayoutConfig) -> String {
    if item.is_current {
        format!("{} {}", config.highlight_char, item.name)
    } else {
        format!("  {}", item.name)
    }
}

fn format_cell(item: &DisplayItem, config: &LayoutConfig, theme: &Theme) -> String {
    let prefix = name_prefix(item, config);

    let styled = if !item.description.is_empty() {
        format!(
            "{}{}",
            theme.emphasis(&prefix),
            theme.muted(&format!(" {}", item.description))
        )
    } else if item.is_current {
        theme.emphasis(&prefix)
    } else {
        prefix
    };

    let padding = padding_for(visible_width(&unstyled_label(item, config)), config.column_width);
    format!("{}{}", styled, " ".repeat(padding))
}
