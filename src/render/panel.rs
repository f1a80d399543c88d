//! Bordered, titled panels.
//!
//! A panel draws a box-drawing border around multi-line content that may
//! already contain styling sequences. Widths are measured with
//! [`visible_width`] so borders line up regardless of embedded styling.
//!
//! ```text
//!
//!    ╭──────── 🎤 Available Voices ────────╮
//!    │                                     │
//!    │   Piper TTS                         │
//!    │                                     │
//!    │     en_GB-alan en_GB                │
//!    │                                     │
//!    ╰─────────────────────────────────────╯
//!
//! ```

use crossterm::style::Color;

use crate::render::measure::{padding_for, visible_width};
use crate::render::theme::Theme;

/// Characters used to draw a panel border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

/// Rounded corners (`╭╮╰╯`).
pub const BORDER_ROUND: BorderSet = BorderSet {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '─',
    vertical: '│',
};

pub const BORDER_SINGLE: BorderSet = BorderSet {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

pub const BORDER_DOUBLE: BorderSet = BorderSet {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

pub const BORDER_BOLD: BorderSet = BorderSet {
    top_left: '┏',
    top_right: '┓',
    bottom_left: '┗',
    bottom_right: '┛',
    horizontal: '━',
    vertical: '┃',
};

/// Named border styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Round,
    Single,
    Double,
    Bold,
}

impl BorderStyle {
    pub fn border_set(self) -> BorderSet {
        match self {
            BorderStyle::Round => BORDER_ROUND,
            BorderStyle::Single => BORDER_SINGLE,
            BorderStyle::Double => BORDER_DOUBLE,
            BorderStyle::Bold => BORDER_BOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Cosmetic panel options.
///
/// `padding` and `margin` count lines vertically and triple horizontally, so a
/// padding of 1 leaves one blank line above and below the content and three
/// spaces on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Title text, possibly styled. Embedded in the top border.
    pub title: Option<String>,
    pub title_alignment: TitleAlignment,
    pub border_style: BorderStyle,
    pub border_color: Option<Color>,
    pub padding: usize,
    pub margin: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: None,
            title_alignment: TitleAlignment::Center,
            border_style: BorderStyle::Round,
            border_color: None,
            padding: 1,
            margin: 1,
        }
    }
}

impl PanelConfig {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }
}

/// Wrap `content` in a bordered panel.
///
/// Every content line is emitted unchanged between the vertical borders and
/// right-filled with spaces to the widest line. The box widens when the title
/// is wider than the content.
pub fn render_panel(content: &str, config: &PanelConfig, theme: &Theme) -> String {
    let borders = config.border_style.border_set();
    let pad_x = config.padding * 3;
    let margin_left = " ".repeat(config.margin * 3);

    let lines: Vec<&str> = content.split('\n').collect();
    let content_width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);

    let title = config.title.as_deref().filter(|t| !t.is_empty());
    let title_width = title.map_or(0, |t| visible_width(t) + 2);
    let inner_width = (content_width + pad_x * 2).max(title_width);

    let paint_border = |text: &str| match config.border_color {
        Some(color) => theme.fg(text, color),
        None => text.to_string(),
    };
    let vertical = paint_border(&borders.vertical.to_string());
    let blank_row = format!(
        "{margin_left}{vertical}{}{vertical}",
        " ".repeat(inner_width)
    );

    let mut out: Vec<String> = Vec::new();
    out.extend(std::iter::repeat_n(String::new(), config.margin));
    out.push(format!(
        "{margin_left}{}",
        top_border(&borders, title, title_width, inner_width, config, &paint_border)
    ));
    out.extend(std::iter::repeat_n(blank_row.clone(), config.padding));

    for line in &lines {
        let fill = padding_for(visible_width(line) + pad_x, inner_width);
        out.push(format!(
            "{margin_left}{vertical}{}{line}{}{vertical}",
            " ".repeat(pad_x),
            " ".repeat(fill)
        ));
    }

    out.extend(std::iter::repeat_n(blank_row, config.padding));
    let bottom: String = std::iter::repeat_n(borders.horizontal, inner_width).collect();
    out.push(format!(
        "{margin_left}{}",
        paint_border(&format!(
            "{}{bottom}{}",
            borders.bottom_left, borders.bottom_right
        ))
    ));
    out.extend(std::iter::repeat_n(String::new(), config.margin));

    out.join("\n")
}

fn top_border(
    borders: &BorderSet,
    title: Option<&str>,
    title_width: usize,
    inner_width: usize,
    config: &PanelConfig,
    paint_border: &dyn Fn(&str) -> String,
) -> String {
    let rule = |n: usize| -> String { std::iter::repeat_n(borders.horizontal, n).collect() };

    let Some(title) = title else {
        return paint_border(&format!(
            "{}{}{}",
            borders.top_left,
            rule(inner_width),
            borders.top_right
        ));
    };

    let remaining = inner_width - title_width;
    let (left, right) = match config.title_alignment {
        TitleAlignment::Left => (0, remaining),
        TitleAlignment::Center => (remaining / 2, remaining - remaining / 2),
        TitleAlignment::Right => (remaining, 0),
    };

    format!(
        "{} {title} {}",
        paint_border(&format!("{}{}", borders.top_left, rule(left))),
        paint_border(&format!("{}{}", rule(right), borders.top_right)),
    )
}
