//! Voice, personality and generic listing panels.
//!
//! Each renderer turns a list of entities into a complete, copy-pasteable
//! terminal panel. Empty input is a normal case: it produces a guidance panel
//! with a caution border and one command that would populate the list.

use std::cmp::Ordering;

use crossterm::style::Color;

use crate::render::columns::{layout_columns, DisplayItem, LayoutConfig, DEFAULT_COLUMNS};
use crate::render::panel::{render_panel, PanelConfig};
use crate::render::theme::Theme;

/// Name of the synthetic personality meaning "pick one at use time".
pub const RANDOM_PERSONALITY: &str = "random";
/// Description shown for [`RANDOM_PERSONALITY`].
pub const RANDOM_DESCRIPTION: &str = "Picks randomly each time";
/// Personality cells are wider to fit their free-text descriptions.
pub const PERSONALITY_COLUMN_WIDTH: usize = 40;

const FOOTER_RULE_WIDTH: usize = 60;

/// A TTS voice as discovered on disk or reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEntry {
    pub name: String,
    /// Language tag such as `en_US`; empty when unknown.
    pub language: String,
}

impl VoiceEntry {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }
}

/// A personality definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityEntry {
    pub name: String,
    pub description: String,
}

impl PersonalityEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The `random` sentinel entry.
    pub fn random() -> Self {
        Self::new(RANDOM_PERSONALITY, RANDOM_DESCRIPTION)
    }
}

#[derive(Debug, Clone)]
pub struct VoicesOptions {
    /// Provider name shown in bold above the list.
    pub provider: String,
    pub title: String,
    pub columns: usize,
    pub show_usage: bool,
}

impl Default for VoicesOptions {
    fn default() -> Self {
        Self {
            provider: "Piper TTS".to_string(),
            title: "🎤 Available Voices".to_string(),
            columns: DEFAULT_COLUMNS,
            show_usage: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersonalitiesOptions {
    pub title: String,
    pub columns: usize,
    pub show_usage: bool,
}

impl Default for PersonalitiesOptions {
    fn default() -> Self {
        Self {
            title: "🎭 Available Personalities".to_string(),
            columns: DEFAULT_COLUMNS,
            show_usage: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub title: String,
    /// Prepended to the title when present.
    pub icon: Option<String>,
    pub columns: usize,
    pub border_color: Color,
    /// Show the item count in the title and a `Total:` line in the body.
    pub show_count: bool,
    /// Command suggested by the guidance panel when there are no items.
    pub empty_command: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            title: "Items".to_string(),
            icon: Some("📋".to_string()),
            columns: DEFAULT_COLUMNS,
            border_color: Color::DarkBlue,
            show_count: true,
            empty_command: "/agent-vibes:list".to_string(),
        }
    }
}

/// Sort voices lexicographically by name.
pub fn sort_voices(voices: &mut [VoiceEntry]) {
    voices.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Sort personalities lexicographically by name, `random` always last.
pub fn sort_personalities(personalities: &mut [PersonalityEntry]) {
    personalities.sort_by(|a, b| {
        match (
            a.name == RANDOM_PERSONALITY,
            b.name == RANDOM_PERSONALITY,
        ) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.name.cmp(&b.name),
        }
    });
}

fn is_current(name: &str, current: Option<&str>) -> bool {
    current.is_some_and(|c| c == name)
}

/// Render the voice listing panel.
///
/// `current` marks the voice whose name matches exactly.
pub fn render_voices(
    voices: &[VoiceEntry],
    current: Option<&str>,
    options: &VoicesOptions,
    theme: &Theme,
) -> String {
    if voices.is_empty() {
        return guidance_panel(
            "No voices found",
            "Download voices with:",
            "/agent-vibes:provider download <voice-name>",
            &theme.bold(&options.title),
            theme,
        );
    }

    let mut sorted = voices.to_vec();
    sort_voices(&mut sorted);
    let items: Vec<DisplayItem> = sorted
        .into_iter()
        .map(|v| {
            let current = is_current(&v.name, current);
            DisplayItem::new(v.name)
                .with_description(v.language)
                .current(current)
        })
        .collect();

    let layout = LayoutConfig::default().with_columns(options.columns);
    let mut content = format!("{}\n\n", theme.bold(&options.provider));
    content.push_str(&layout_columns(&items, &layout, theme));

    if options.show_usage {
        content.push_str(&usage_footer(
            &[
                ("Switch voice: ", "/agent-vibes:switch <voice-name>"),
                ("Preview voice: ", "/agent-vibes:preview <voice-name>"),
            ],
            theme,
        ));
    }

    render_panel(
        &content,
        &PanelConfig::titled(theme.bold(&options.title)).with_border_color(theme.voices_border),
        theme,
    )
}

/// Render the personality listing panel.
///
/// Callers normally include [`PersonalityEntry::random`]; it is sorted last.
pub fn render_personalities(
    personalities: &[PersonalityEntry],
    current: Option<&str>,
    options: &PersonalitiesOptions,
    theme: &Theme,
) -> String {
    if personalities.is_empty() {
        return guidance_panel(
            "No personalities found",
            "Add a personality with:",
            "/agent-vibes:personality add <name>",
            &theme.bold(&options.title),
            theme,
        );
    }

    let mut sorted = personalities.to_vec();
    sort_personalities(&mut sorted);
    let items: Vec<DisplayItem> = sorted
        .into_iter()
        .map(|p| {
            let current = is_current(&p.name, current);
            DisplayItem::new(p.name)
                .with_description(p.description)
                .current(current)
        })
        .collect();

    let layout = LayoutConfig::default()
        .with_columns(options.columns)
        .with_column_width(PERSONALITY_COLUMN_WIDTH);
    let mut content = layout_columns(&items, &layout, theme);

    if options.show_usage {
        content.push_str(&usage_footer(
            &[
                ("Set personality: ", "/agent-vibes:personality <name>"),
                ("Add personality: ", "/agent-vibes:personality add <name>"),
                ("Edit personality: ", "/agent-vibes:personality edit <name>"),
            ],
            theme,
        ));
    }

    render_panel(
        &content,
        &PanelConfig::titled(theme.bold(&options.title))
            .with_border_color(theme.personalities_border),
        theme,
    )
}

/// Render a generic listing panel in caller order.
pub fn render_list(items: &[DisplayItem], options: &ListOptions, theme: &Theme) -> String {
    let title_text = match options.icon.as_deref().filter(|i| !i.is_empty()) {
        Some(icon) => format!("{icon} {}", options.title),
        None => options.title.clone(),
    };
    let mut title = theme.bold(&title_text);
    if options.show_count {
        title.push_str(&theme.muted(&format!(" ({})", items.len())));
    }

    if items.is_empty() {
        return guidance_panel(
            "No items found",
            "Add items with:",
            &options.empty_command,
            &title,
            theme,
        );
    }

    let mut content = String::new();
    if options.show_count {
        content.push_str(&theme.bold(&format!("Total: {} items", items.len())));
        content.push_str("\n\n");
    }
    let layout = LayoutConfig::default().with_columns(options.columns);
    content.push_str(&layout_columns(items, &layout, theme));

    render_panel(
        &content,
        &PanelConfig::titled(title).with_border_color(options.border_color),
        theme,
    )
}

fn guidance_panel(message: &str, hint: &str, command: &str, title: &str, theme: &Theme) -> String {
    let content = format!(
        "{}\n\n{}\n{}",
        theme.warning(message),
        theme.muted(hint),
        theme.command(&format!("  {command}"))
    );
    render_panel(
        &content,
        &PanelConfig::titled(title).with_border_color(theme.caution_border),
        theme,
    )
}

fn usage_footer(commands: &[(&str, &str)], theme: &Theme) -> String {
    let rule: String = "─".repeat(FOOTER_RULE_WIDTH);
    let lines: Vec<String> = commands
        .iter()
        .map(|(label, command)| format!("{}{}", theme.dim(label), theme.command(command)))
        .collect();
    format!("\n\n{}\n{}", theme.muted(&rule), lines.join("\n"))
}
