//! # Theme System
//!
//! Semantic color roles for every listing panel.
//!
//! ## Overview
//!
//! Rendering code never hardcodes a color. It asks the active [`Theme`] to
//! paint text in a role (`emphasis`, `muted`, `warning`, ...) and the theme
//! turns that into terminal styling sequences via `crossterm`.
//!
//! ## Built-in Themes
//!
//! - **Classic** (default) - the standard 8-color ANSI palette: cyan names,
//!   gray descriptions, cyan voice borders, magenta personality borders
//! - **Catppuccin Mocha** - warm, dark pastel truecolor palette
//! - **Plain** - emits no styling sequences at all (pipes, `--no-color`)

use crossterm::style::{Color, ContentStyle, Stylize};

/// All colors used by the listing panels, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, matched case-insensitively by [`Theme::by_name`].
    pub name: &'static str,
    /// When false, every paint call returns its input unchanged.
    pub styled: bool,

    /// Item names that carry a description or are the current selection.
    pub emphasis: Color,
    /// Descriptions, rules and hint text.
    pub muted: Color,
    /// Example commands shown in footers and guidance panels.
    pub command: Color,
    /// "Nothing found" messages.
    pub warning: Color,

    // -- Panel borders --
    pub voices_border: Color,
    pub personalities_border: Color,
    /// Border of guidance panels shown for empty listings.
    pub caution_border: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Classic).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Return the theme that never emits styling sequences.
    pub fn plain() -> &'static Theme {
        &BUILT_IN_THEMES[2]
    }

    /// Paint `text` in the given foreground color.
    pub fn fg(&self, text: &str, color: Color) -> String {
        self.apply(text, ContentStyle::new().with(color))
    }

    pub fn emphasis(&self, text: &str) -> String {
        self.fg(text, self.emphasis)
    }

    pub fn muted(&self, text: &str) -> String {
        self.fg(text, self.muted)
    }

    pub fn command(&self, text: &str) -> String {
        self.fg(text, self.command)
    }

    pub fn warning(&self, text: &str) -> String {
        self.fg(text, self.warning)
    }

    pub fn bold(&self, text: &str) -> String {
        self.apply(text, ContentStyle::new().bold())
    }

    pub fn dim(&self, text: &str) -> String {
        self.apply(text, ContentStyle::new().dim())
    }

    fn apply(&self, text: &str, style: ContentStyle) -> String {
        if !self.styled || text.is_empty() {
            return text.to_string();
        }
        style.apply(text).to_string()
    }
}

/// Parse a color name the way terminal styling libraries spell them.
///
/// Accepts the eight base names (`"blue"`, `"magenta"`, ...), their bright
/// variants (`"blueBright"`, `"bright_blue"`), `"gray"`/`"grey"` and
/// `#rrggbb` hex triplets. Base names map to the standard (non-bright) ANSI
/// colors.
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = name.to_ascii_lowercase();
    let (base, bright) = if let Some(base) = lower.strip_suffix("bright") {
        (base.trim_end_matches(['_', '-']), true)
    } else if let Some(base) = lower.strip_prefix("bright") {
        (base.trim_start_matches(['_', '-']), true)
    } else {
        (lower.as_str(), false)
    };

    let color = match (base, bright) {
        ("black", false) => Color::Black,
        ("black", true) | ("gray" | "grey", _) => Color::DarkGrey,
        ("red", false) => Color::DarkRed,
        ("red", true) => Color::Red,
        ("green", false) => Color::DarkGreen,
        ("green", true) => Color::Green,
        ("yellow", false) => Color::DarkYellow,
        ("yellow", true) => Color::Yellow,
        ("blue", false) => Color::DarkBlue,
        ("blue", true) => Color::Blue,
        ("magenta", false) => Color::DarkMagenta,
        ("magenta", true) => Color::Magenta,
        ("cyan", false) => Color::DarkCyan,
        ("cyan", true) => Color::Cyan,
        ("white", false) => Color::Grey,
        ("white", true) => Color::White,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 3] = [
    // 0 - Classic (default)
    Theme {
        name: "Classic",
        styled: true,
        emphasis: Color::DarkCyan,
        muted: Color::DarkGrey,
        command: Color::DarkCyan,
        warning: Color::DarkYellow,
        voices_border: Color::DarkCyan,
        personalities_border: Color::DarkMagenta,
        caution_border: Color::DarkYellow,
    },
    // 1 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        styled: true,
        emphasis: Color::Rgb { r: 137, g: 220, b: 235 }, // sky
        muted: Color::Rgb { r: 108, g: 112, b: 134 },    // overlay0
        command: Color::Rgb { r: 137, g: 220, b: 235 },  // sky
        warning: Color::Rgb { r: 249, g: 226, b: 175 },  // yellow
        voices_border: Color::Rgb { r: 116, g: 199, b: 236 }, // sapphire
        personalities_border: Color::Rgb { r: 203, g: 166, b: 247 }, // mauve
        caution_border: Color::Rgb { r: 249, g: 226, b: 175 }, // yellow
    },
    // 2 - Plain
    Theme {
        name: "Plain",
        styled: false,
        emphasis: Color::Reset,
        muted: Color::Reset,
        command: Color::Reset,
        warning: Color::Reset,
        voices_border: Color::Reset,
        personalities_border: Color::Reset,
        caution_border: Color::Reset,
    },
];
