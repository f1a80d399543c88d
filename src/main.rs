//! # `agentvibes` CLI Entry Point
//!
//! Prints voice and personality listings as bordered multi-column panels.
//!
//! ## Usage
//!
//! ```bash
//! # Piper voices in a directory, highlighting the active one
//! agentvibes voices --dir ~/.claude/piper-voices --current en_US-lessac-medium
//!
//! # macOS system voices
//! agentvibes voices --provider macos --current Samantha
//!
//! # Personalities (defaults to ~/.claude/personalities, current "normal")
//! agentvibes personalities --current pirate
//!
//! # Any list, from arguments or stdin
//! ls ~/.claude/hooks | agentvibes list --title Hooks --icon 🪝 --border magenta
//!
//! # Debug mode - print discovered entities instead of a panel
//! agentvibes personalities --debug
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: `~/.config/agentvibes/config.json`, overridden by flags
//! 2. **Discovery**: scan a directory or ask `say` for the entities
//! 3. **Rendering**: sort, lay out in columns, wrap in a panel
//! 4. **Output**: the panel is written to stdout, diagnostics to stderr
//!
//! ## Signals
//!
//! Ctrl-C / SIGTERM cancel any running subprocess and exit with status 130 /
//! 143.

use agentvibes::config::Config;
use agentvibes::discovery::{self, CancelToken, Cancellation, CommandError};
use agentvibes::render::theme::parse_color;
use agentvibes::render::{
    self, DisplayItem, ListOptions, PersonalitiesOptions, Theme, VoicesOptions,
};
use agentvibes::telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Color;
use std::env;
use std::ffi::OsStr;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

/// Any non-empty value disables styling, whatever it says.
const NO_COLOR_ENV: &str = "NO_COLOR";

/// Command-line arguments for `agentvibes`
#[derive(Parser, Debug)]
#[command(name = "agentvibes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Beautiful multi-column listings of voices and personalities", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Items per row (overrides the config file)
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    columns: Option<u16>,

    /// Hide the footer of example commands
    #[arg(long, global = true)]
    no_usage: bool,

    /// Color theme (overrides the config file)
    #[arg(long, global = true, value_name = "NAME")]
    theme: Option<String>,

    /// Disable all colors and styling (also set by a non-empty `NO_COLOR`)
    #[arg(long, global = true)]
    no_color: bool,

    /// Print discovered entities instead of rendering a panel
    #[arg(long, global = true)]
    debug: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available voices
    Voices {
        /// Where the voices come from
        #[arg(long, value_enum, default_value_t = Provider::Piper)]
        provider: Provider,

        /// Name of the active voice
        #[arg(long, value_name = "VOICE")]
        current: Option<String>,

        /// Directory containing Piper `.onnx` models
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// List available personalities
    Personalities {
        /// Directory containing personality `.md` files
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Name of the active personality
        #[arg(long, value_name = "NAME", default_value = "normal")]
        current: String,
    },
    /// List arbitrary items (read from stdin when none are given)
    List {
        /// Panel title
        #[arg(long, default_value = "Items")]
        title: String,

        /// Icon shown before the title (empty for none)
        #[arg(long, default_value = "📋")]
        icon: String,

        /// Border color (e.g. blue, magentaBright, #ff8800)
        #[arg(long, value_name = "COLOR", default_value = "blue", value_parser = parse_border_color)]
        border: Color,

        /// Hide the item count
        #[arg(long)]
        no_count: bool,

        /// Items to list
        items: Vec<String>,
    },
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the config file location and contents
    Show,
    /// List the built-in themes
    Themes,
    /// Persist the theme used by default
    SetTheme {
        /// Theme name (case-insensitive)
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    /// Piper models in a directory
    Piper,
    /// macOS `say` voices
    Macos,
}

impl Provider {
    fn display_name(self) -> &'static str {
        match self {
            Provider::Piper => "Piper TTS",
            Provider::Macos => "macOS TTS",
        }
    }
}

fn parse_border_color(value: &str) -> Result<Color, String> {
    parse_color(value).ok_or_else(|| format!("unknown color '{value}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose, args.log_json);

    let cancellation = Cancellation::new();
    let token = cancellation.token();
    tokio::spawn(async move {
        let signal = discovery::shutdown_signal().await;
        tracing::info!(%signal, "shutdown requested");
        cancellation.cancel(signal);
    });

    let result = run_application(args, &token).await;

    if let Err(err) = &result {
        if let Some(CommandError::Cancelled { signal, .. }) = err.downcast_ref::<CommandError>() {
            eprintln!("Cancelled by {signal}");
            std::process::exit(signal.exit_code());
        }
    }
    if let Some(signal) = token.signal() {
        std::process::exit(signal.exit_code());
    }

    result
}

async fn run_application(args: Args, token: &CancelToken) -> Result<()> {
    let config = Config::load();

    let Args {
        command,
        columns,
        no_usage,
        theme,
        no_color,
        debug,
        ..
    } = args;

    let no_color = color_disabled(no_color, env::var_os(NO_COLOR_ENV).as_deref());
    let theme = select_theme(theme.as_deref(), no_color, &config)?;
    let columns = columns.map_or(config.columns, usize::from);
    let show_usage = config.show_usage && !no_usage;

    let output = match command {
        Commands::Voices {
            provider,
            current,
            dir,
        } => {
            let voices = match provider {
                Provider::Piper => match dir.or_else(|| config.voices_dir.clone()) {
                    Some(dir) => discovery::discover_piper_voices(&dir).with_context(|| {
                        format!("Failed to discover voices in: {}", dir.display())
                    })?,
                    None => {
                        tracing::info!("no voice directory given, listing no voices");
                        Vec::new()
                    }
                },
                Provider::Macos => discovery::discover_say_voices(token).await?,
            };

            if debug {
                print_debug("Voices", voices.iter().map(|v| (&v.name, &v.language)));
                return Ok(());
            }

            let options = VoicesOptions {
                provider: provider.display_name().to_string(),
                columns,
                show_usage,
                ..VoicesOptions::default()
            };
            let current = current.as_deref().filter(|c| !c.is_empty());
            render::render_voices(&voices, current, &options, theme)
        }
        Commands::Personalities { dir, current } => {
            let dir = dir
                .or_else(|| config.personalities_dir())
                .context("Could not determine the personalities directory; pass --dir")?;
            let personalities = discovery::discover_personalities(&dir).with_context(|| {
                format!("Failed to discover personalities in: {}", dir.display())
            })?;

            if debug {
                print_debug(
                    "Personalities",
                    personalities.iter().map(|p| (&p.name, &p.description)),
                );
                return Ok(());
            }

            let options = PersonalitiesOptions {
                columns,
                show_usage,
                ..PersonalitiesOptions::default()
            };
            render::render_personalities(&personalities, Some(current.as_str()), &options, theme)
        }
        Commands::List {
            title,
            icon,
            border,
            no_count,
            items,
        } => {
            let items = if items.is_empty() && !io::stdin().is_terminal() {
                read_stdin_items(token).await?
            } else {
                items
            };

            if debug {
                print_debug("Items", items.iter().map(|i| (i, i)));
                return Ok(());
            }

            let items: Vec<DisplayItem> = items.into_iter().map(DisplayItem::from).collect();
            let options = ListOptions {
                title,
                icon: Some(icon).filter(|i| !i.is_empty()),
                columns,
                border_color: border,
                show_count: !no_count,
                ..ListOptions::default()
            };
            render::render_list(&items, &options, theme)
        }
        Commands::Config { command } => return run_config_command(&command, theme),
    };

    if let Some(signal) = token.signal() {
        return Err(CommandError::Cancelled {
            program: "agentvibes".to_string(),
            signal,
        }
        .into());
    }

    println!("{output}");
    Ok(())
}

fn color_disabled(flag: bool, env_value: Option<&OsStr>) -> bool {
    flag || env_value.is_some_and(|v| !v.is_empty())
}

fn select_theme(
    name: Option<&str>,
    no_color: bool,
    config: &Config,
) -> Result<&'static Theme> {
    if no_color {
        return Ok(Theme::plain());
    }
    match name {
        Some(name) => Theme::by_name(name).with_context(|| {
            format!("Unknown theme '{name}'. Run `agentvibes config themes` to see all themes")
        }),
        None => Ok(config.resolve_theme()),
    }
}

fn run_config_command(command: &ConfigCommands, theme: &Theme) -> Result<()> {
    let path = Config::config_path()?;
    // Never fall back to defaults here: saving them would clobber the file.
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Fix or delete {} and try again", path.display()))?;

    match command {
        ConfigCommands::Show => {
            println!("# {}", path.display());
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        ConfigCommands::Themes => {
            let active = config.resolve_theme().name;
            let items: Vec<DisplayItem> = Theme::all()
                .iter()
                .map(|t| DisplayItem::new(t.name).current(t.name == active))
                .collect();
            let options = ListOptions {
                title: "Themes".to_string(),
                icon: Some("🎨".to_string()),
                columns: 1,
                ..ListOptions::default()
            };
            println!("{}", render::render_list(&items, &options, theme));
        }
        ConfigCommands::SetTheme { name } => {
            let selected = Theme::by_name(name).with_context(|| {
                format!("Unknown theme '{name}'. Run `agentvibes config themes` to see all themes")
            })?;
            config.theme = selected.name.to_string();
            config.save_to(&path)?;
            println!("Theme set to {} ({})", selected.name, path.display());
        }
    }
    Ok(())
}

/// Read one item per line from stdin, giving up as soon as `token` fires.
///
/// The read blocks, so it runs on the blocking pool; a cancelled read is left
/// behind and dies with the process.
async fn read_stdin_items(token: &CancelToken) -> Result<Vec<String>> {
    let read = tokio::task::spawn_blocking(|| -> io::Result<Vec<String>> {
        let mut items = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                items.push(trimmed.to_string());
            }
        }
        Ok(items)
    });

    let mut token = token.clone();
    tokio::select! {
        joined = read => {
            let items = joined
                .context("stdin reader task failed")?
                .context("Failed to read items from stdin")?;
            Ok(items)
        }
        signal = token.cancelled() => Err(CommandError::Cancelled {
            program: "stdin".to_string(),
            signal,
        }
        .into()),
    }
}

fn print_debug<'a>(heading: &str, entries: impl Iterator<Item = (&'a String, &'a String)>) {
    println!("=== Discovered {heading} ===");
    let mut count = 0usize;
    for (name, detail) in entries {
        count += 1;
        println!("  Name: {name}\n    Detail: {detail}\n");
    }
    println!("Total: {count}");
}
