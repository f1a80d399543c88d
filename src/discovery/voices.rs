use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::discovery::command::{run_command, CancelToken, CommandError};
use crate::render::VoiceEntry;

/// Piper voice models are stored as `<name>.onnx`.
pub const PIPER_MODEL_EXTENSION: &str = "onnx";

/// Leading `xx_YY` language tag of a Piper voice name (e.g. `en_US-amy-medium`).
static LANGUAGE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn language_regex() -> Option<&'static Regex> {
    LANGUAGE_RE
        .get_or_init(|| Regex::new(r"^([a-z]{2}_[A-Z]{2})").ok())
        .as_ref()
}

/// Extract the language tag from a Piper voice name.
///
/// Returns an empty string when the name does not start with `xx_YY`.
///
/// Examples:
///   - "en_US-lessac-medium" -> "en_US"
///   - "de_DE-thorsten-low" -> "de_DE"
///   - "custom-voice" -> ""
pub fn extract_language(voice_name: &str) -> String {
    language_regex()
        .and_then(|re| re.captures(voice_name))
        .map(|cap| cap[1].to_string())
        .unwrap_or_default()
}

/// Scan `voice_dir` for Piper models.
///
/// Only the directory itself is scanned. A missing directory yields an empty
/// list; a path that is not a directory is an error. Results are unordered.
pub fn discover_piper_voices(voice_dir: &Path) -> Result<Vec<VoiceEntry>> {
    let mut voices = Vec::new();

    if !voice_dir.exists() {
        tracing::info!(dir = %voice_dir.display(), "voice directory does not exist");
        return Ok(voices);
    }

    if !voice_dir.is_dir() {
        anyhow::bail!(
            "Path '{}' exists but is not a directory",
            voice_dir.display()
        );
    }

    for entry in WalkDir::new(voice_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read directory entry");
                None
            }
        })
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some(PIPER_MODEL_EXTENSION) {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid filename for voice model: {}", path.display()))?
            .to_string();

        tracing::debug!(voice = %name, "found piper voice");
        let language = extract_language(&name);
        voices.push(VoiceEntry::new(name, language));
    }

    Ok(voices)
}

/// Parse the output of `say -v ?`.
///
/// Each line looks like `Alex                en_US    # Most people recognize me by my voice.`
/// The first whitespace-separated token is the voice name and the second the
/// language. Lines with fewer than two tokens are skipped.
pub fn parse_say_output(output: &str) -> Vec<VoiceEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let language = parts.next()?;
            Some(VoiceEntry::new(name, language))
        })
        .collect()
}

/// List the system voices via `say -v ?`.
///
/// Only macOS has `say`; on other platforms the list is empty. If `say` fails
/// the failure is logged and the list is empty. Cancellation is the one error
/// that propagates.
pub async fn discover_say_voices(token: &CancelToken) -> Result<Vec<VoiceEntry>> {
    if std::env::consts::OS != "macos" {
        tracing::info!(os = std::env::consts::OS, "system voices are only available on macOS");
        return Ok(Vec::new());
    }

    match run_command("say", &["-v", "?"], token).await {
        Ok(stdout) => Ok(parse_say_output(&stdout)),
        Err(err @ CommandError::Cancelled { .. }) => Err(err.into()),
        Err(err) => {
            tracing::warn!(error = %err, "could not list system voices");
            Ok(Vec::new())
        }
    }
}
