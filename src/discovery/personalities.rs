use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

use crate::render::PersonalityEntry;

/// Personalities are markdown files named `<name>.md`.
pub const PERSONALITY_EXTENSION: &str = "md";

/// Fallback descriptions taken from body text are cut to this many characters.
pub const MAX_BODY_DESCRIPTION_CHARS: usize = 50;

const FRONTMATTER_DELIMITER: &str = "---";

static DESCRIPTION_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn description_regex() -> Option<&'static Regex> {
    DESCRIPTION_RE
        .get_or_init(|| Regex::new(r"(?i)description:\s*(.+)").ok())
        .as_ref()
}

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("failed to read personality file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no description found in {}", .path.display())]
    NotFound { path: PathBuf },
}

/// Read the description of the personality stored at `path`.
pub fn read_description(path: &Path) -> Result<String, DescriptionError> {
    let content = fs::read_to_string(path).map_err(|source| DescriptionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    extract_description(&content).ok_or_else(|| DescriptionError::NotFound {
        path: path.to_path_buf(),
    })
}

/// Find a description in personality markdown.
///
/// Lookup order:
/// 1. the first `description:` field (case-insensitive), trimmed
/// 2. the first non-empty line after the closing `---` of the front matter,
///    with leading `#` heading markers removed, cut to
///    [`MAX_BODY_DESCRIPTION_CHARS`] characters
pub fn extract_description(content: &str) -> Option<String> {
    if let Some(cap) = description_regex().and_then(|re| re.captures(content)) {
        return Some(cap[1].trim().to_string());
    }

    let mut delimiters = 0usize;
    let mut in_frontmatter = false;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed == FRONTMATTER_DELIMITER {
            delimiters += 1;
            in_frontmatter = delimiters == 1;
            continue;
        }

        if !in_frontmatter && delimiters >= 2 && !trimmed.is_empty() {
            return Some(
                strip_heading_marker(trimmed)
                    .chars()
                    .take(MAX_BODY_DESCRIPTION_CHARS)
                    .collect(),
            );
        }
    }

    None
}

fn strip_heading_marker(line: &str) -> &str {
    let without_hashes = line.trim_start_matches('#');
    if without_hashes.len() == line.len() {
        line
    } else {
        without_hashes.trim_start()
    }
}

/// Scan `personalities_dir` for personality files and append the `random`
/// sentinel.
///
/// A missing directory yields an empty list (no sentinel either). A file whose
/// description cannot be read or found is still listed with an empty
/// description. Results are unordered.
pub fn discover_personalities(personalities_dir: &Path) -> Result<Vec<PersonalityEntry>> {
    let mut personalities = Vec::new();

    if !personalities_dir.exists() {
        tracing::info!(
            dir = %personalities_dir.display(),
            "personalities directory does not exist"
        );
        return Ok(personalities);
    }

    if !personalities_dir.is_dir() {
        anyhow::bail!(
            "Path '{}' exists but is not a directory",
            personalities_dir.display()
        );
    }

    for entry in WalkDir::new(personalities_dir)
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

        if path.extension().and_then(|e| e.to_str()) != Some(PERSONALITY_EXTENSION) {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid filename for personality: {}", path.display()))?
            .to_string();

        let description = match read_description(path) {
            Ok(description) => description,
            Err(err) => {
                tracing::debug!(personality = %name, error = %err, "using empty description");
                String::new()
            }
        };

        personalities.push(PersonalityEntry::new(name, description));
    }

    personalities.push(PersonalityEntry::random());
    Ok(personalities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lists::{RANDOM_DESCRIPTION, RANDOM_PERSONALITY};
    use tempfile::TempDir;

    #[test]
    fn test_description_field_wins() {
        let content = "---\nname: pirate\ndescription: Talks like a pirate  \n---\n# Ahoy\n";
        assert_eq!(
            extract_description(content).as_deref(),
            Some("Talks like a pirate")
        );
    }

    #[test]
    fn test_description_field_is_case_insensitive() {
        let content = "Description: Very calm\n";
        assert_eq!(extract_description(content).as_deref(), Some("Very calm"));
    }

    #[test]
    fn test_first_body_line_after_frontmatter() {
        let content = "---\nname: zen\n---\n\n## Zen Master Personality\n\nBreathe.\n";
        assert_eq!(
            extract_description(content).as_deref(),
            Some("Zen Master Personality")
        );
    }

    #[test]
    fn test_body_line_is_truncated_to_fifty_chars() {
        let body = "a".repeat(80);
        let content = format!("---\nname: long\n---\n{body}\n");
        let description = extract_description(&content).expect("body line found");
        assert_eq!(description.chars().count(), MAX_BODY_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let body = "é".repeat(60);
        let content = format!("---\n---\n{body}");
        let description = extract_description(&content).expect("body line found");
        assert_eq!(description, "é".repeat(50));
    }

    #[test]
    fn test_no_frontmatter_means_no_description() {
        assert_eq!(extract_description("# Just a heading\n\nSome text\n"), None);
        assert_eq!(extract_description(""), None);
    }

    #[test]
    fn test_unclosed_frontmatter_means_no_description() {
        assert_eq!(extract_description("---\nname: x\nbody\n"), None);
    }

    #[test]
    fn test_crlf_delimiters_are_recognised() {
        let content = "---\r\nname: x\r\n---\r\nHello there\r\n";
        assert_eq!(extract_description(content).as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_heading_marker_only_stripped_when_present() {
        assert_eq!(strip_heading_marker("### Title"), "Title");
        assert_eq!(strip_heading_marker("#Title"), "Title");
        assert_eq!(strip_heading_marker("  plain"), "  plain");
    }

    #[test]
    fn test_read_description_missing_file_is_read_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let err = read_description(&temp_dir.path().join("ghost.md")).expect_err("missing");
        assert!(matches!(err, DescriptionError::Read { .. }));
    }

    #[test]
    fn test_read_description_not_found() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("plain.md");
        fs::write(&path, "nothing to see").expect("write");
        let err = read_description(&path).expect_err("no description");
        assert!(matches!(err, DescriptionError::NotFound { .. }));
    }

    #[test]
    fn test_discover_personalities_missing_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let result = discover_personalities(&temp_dir.path().join("missing")).expect("scan");
        assert!(result.is_empty());
    }

    #[test]
    fn test_discover_personalities_appends_random() {
        let temp_dir = TempDir::new().expect("create temp dir");
        fs::write(
            temp_dir.path().join("pirate.md"),
            "---\ndescription: Arr matey\n---\n",
        )
        .expect("write");
        fs::write(temp_dir.path().join("plain.md"), "no metadata").expect("write");
        fs::write(temp_dir.path().join("notes.txt"), "description: ignored").expect("write");

        let mut result = discover_personalities(temp_dir.path()).expect("scan");
        result.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(result.len(), 3);
        assert_eq!(result[0], PersonalityEntry::new("pirate", "Arr matey"));
        assert_eq!(result[1], PersonalityEntry::new("plain", ""));
        assert_eq!(
            result[2],
            PersonalityEntry::new(RANDOM_PERSONALITY, RANDOM_DESCRIPTION)
        );
    }

    #[test]
    fn test_discover_personalities_file_instead_of_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let file_path = temp_dir.path().join("file.md");
        fs::write(&file_path, "content").expect("write");

        let err = discover_personalities(&file_path).expect_err("not a directory");
        assert!(err.to_string().contains("not a directory"));
    }
}
