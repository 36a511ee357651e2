// ABOUTME: Configuration module for the slide-extractor application
// ABOUTME: Loads run settings from a properties file relative to a working directory

use crate::errors::{Result, SlideError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "SlideExtractor.properties";

pub const DEFAULT_SLIDE_START: &str = "-- *Slide* --";
pub const DEFAULT_SLIDE_END: &str = "-- *Slide End* --";
pub const DEFAULT_INSERTION_MARKER: &str = "<!-- Slides go here -->";

/// Slides longer than this many lines produce a warning
pub const DEFAULT_MAX_SLIDE_LENGTH: usize = 22;

/// How many directory levels below the input directory are scanned
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Marker literals recognised in lesson documents and in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub slide_start: String,
    pub slide_end: String,
    pub insertion: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            slide_start: DEFAULT_SLIDE_START.to_string(),
            slide_end: DEFAULT_SLIDE_END.to_string(),
            insertion: DEFAULT_INSERTION_MARKER.to_string(),
        }
    }
}

/// Resolved settings for one run. Built once in `main` and passed down by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output_directory: PathBuf,
    pub input_directory: PathBuf,
    pub input_file_pattern: String,
    pub template: PathBuf,
    pub markers: Markers,
    pub max_slide_length: usize,
    pub max_depth: usize,
}

impl Settings {
    /// Load settings from `settings_file`, resolved against `base_directory`
    pub fn load(base_directory: &Path, settings_file: &Path) -> Result<Self> {
        let path = base_directory.join(settings_file);
        let content = fs::read_to_string(&path).map_err(|source| SlideError::SettingsReadError {
            path: path.clone(),
            source,
        })?;
        let properties = parse_properties(&content)?;
        Self::from_properties(base_directory, &properties)
    }

    /// Build settings from already parsed key/value pairs
    pub fn from_properties(
        base_directory: &Path,
        properties: &HashMap<String, String>,
    ) -> Result<Self> {
        let output_directory = required(properties, &["outputDirectory", "revealDirectory"])?;
        let input_directory = required(properties, &["inputDirectory", "lessonsDirectory"])?;
        let input_file_pattern = required(properties, &["inputFileRegex", "lessonsFileRegex"])?;
        let template = required(properties, &["template"])?;

        let defaults = Markers::default();
        let markers = Markers {
            slide_start: optional(properties, "slideStart").unwrap_or(defaults.slide_start),
            slide_end: optional(properties, "slideEnd").unwrap_or(defaults.slide_end),
            insertion: optional(properties, "insertionMarker").unwrap_or(defaults.insertion),
        };

        let max_slide_length =
            optional_number(properties, "maxSlideLength")?.unwrap_or(DEFAULT_MAX_SLIDE_LENGTH);
        let max_depth = optional_number(properties, "maxDepth")?.unwrap_or(DEFAULT_MAX_DEPTH);

        Ok(Self {
            output_directory: base_directory.join(output_directory),
            input_directory: base_directory.join(input_directory),
            input_file_pattern,
            template: base_directory.join(template),
            markers,
            max_slide_length,
            max_depth,
        })
    }

    /// Location whose presence shows reveal.js has been checked out
    pub fn reveal_marker_file(&self) -> PathBuf {
        self.output_directory.join("reveal.js").join("README.md")
    }
}

/// Parse a Java properties document: `=`, `:` or whitespace separators,
/// `#`/`!` comments, trailing-backslash continuations and backslash escapes.
pub fn parse_properties(content: &str) -> Result<HashMap<String, String>> {
    java_properties::read(content.as_bytes()).map_err(|e| SlideError::InvalidSetting {
        line: e.line_number().unwrap_or(0),
        message: e.to_string(),
    })
}

fn required(properties: &HashMap<String, String>, keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| optional(properties, key))
        .ok_or_else(|| SlideError::MissingSetting(keys[0].to_string()))
}

fn optional(properties: &HashMap<String, String>, key: &str) -> Option<String> {
    properties
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
}

fn optional_number(properties: &HashMap<String, String>, key: &str) -> Result<Option<usize>> {
    match optional(properties, key) {
        Some(value) => value.parse::<usize>().map(Some).map_err(|e| {
            SlideError::ValidationError(format!("Setting '{}' must be a number: {}", key, e))
        }),
        None => Ok(None),
    }
}
