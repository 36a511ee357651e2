// ABOUTME: Error types for the slide-extractor application
// ABOUTME: Provides structured error handling for settings, parsing, assembly and output

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Failed to read or write file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Could not read the settings file {path:?}: {source}")]
    SettingsReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing setting '{0}'")]
    MissingSetting(String),

    #[error("Invalid setting on line {line}: {message}")]
    InvalidSetting { line: usize, message: String },

    #[error("Invalid input file pattern '{pattern}': {message}")]
    PatternError { pattern: String, message: String },

    #[error("Template {path:?} has no insertion marker line '{marker}'")]
    TemplateMarkerNotFound { path: PathBuf, marker: String },

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Could not find reveal.js at {0:?}. Have you forgotten to check it out? If so, run `git submodule init` and `git submodule update` to fetch it")]
    RevealNotFound(PathBuf),

    #[error("Directory traversal error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("{failed} of {total} documents could not be converted")]
    DocumentsFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, SlideError>;
