// ABOUTME: Lesson discovery for the slide-extractor application
// ABOUTME: Walks the input directory to a bounded depth and matches file names against a glob

use crate::errors::{Result, SlideError};
use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Matches lesson file names against the configured glob, `{md,markdown}` alternation included
#[derive(Debug, Clone)]
pub struct LessonMatcher {
    matcher: GlobMatcher,
}

impl LessonMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern).map_err(|e| SlideError::PatternError {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    /// Only the final path component is compared
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matcher.is_match(name))
            .unwrap_or(false)
    }
}

/// Regular files under `root` (at most `max_depth` levels down) whose names match,
/// in a stable order
pub fn find_lesson_files(
    root: &Path,
    matcher: &LessonMatcher,
    max_depth: usize,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SlideError::PathNotFoundError(root.to_path_buf()));
    }

    let mut lessons = Vec::new();
    for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && matcher.matches(entry.path()) {
            lessons.push(entry.into_path());
        }
    }

    Ok(lessons)
}
