// ABOUTME: Run driver for the slide-extractor application
// ABOUTME: Finds lessons, converts each into a presentation page and writes the index page

use crate::config::Settings;
use crate::errors::{Result, SlideError};
use crate::html::{self, Template, INDEX_PAGE_NAME};
use crate::presentation::Presentation;
use crate::registry::OutputRegistry;
use crate::scan::{self, LessonMatcher};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// What one pass over the lessons produced
#[derive(Debug)]
pub struct RunSummary {
    /// Presentation pages, in the order they were written
    pub written: Vec<PathBuf>,
    /// Lessons whose page could not be assembled
    pub failed: Vec<(PathBuf, SlideError)>,
    pub index: PathBuf,
}

impl RunSummary {
    /// Turn per-document failures into a single error
    pub fn ensure_success(&self) -> Result<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(SlideError::DocumentsFailed {
                failed: self.failed.len(),
                total: self.written.len() + self.failed.len(),
            })
        }
    }
}

/// Fail unless reveal.js has been checked out into the output directory
pub fn check_reveal_present(settings: &Settings) -> Result<()> {
    info!("Checking for presence of reveal.js...");
    let marker = settings.reveal_marker_file();
    if !marker.exists() {
        return Err(SlideError::RevealNotFound(
            settings.output_directory.join("reveal.js"),
        ));
    }
    info!("Required library reveal.js is present.");
    Ok(())
}

/// Create the output directory if needed and make sure pages can be written into it
fn prepare_output_directory(directory: &Path) -> Result<()> {
    if directory.exists() && !directory.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Output path {:?} is not a directory",
            directory
        )));
    }
    fs::create_dir_all(directory)?;

    let scratch = directory.join(format!(".slide-extractor-{}", uuid::Uuid::new_v4()));
    fs::write(&scratch, b"").map_err(|e| {
        SlideError::ValidationError(format!(
            "Cannot write presentations to {:?}: {}",
            directory, e
        ))
    })?;
    if let Err(e) = fs::remove_file(&scratch) {
        warn!("Left scratch file {:?} behind: {}", scratch, e);
    }
    Ok(())
}

/// Convert every matching lesson, then write the index page.
///
/// A template without the insertion marker fails only the document being
/// assembled; any other error ends the run.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let matcher = LessonMatcher::new(&settings.input_file_pattern)?;
    let lessons =
        scan::find_lesson_files(&settings.input_directory, &matcher, settings.max_depth)?;
    prepare_output_directory(&settings.output_directory)?;

    let mut registry = OutputRegistry::new();
    let mut written = Vec::new();
    let mut failed = Vec::new();

    for lesson in lessons {
        match extract_slides(&lesson, settings, &mut registry) {
            Ok(target) => written.push(target),
            Err(e @ SlideError::TemplateMarkerNotFound { .. }) => {
                error!("Could not convert {}: {}", lesson.display(), e);
                failed.push((lesson, e));
            }
            Err(e) => return Err(e),
        }
    }

    let index = write_index_page(settings, &registry)?;

    Ok(RunSummary {
        written,
        failed,
        index,
    })
}

/// Parse one lesson, write its page and record it in the registry
pub fn extract_slides(
    lesson: &Path,
    settings: &Settings,
    registry: &mut OutputRegistry,
) -> Result<PathBuf> {
    let presentation = Presentation::extract(lesson, settings)?;
    let template = Template::load(&settings.template)?;
    let lines =
        html::assemble_presentation(&presentation, &template, &settings.markers.insertion)?;

    let file_name = html::output_file_name(presentation.name());
    let target = settings.output_directory.join(&file_name);
    html::write_html_to_file(&lines, &target)?;

    registry.record(presentation.name(), file_name);
    Ok(target)
}

/// Write `index.html` linking every registered page
pub fn write_index_page(settings: &Settings, registry: &OutputRegistry) -> Result<PathBuf> {
    let template = Template::load(&settings.template)?;
    let lines = html::assemble_index(registry, &template, &settings.markers.insertion)?;

    let target = settings
        .output_directory
        .join(html::output_file_name(INDEX_PAGE_NAME));
    html::write_html_to_file(&lines, &target)?;
    Ok(target)
}
