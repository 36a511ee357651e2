// ABOUTME: Presentation model for the slide-extractor application
// ABOUTME: Names a lesson document and holds the slides extracted from it

use crate::config::Settings;
use crate::errors::{Result, SlideError};
use crate::parser::{Diagnostic, Slide, SlideParser};
use log::{error, info, warn};
use std::fs;
use std::path::Path;

/// The slides extracted from one lesson document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    name: String,
    slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(name: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            name: name.into(),
            slides,
        }
    }

    /// Read and parse a lesson document, logging every diagnostic against its path
    pub fn extract(path: &Path, settings: &Settings) -> Result<Self> {
        info!("Working on: {}", path.display());

        let name = presentation_name(path)?;
        let content = fs::read_to_string(path)?;
        let outcome = SlideParser::parse(
            &settings.markers,
            settings.max_slide_length,
            content.lines(),
        );

        for diagnostic in &outcome.diagnostics {
            report(path, diagnostic);
        }

        Ok(Self::new(name, outcome.slides))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}

/// File name with its last extension removed: `intro.md` becomes `intro`
pub fn presentation_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            SlideError::ValidationError(format!(
                "Cannot derive a presentation name from {:?}",
                path
            ))
        })
}

fn report(path: &Path, diagnostic: &Diagnostic) {
    if diagnostic.is_error() {
        error!("{}: {}", path.display(), diagnostic);
    } else {
        warn!("{}: {}", path.display(), diagnostic);
    }
}
