// ABOUTME: HTML assembly module for the slide-extractor application
// ABOUTME: Splices slide sections and the index list into the reveal.js template

use crate::errors::{Result, SlideError};
use crate::parser::Slide;
use crate::presentation::Presentation;
use crate::registry::OutputRegistry;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const OUTPUT_EXTENSION: &str = "html";
pub const INDEX_PAGE_NAME: &str = "index";

/// Opens each slide; reveal.js renders the markdown inside the script tag
pub const SLIDE_OPEN: &str = r#"<section data-markdown><script type="text/template">"#;
pub const SLIDE_CLOSE: &str = "</script></section>";

/// Anchor appended to index links so reveal.js starts at the first slide
pub const INDEX_LINK_FRAGMENT: &str = "#/";

/// The template document, read as lines. Never modified; assembly returns new lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    lines: Vec<String>,
}

impl Template {
    /// Read the template from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SlideError::PathNotFoundError(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::from_lines(
            path,
            content.lines().map(str::to_string).collect(),
        ))
    }

    pub fn from_lines(path: &Path, lines: Vec<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            lines,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index just after the first line equal to `marker`
    pub fn insertion_point(&self, marker: &str) -> Result<usize> {
        self.lines
            .iter()
            .position(|line| line == marker)
            .map(|index| index + 1)
            .ok_or_else(|| SlideError::TemplateMarkerNotFound {
                path: self.path.clone(),
                marker: marker.to_string(),
            })
    }

    /// Template lines with `block` placed straight after the marker line
    pub fn inject(&self, marker: &str, block: Vec<String>) -> Result<Vec<String>> {
        let at = self.insertion_point(marker)?;
        let (prefix, suffix) = self.lines.split_at(at);

        let mut output = Vec::with_capacity(self.lines.len() + block.len());
        output.extend_from_slice(prefix);
        output.extend(block);
        output.extend_from_slice(suffix);
        Ok(output)
    }
}

/// Wrap every slide in a reveal.js markdown section, in order
pub fn slide_block(slides: &[Slide]) -> Vec<String> {
    let mut block = Vec::new();
    for slide in slides {
        block.push(SLIDE_OPEN.to_string());
        block.extend(slide.lines().iter().cloned());
        block.push(SLIDE_CLOSE.to_string());
    }
    block
}

/// An unordered list linking every registered page, in registration order
pub fn index_block(registry: &OutputRegistry) -> Vec<String> {
    let mut block = Vec::with_capacity(registry.len() + 2);
    block.push("<ul>".to_string());
    for (name, file_name) in registry.iter() {
        block.push(format!(
            r#"<li><a href="{}{}">{}</a></li>"#,
            file_name, INDEX_LINK_FRAGMENT, name
        ));
    }
    block.push("</ul>".to_string());
    block
}

/// Output lines for one presentation
pub fn assemble_presentation(
    presentation: &Presentation,
    template: &Template,
    marker: &str,
) -> Result<Vec<String>> {
    template.inject(marker, slide_block(presentation.slides()))
}

/// Output lines for the index page
pub fn assemble_index(
    registry: &OutputRegistry,
    template: &Template,
    marker: &str,
) -> Result<Vec<String>> {
    template.inject(marker, index_block(registry))
}

/// `intro` becomes `intro.html`
pub fn output_file_name(name: &str) -> String {
    format!("{}.{}", name, OUTPUT_EXTENSION)
}

/// Join lines into document text, each line terminated by a newline
pub fn render_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Write assembled lines to a file, creating its parent directory if needed
pub fn write_html_to_file(lines: &[String], output_path: &Path) -> Result<()> {
    info!("Writing to: {}", output_path.display());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(SlideError::FileReadError)?;
        }
    }

    fs::write(output_path, render_lines(lines)).map_err(SlideError::FileReadError)?;

    Ok(())
}
