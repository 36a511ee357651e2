// ABOUTME: Library module for the slide-extractor program.
// ABOUTME: Extracts marked slides from lesson documents and assembles reveal.js pages.

// Reexport modules
pub mod config;
pub mod errors;
pub mod html;
pub mod parser;
pub mod presentation;
pub mod registry;
pub mod run;
pub mod scan;
pub mod watch;

// Reexport common types and functions
pub use config::{Markers, Settings};
pub use errors::{Result, SlideError};
pub use html::{assemble_index, assemble_presentation, write_html_to_file, Template};
pub use parser::{Diagnostic, ParseOutcome, Slide, SlideParser};
pub use presentation::Presentation;
pub use registry::OutputRegistry;
pub use run::{check_reveal_present, run, RunSummary};
pub use scan::{find_lesson_files, LessonMatcher};
pub use watch::{watch_lessons, WatchConfig};
