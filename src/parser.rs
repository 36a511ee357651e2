// ABOUTME: Slide extraction state machine for the slide-extractor application
// ABOUTME: Splits the lines of a lesson document into slides delimited by marker lines

use crate::config::Markers;
use std::fmt;

/// The lines found between one start marker and its end marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    lines: Vec<String>,
}

impl Slide {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Something worth reporting about a document. None of these stop parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An end marker was found while no slide was open
    EndWithoutStart { line: usize },
    /// A start marker was found while a slide was still open
    StartWhileOpen { line: usize },
    /// A slide closed at `line` with more lines than the configured threshold
    LongSlide { line: usize, length: usize },
    /// The document ended with the slide opened at `start_line` still open
    Unterminated { start_line: usize },
}

impl Diagnostic {
    /// Marker sequencing problems are errors, the rest are warnings
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::EndWithoutStart { .. } | Diagnostic::StartWhileOpen { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EndWithoutStart { line } => {
                write!(f, "Slide end found without slide start: line {}", line)
            }
            Diagnostic::StartWhileOpen { line } => {
                write!(f, "New slide start found whilst still creating slide: line {}", line)
            }
            Diagnostic::LongSlide { line, length } => {
                write!(f, "Long slide with {} lines found: line {}", length, line)
            }
            Diagnostic::Unterminated { start_line } => write!(
                f,
                "Slide started on line {} was never closed and has been dropped",
                start_line
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Start,
    End,
    Content,
}

#[derive(Debug)]
enum State {
    Idle,
    Collecting { slide: Slide, start_line: usize },
}

/// Result of scanning one document
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub slides: Vec<Slide>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Consumes a document line by line, in order, and collects closed slides
pub struct SlideParser {
    start_marker: String,
    end_marker: String,
    max_slide_length: usize,
    state: State,
    outcome: ParseOutcome,
}

impl SlideParser {
    pub fn new(markers: &Markers, max_slide_length: usize) -> Self {
        Self {
            start_marker: markers.slide_start.trim().to_lowercase(),
            end_marker: markers.slide_end.trim().to_lowercase(),
            max_slide_length,
            state: State::Idle,
            outcome: ParseOutcome::default(),
        }
    }

    /// Parse a whole document in one go. Line numbers start at 1.
    pub fn parse<I, S>(markers: &Markers, max_slide_length: usize, lines: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new(markers, max_slide_length);
        for (index, line) in lines.into_iter().enumerate() {
            parser.feed(line.as_ref(), index + 1);
        }
        parser.finish()
    }

    /// True while a slide is open
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting { .. })
    }

    /// Process the next line of the document
    pub fn feed(&mut self, line: &str, line_no: usize) {
        match self.classify(line) {
            LineKind::End if self.is_collecting() => self.close_slide(line_no),
            LineKind::End => {
                self.outcome
                    .diagnostics
                    .push(Diagnostic::EndWithoutStart { line: line_no });
            }
            LineKind::Start => {
                if self.is_collecting() {
                    self.outcome
                        .diagnostics
                        .push(Diagnostic::StartWhileOpen { line: line_no });
                    self.close_slide(line_no);
                }
                self.open_slide(line_no);
            }
            LineKind::Content => {
                if let State::Collecting { slide, .. } = &mut self.state {
                    slide.lines.push(line.to_string());
                }
            }
        }
    }

    /// Stop scanning. A slide still open at this point is dropped.
    pub fn finish(mut self) -> ParseOutcome {
        if let State::Collecting { start_line, .. } = self.state {
            self.outcome
                .diagnostics
                .push(Diagnostic::Unterminated { start_line });
        }
        self.outcome
    }

    fn classify(&self, line: &str) -> LineKind {
        let normalized = line.trim().to_lowercase();
        if normalized == self.end_marker {
            LineKind::End
        } else if normalized == self.start_marker {
            LineKind::Start
        } else {
            LineKind::Content
        }
    }

    fn open_slide(&mut self, line_no: usize) {
        self.state = State::Collecting {
            slide: Slide::default(),
            start_line: line_no,
        };
    }

    fn close_slide(&mut self, line_no: usize) {
        if let State::Collecting { slide, .. } = std::mem::replace(&mut self.state, State::Idle) {
            if slide.len() > self.max_slide_length {
                self.outcome.diagnostics.push(Diagnostic::LongSlide {
                    line: line_no,
                    length: slide.len(),
                });
            }
            self.outcome.slides.push(slide);
        }
    }
}
