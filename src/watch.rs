// ABOUTME: Watch module for monitoring lesson changes and regenerating presentations
// ABOUTME: Reruns extraction on change and can serve the output directory over HTTP

use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::config::Settings;
use crate::errors::{Result, SlideError};
use crate::html::OUTPUT_EXTENSION;
use crate::run;
use crate::scan::LessonMatcher;

/// Configuration for watch mode
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Whether to serve the output directory using a local web server
    pub serve: bool,

    /// Port for local web server
    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            serve: false,
            port: 8080,
        }
    }
}

/// Content type for a served file, by extension
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "md" => "text/markdown; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// Map a request URL onto a file below `root`. `None` for URLs that try to leave it.
pub fn resolve_request_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let clean_path = path.trim_start_matches('/');

    if clean_path.split('/').any(|segment| segment == "..") {
        return None;
    }

    if clean_path.is_empty() {
        Some(root.join("index.html"))
    } else {
        Some(root.join(clean_path))
    }
}

/// Start a simple HTTP server for the output directory
fn start_server(root: PathBuf, port: u16) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| SlideError::WatchError(format!("Failed to start HTTP server: {}", e)))?;

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);

        for request in server.incoming_requests() {
            let file_path = resolve_request_path(&root, request.url());
            debug!("Request for {:?} -> {:?}", request.url(), file_path);

            let response = match file_path {
                Some(path) if path.is_file() => match fs::read(&path) {
                    Ok(content) => {
                        let mut response = Response::from_data(content);
                        if let Ok(header) =
                            Header::from_bytes("Content-Type", content_type(&path))
                        {
                            response = response.with_header(header);
                        }
                        response
                    }
                    Err(e) => {
                        error!("Failed to read file {:?}: {}", path, e);
                        Response::from_string(format!("Failed to read file: {}", e))
                            .with_status_code(StatusCode(500))
                    }
                },
                Some(_) => Response::from_string("404 Not Found")
                    .with_status_code(StatusCode(404)),
                None => Response::from_string("403 Forbidden")
                    .with_status_code(StatusCode(403)),
            };

            if let Err(e) = request.respond(response) {
                error!("Failed to send response: {}", e);
            }
        }
    });

    Ok(())
}

/// Run once, then rerun whenever a lesson or the template changes
pub fn watch_lessons(settings: &Settings, config: &WatchConfig) -> Result<()> {
    let matcher = LessonMatcher::new(&settings.input_file_pattern)?;

    regenerate(settings)?;

    if config.serve {
        start_server(settings.output_directory.clone(), config.port)?;
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| SlideError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let input_directory = absolute(&settings.input_directory)?;
    debouncer
        .watcher()
        .watch(&input_directory, RecursiveMode::Recursive)
        .map_err(|e| {
            SlideError::WatchError(format!(
                "Failed to start watching {:?}: {}",
                input_directory, e
            ))
        })?;

    let template = absolute(&settings.template)?;
    if !template.starts_with(&input_directory) {
        if let Some(template_directory) = template.parent() {
            debouncer
                .watcher()
                .watch(template_directory, RecursiveMode::NonRecursive)
                .map_err(|e| {
                    SlideError::WatchError(format!(
                        "Failed to start watching {:?}: {}",
                        template_directory, e
                    ))
                })?;
        }
    }

    let output_directory = absolute(&settings.output_directory)?;
    let watched = WatchedPaths::new(matcher, template, output_directory);

    info!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        input_directory
    );

    for result in rx {
        match result {
            Ok(events) => {
                let changed = events.iter().flat_map(|event| event.paths.iter());
                if watched.any_relevant(changed) {
                    if let Err(e) = regenerate(settings) {
                        error!("Failed to regenerate presentations: {}", e);
                    }
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// Decides which file system events should trigger a rerun. Holds no timing
/// state: every debounced batch with a relevant path triggers one.
pub struct WatchedPaths {
    matcher: LessonMatcher,
    template: PathBuf,
    output_directory: PathBuf,
}

impl WatchedPaths {
    pub fn new(matcher: LessonMatcher, template: PathBuf, output_directory: PathBuf) -> Self {
        Self {
            matcher,
            template,
            output_directory,
        }
    }

    pub fn is_relevant(&self, path: &Path) -> bool {
        if path == self.template {
            return true;
        }
        let generated = path.parent() == Some(self.output_directory.as_path())
            && path.extension().map_or(false, |ext| ext == OUTPUT_EXTENSION);
        !generated && self.matcher.matches(path)
    }

    /// True when any path in a debounced batch calls for a rerun
    pub fn any_relevant<'a, I>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        paths.into_iter().any(|path| {
            let relevant = self.is_relevant(path);
            if relevant {
                debug!("Detected relevant change in {:?}", path);
            }
            relevant
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        SlideError::WatchError(format!("Cannot resolve {:?} for watching: {}", path, e))
    })
}

fn regenerate(settings: &Settings) -> Result<()> {
    info!("Regenerating presentations...");
    let summary = run::run(settings)?;
    for (lesson, e) in &summary.failed {
        warn!("Skipped {}: {}", lesson.display(), e);
    }
    info!(
        "Wrote {} presentations and {:?}",
        summary.written.len(),
        summary.index
    );
    Ok(())
}
