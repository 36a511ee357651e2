use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slide-extractor"))
        .arg("--workingdir")
        .arg(working_dir)
        .args(args)
        .env_remove("SLIDE_EXTRACTOR_WORKDIR")
        .env_remove("SLIDE_EXTRACTOR_PROPERTIES")
        .output()
        .expect("Failed to execute command")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

fn create_workspace(with_reveal: bool) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();

    write_file(
        &base.join("SlideExtractor.properties"),
        "# slide extractor settings\n\
         revealDirectory=reveal\n\
         lessonsDirectory=lessons\n\
         lessonsFileRegex=*.md\n\
         template=template.html\n",
    );
    write_file(
        &base.join("template.html"),
        "<div class=\"slides\">\n<!-- Slides go here -->\n</div>\n",
    );
    write_file(
        &base.join("lessons/01-basics.md"),
        "# Basics\n\n-- *Slide* --\n## Variables\n-- *Slide End* --\n",
    );
    if with_reveal {
        write_file(&base.join("reveal/reveal.js/README.md"), "reveal.js");
    }

    temp_dir
}

#[test]
fn test_run_command_writes_presentation_and_index() {
    let workspace = create_workspace(true);
    let base = workspace.path();

    let output = run_command(base, &[]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let page = fs::read_to_string(base.join("reveal/01-basics.html"))
        .expect("Presentation page was not written");
    assert_eq!(
        page,
        "<div class=\"slides\">\n<!-- Slides go here -->\n\
         <section data-markdown><script type=\"text/template\">\n\
         ## Variables\n\
         </script></section>\n\
         </div>\n"
    );

    let index = fs::read_to_string(base.join("reveal/index.html"))
        .expect("Index page was not written");
    assert!(
        index.contains("<li><a href=\"01-basics.html#/\">01-basics</a></li>"),
        "Missing index entry: {}",
        index
    );
}

#[test]
fn test_explicit_run_subcommand() {
    let workspace = create_workspace(true);

    let output = run_command(workspace.path(), &["run"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(workspace.path().join("reveal/index.html").exists());
}

#[test]
fn test_missing_reveal_fails() {
    let workspace = create_workspace(false);

    let output = run_command(workspace.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("reveal.js"),
        "Expected reveal.js hint, got: {}",
        stderr
    );
    assert!(!workspace.path().join("reveal/index.html").exists());
}

#[test]
fn test_skip_reveal_check() {
    let workspace = create_workspace(false);

    let output = run_command(workspace.path(), &["--skip-reveal-check"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(workspace.path().join("reveal/01-basics.html").exists());
}

#[test]
fn test_missing_properties_file_fails() {
    let workspace = create_workspace(true);

    let output = run_command(workspace.path(), &["--properties", "nope.properties"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.properties"), "stderr: {}", stderr);
}

#[test]
fn test_custom_properties_file() {
    let workspace = create_workspace(true);
    let base = workspace.path();
    write_file(
        &base.join("other.properties"),
        "outputDirectory=reveal\n\
         inputDirectory=lessons\n\
         inputFileRegex=*.txt\n\
         template=template.html\n",
    );
    write_file(
        &base.join("lessons/notes.txt"),
        "-- *Slide* --\nfrom txt\n-- *Slide End* --\n",
    );

    let output = run_command(base, &["-p", "other.properties"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(base.join("reveal/notes.html").exists());
    assert!(!base.join("reveal/01-basics.html").exists());
}

#[test]
fn test_version_flag() {
    for flag in ["--version", "-v"] {
        let output = Command::new(env!("CARGO_BIN_EXE_slide-extractor"))
            .arg(flag)
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success(), "{} failed: {:?}", flag, output);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }
}
