//! End-to-end pipeline tests driving a real renderer subprocess.
//!
//! The renderer is a shell script standing in for the external notebook
//! CLI: it honors the `export html <source> -o <output>` argument shape and
//! writes a small HTML document, so the full orchestration — discovery,
//! extraction, subprocess export, index generation — runs against real
//! files and a real child process.

#![cfg(unix)]

use lectern::pipeline::{self, ExportOptions};
use lectern::render::CommandRenderer;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_notebook(dir: &Path, stem: &str, title: &str, description: &str) -> PathBuf {
    let path = dir.join(format!("{stem}.py"));
    let source = format!(
        "import marimo\n\napp = marimo.App()\n\n\n@app.cell\ndef _(mo):\n    mo.md(\n        r\"\"\"\n    # {title}\n\n    {description}\n    \"\"\"\n    )\n    return\n"
    );
    fs::write(&path, source).unwrap();
    path
}

/// A fake renderer: writes a fixed HTML document to the `-o` argument.
fn fake_renderer(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("fake-renderer.sh");
    fs::write(
        &path,
        "#!/bin/sh\n# args: export html <source> -o <output> [--no-include-code]\nprintf '<html><body>rendered %s</body></html>' \"$3\" > \"$5\"\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn setup() -> (TempDir, PathBuf, CommandRenderer) {
    let tmp = TempDir::new().unwrap();
    let sources = tmp.path().join("notebooks");
    fs::create_dir(&sources).unwrap();
    write_notebook(
        &sources,
        "gravitation",
        "Gravitation",
        "Newton's law of universal gravitation.",
    );
    write_notebook(
        &sources,
        "three_body",
        "The Three-Body Problem",
        "Chaos in three-body orbits.",
    );

    let program = fake_renderer(tmp.path());
    let renderer = CommandRenderer::new(program.to_string_lossy(), tmp.path());
    (tmp, sources, renderer)
}

#[test]
fn export_produces_page_per_notebook_plus_index() {
    let (tmp, sources, renderer) = setup();
    let output = tmp.path().join("docs");

    let paths = pipeline::export_all(&ExportOptions::new(&sources, &output), &renderer).unwrap();

    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("gravitation.html"));
    assert!(paths[1].ends_with("three_body.html"));
    assert!(paths[2].ends_with("index.html"));

    for path in &paths {
        assert!(path.exists(), "{} missing", path.display());
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}

#[test]
fn index_groups_notebooks_into_sections() {
    let (tmp, sources, renderer) = setup();
    let output = tmp.path().join("docs");

    pipeline::export_all(&ExportOptions::new(&sources, &output), &renderer).unwrap();
    let html = fs::read_to_string(output.join("index.html")).unwrap();

    let feynman_at = html.find("Feynman Lectures Series").unwrap();
    let explorations_at = html.find("Explorations").unwrap();
    assert!(feynman_at < explorations_at);

    let gravitation_at = html.find("href=\"gravitation.html\"").unwrap();
    let three_body_at = html.find("href=\"three_body.html\"").unwrap();
    assert!(gravitation_at > feynman_at && gravitation_at < explorations_at);
    assert!(three_body_at > explorations_at);

    assert!(html.contains("Newton's law of universal gravitation."));
}

#[test]
fn every_notebook_is_linked_from_the_index() {
    let (tmp, sources, renderer) = setup();
    let output = tmp.path().join("docs");

    let paths = pipeline::export_all(&ExportOptions::new(&sources, &output), &renderer).unwrap();
    let html = fs::read_to_string(output.join("index.html")).unwrap();

    for path in paths.iter().filter(|p| !p.ends_with("index.html")) {
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(
            html.contains(&format!("href=\"{name}\"")),
            "index does not link {name}"
        );
    }
}

#[test]
fn rerunning_the_export_is_byte_identical() {
    let (tmp, sources, renderer) = setup();
    let output = tmp.path().join("docs");
    let opts = ExportOptions::new(&sources, &output);

    pipeline::export_all(&opts, &renderer).unwrap();
    let first = fs::read(output.join("index.html")).unwrap();

    pipeline::export_all(&opts, &renderer).unwrap();
    let second = fs::read(output.join("index.html")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn broken_renderer_fails_the_whole_batch() {
    use std::os::unix::fs::PermissionsExt;

    let (tmp, sources, _) = setup();
    let output = tmp.path().join("docs");

    let program = tmp.path().join("broken-renderer.sh");
    fs::write(&program, "#!/bin/sh\necho 'cell raised ValueError' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
    let renderer = CommandRenderer::new(program.to_string_lossy(), tmp.path());

    let err = pipeline::export_all(&ExportOptions::new(&sources, &output), &renderer).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("code 1"), "unexpected error: {message}");
    assert!(message.contains("cell raised ValueError"));
    assert!(!output.join("index.html").exists());
}

#[test]
fn code_inclusion_flag_reaches_the_renderer() {
    use std::os::unix::fs::PermissionsExt;

    let (tmp, sources, _) = setup();
    let output = tmp.path().join("docs");

    // Echo the full argument list into the output so the flag is observable.
    let program = tmp.path().join("arg-echo.sh");
    fs::write(&program, "#!/bin/sh\nprintf '%s ' \"$@\" > \"$5\"\n").unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
    let renderer = CommandRenderer::new(program.to_string_lossy(), tmp.path());

    let mut opts = ExportOptions::new(&sources, &output);
    opts.include_code = false;
    pipeline::export_all(&opts, &renderer).unwrap();

    let recorded = fs::read_to_string(output.join("gravitation.html")).unwrap();
    assert!(recorded.contains("--no-include-code"));
    assert!(recorded.contains("export html"));
}
