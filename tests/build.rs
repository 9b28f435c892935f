//! End-to-end build pipeline tests.
//!
//! Each test scaffolds a project in a temp directory and pins source
//! mtimes well into the past, so freshly-written outputs are strictly
//! newer than their sources and rebuild decisions are deterministic
//! regardless of filesystem timestamp granularity. "Touching" a source
//! sets its mtime well into the future.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use lantern::config::BuildConfig;
use lantern::generate::generate;
use tempfile::TempDir;

const DEFAULT_TPL: &str = "\
<title>{{ title }}</title>
<base href=\"{{ ROOT }}\">
<div>{{ BODY }}</div>
";

fn config() -> BuildConfig {
    BuildConfig {
        source: PathBuf::from("."),
        build: PathBuf::from("_build"),
        ignore: vec!["_build".into()],
        static_ext: vec![".css".into()],
    }
}

/// Write a file and pin its mtime one hour before the test started.
fn write_old(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    set_mtime(&path, SystemTime::now() - Duration::from_secs(3600));
    path
}

/// Bump a source's mtime one hour past now, making dependents stale.
fn touch(path: &Path) {
    set_mtime(path, SystemTime::now() + Duration::from_secs(3600));
}

fn set_mtime(path: &Path, to: SystemTime) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(to).unwrap();
}

fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}

/// Minimal project: one document, one default template.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_old(tmp.path(), "_templates/default.html", DEFAULT_TPL);
    write_old(tmp.path(), "index.md", "---\ntitle: Home\n---\n\n# Hi\n");
    tmp
}

#[test]
fn scenario_build_then_noop_then_edit() {
    let tmp = project();

    // First build renders the document through the template.
    assert!(generate(&config(), tmp.path()).unwrap());
    let out = tmp.path().join("_build/index.html");
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Home"));
    assert!(html.contains("<h2"));
    assert!(html.contains("Hi"));

    // Re-running without changes writes nothing.
    let before = mtime(&out);
    assert!(!generate(&config(), tmp.path()).unwrap());
    assert_eq!(mtime(&out), before);

    // Editing the body updates only index.html.
    let doc = tmp.path().join("index.md");
    fs::write(&doc, "---\ntitle: Home\n---\n\n# Hello again\n").unwrap();
    touch(&doc);
    assert!(generate(&config(), tmp.path()).unwrap());
    assert!(fs::read_to_string(&out).unwrap().contains("Hello again"));
}

#[test]
fn second_build_is_idempotent_across_all_artifacts() {
    let tmp = project();
    write_old(tmp.path(), "guides/install.md", "---\ntitle: I\n---\n\ntext\n");
    write_old(tmp.path(), "_static/styles.css", "body {}");

    assert!(generate(&config(), tmp.path()).unwrap());

    let outputs = [
        tmp.path().join("_build/index.html"),
        tmp.path().join("_build/guides/install.html"),
        tmp.path().join("_build/_static/styles.css"),
    ];
    let before: Vec<_> = outputs.iter().map(|p| mtime(p)).collect();

    assert!(!generate(&config(), tmp.path()).unwrap());
    let after: Vec<_> = outputs.iter().map(|p| mtime(p)).collect();
    assert_eq!(before, after);
}

#[test]
fn touching_one_document_rebuilds_exactly_that_artifact() {
    let tmp = project();
    let other = write_old(tmp.path(), "about.md", "---\ntitle: About\n---\n\ntext\n");

    generate(&config(), tmp.path()).unwrap();
    let index_out = tmp.path().join("_build/index.html");
    let about_out = tmp.path().join("_build/about.html");
    let index_before = mtime(&index_out);
    let about_before = mtime(&about_out);

    touch(&other);
    assert!(generate(&config(), tmp.path()).unwrap());

    assert_eq!(mtime(&index_out), index_before, "index.html was rebuilt");
    assert_ne!(mtime(&about_out), about_before, "about.html was not rebuilt");
}

#[test]
fn touching_a_template_rebuilds_its_documents_and_no_others() {
    let tmp = project();
    let guide_tpl = write_old(tmp.path(), "_templates/guide.html", "G:{{ BODY }}");
    write_old(
        tmp.path(),
        "a.md",
        "---\ntitle: A\ntemplate: guide\n---\n\ntext\n",
    );
    write_old(
        tmp.path(),
        "b.md",
        "---\ntitle: B\ntemplate: guide\n---\n\ntext\n",
    );

    generate(&config(), tmp.path()).unwrap();
    let index_out = tmp.path().join("_build/index.html");
    let a_out = tmp.path().join("_build/a.html");
    let b_out = tmp.path().join("_build/b.html");
    let index_before = mtime(&index_out);
    let a_before = mtime(&a_out);
    let b_before = mtime(&b_out);

    touch(&guide_tpl);
    assert!(generate(&config(), tmp.path()).unwrap());

    assert_eq!(mtime(&index_out), index_before, "default-template doc rebuilt");
    assert_ne!(mtime(&a_out), a_before, "guide doc a not rebuilt");
    assert_ne!(mtime(&b_out), b_before, "guide doc b not rebuilt");
}

#[test]
fn malformed_document_aborts_with_no_partial_output() {
    let tmp = TempDir::new().unwrap();
    write_old(tmp.path(), "_templates/default.html", DEFAULT_TPL);
    write_old(tmp.path(), "broken.md", "# No front matter here\n");

    assert!(generate(&config(), tmp.path()).is_err());
    assert!(!tmp.path().join("_build/broken.html").exists());
}

#[test]
fn root_prefix_matches_document_depth() {
    let tmp = project();
    write_old(tmp.path(), "a/b/deep.md", "---\ntitle: Deep\n---\n\ntext\n");

    generate(&config(), tmp.path()).unwrap();

    let index = fs::read_to_string(tmp.path().join("_build/index.html")).unwrap();
    assert!(index.contains("<base href=\".\">"), "{index}");

    let deep = fs::read_to_string(tmp.path().join("_build/a/b/deep.html")).unwrap();
    assert!(deep.contains("<base href=\"../..\">"), "{deep}");
}

#[test]
fn stale_static_asset_is_recopied() {
    let tmp = project();
    let css = write_old(tmp.path(), "_static/styles.css", "body {}");

    generate(&config(), tmp.path()).unwrap();
    let out = tmp.path().join("_build/_static/styles.css");
    assert_eq!(fs::read_to_string(&out).unwrap(), "body {}");

    fs::write(&css, "body { margin: 0 }").unwrap();
    touch(&css);
    assert!(generate(&config(), tmp.path()).unwrap());
    assert_eq!(fs::read_to_string(&out).unwrap(), "body { margin: 0 }");
}

#[test]
fn deleted_output_is_rebuilt() {
    let tmp = project();
    generate(&config(), tmp.path()).unwrap();

    let out = tmp.path().join("_build/index.html");
    fs::remove_file(&out).unwrap();

    assert!(generate(&config(), tmp.path()).unwrap());
    assert!(out.is_file());
}
