#[path = "common/mod.rs"]
mod common;

use common::*;
use corpex::{
    CategoryDirs, CorpusExporter, ExportError, ExportOverrides, ExportState, Feed, SanitizeLevel,
    Scheme,
};
use std::fs;

#[test]
fn export_writes_partitioned_corpus_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .progress(false);

    exporter.export().unwrap();
    assert_eq!(exporter.state(), ExportState::Finished);

    // One directory and one JSON file per category.
    for c in CATEGORIES {
        assert!(root.join(c).is_dir(), "missing directory for '{c}'");
    }
    assert!(root.join("books").join("p-books.json").is_file());
    assert!(root.join("food").join("p-food.json").is_file());
    assert!(root.join("politics").join("p-politics.json").is_file());

    // Aggregate counts: N records over K categories.
    let counts = exporter.counts();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts.values().sum::<u64>(), 3);

    // README totals and alphabetical category listing.
    let readme = fs::read_to_string(root.join("README")).unwrap();
    assert!(readme.contains("3 feeds containing 3 posts in 3 categories."));
    let b = readme.find("- books: 1").unwrap();
    let f = readme.find("- food: 1").unwrap();
    let p = readme.find("- politics: 1").unwrap();
    assert!(b < f && f < p, "categories must be listed alphabetically");

    // feeds.json parses back into the feed metadata.
    let feeds: Vec<Feed> =
        serde_json::from_str(&fs::read_to_string(root.join("feeds.json")).unwrap()).unwrap();
    assert_eq!(feeds.len(), 3);
}

#[test]
fn export_with_category_filter_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .categories(["food"])
        .progress(false);

    exporter.export().unwrap();

    assert!(root.join("food").join("p-food.json").is_file());
    assert!(!root.join("books").exists());
    assert!(!root.join("politics").exists());
    assert_eq!(exporter.counts().len(), 1);

    let readme = fs::read_to_string(root.join("README")).unwrap();
    assert!(readme.contains("1 feeds containing 1 posts in 1 categories."));

    // The metadata dump is restricted to the requested categories too.
    let feeds: Vec<Feed> =
        serde_json::from_str(&fs::read_to_string(root.join("feeds.json")).unwrap()).unwrap();
    assert_eq!(feeds.len(), 1);
    assert_eq!(feeds[0].category, "food");
}

#[test]
fn html_scheme_writes_sanitized_pages() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut store = make_store_basic();
    store.add_feed(feed("f-evil", "Sketchy", "http://sketchy.example/feed", "evil"));
    store.add_post(post(
        "p-evil",
        "f-evil",
        "Sketchy Post",
        "http://sketchy.example/post",
        "<p onclick=\"boom()\">hello</p><script>alert(1)</script>",
    ));

    let mut exporter = CorpusExporter::new(store)
        .root(&root)
        .scheme(Scheme::Html)
        .progress(false);
    exporter.export().unwrap();

    let page = fs::read_to_string(root.join("evil").join("p-evil.html")).unwrap();
    assert!(page.contains("<title>Sketchy Post</title>"));
    assert!(page.contains("<p>hello</p>"), "event handler should be dropped");
    assert!(!page.contains("<script"), "script elements should be removed");
}

#[test]
fn overrides_win_for_one_run_only() {
    let dir = tempfile::tempdir().unwrap();
    let default_root = dir.path().join("default");
    let other_root = dir.path().join("other");
    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&default_root)
        .progress(false);

    exporter
        .export_with(
            ExportOverrides::default()
                .root(&other_root)
                .scheme(Scheme::Html)
                .sanitize_level(SanitizeLevel::Strip),
        )
        .unwrap();
    assert!(other_root.join("books").join("p-books.html").is_file());
    assert!(!default_root.exists(), "override run must not touch the default root");

    // The stored options are untouched: the next plain export uses them.
    exporter.export().unwrap();
    assert!(default_root.join("books").join("p-books.json").is_file());
}

#[test]
fn override_category_filter_is_not_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .progress(false);

    exporter
        .export_with(ExportOverrides::default().categories(["books"]))
        .unwrap();
    assert_eq!(exporter.counts().len(), 1);

    // A later unfiltered run still covers the whole store.
    exporter.export().unwrap();
    assert_eq!(exporter.counts().len(), 3);
}

#[test]
fn root_path_collision_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    fs::write(&root, "not a directory").unwrap();

    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .progress(false);
    match exporter.export() {
        Err(ExportError::NotADirectory(p)) => assert_eq!(p, root),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(()) => panic!("export into a file path must fail"),
    }
    // Failed before streaming: the run never started, let alone finished.
    assert_eq!(exporter.state(), ExportState::Init);
}

#[test]
fn category_path_collision_aborts_without_reports() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    fs::create_dir_all(&root).unwrap();
    // Occupy the first category's directory slot with a file.
    fs::write(root.join("books"), "collision").unwrap();

    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .progress(false);
    assert!(matches!(
        exporter.export(),
        Err(ExportError::NotADirectory(_))
    ));

    // The run aborted mid-stream: no summary files, state never Finished.
    assert_eq!(exporter.state(), ExportState::Started);
    assert!(!root.join("README").exists());
    assert!(!root.join("feeds.json").exists());

    // The doomed record was counted anyway: counting happens on iteration,
    // not on successful writes.
    assert_eq!(exporter.counts()["books"], 1);
}

#[test]
fn record_file_create_failure_surfaces_as_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut store = make_store_basic();
    // A record id with path separators points into a subdirectory that no
    // step of the export creates, so the file create fails.
    store.add_post(post(
        "missing/sub/p-odd",
        "f-books",
        "Odd One",
        "http://books.example/odd",
        "<p>odd</p>",
    ));

    let mut exporter = CorpusExporter::new(store).root(&root).progress(false);
    match exporter.export() {
        Err(ExportError::Write { path, source }) => {
            assert!(path.ends_with("missing/sub/p-odd.json"), "got {}", path.display());
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(()) => panic!("creating a record file in a missing subdirectory must fail"),
    }

    // Aborted mid-stream: no summaries, and the run never finished.
    assert_eq!(exporter.state(), ExportState::Started);
    assert!(!root.join("README").exists());
    assert!(!root.join("feeds.json").exists());
}

#[test]
fn category_dir_resolution_is_idempotent_and_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let mut dirs = CategoryDirs::new();

    let first = dirs.dir_for(dir.path(), "books").unwrap().to_path_buf();
    assert!(first.is_dir());

    // Remove the directory behind the cache's back: the memoized path must
    // come back identical without a second creation.
    fs::remove_dir(&first).unwrap();
    let second = dirs.dir_for(dir.path(), "books").unwrap().to_path_buf();
    assert_eq!(first, second);
    assert!(!second.exists(), "second resolution must not re-create the directory");
}

#[test]
fn export_overwrites_existing_record_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("corpus");
    let mut exporter = CorpusExporter::new(make_store_basic())
        .root(&root)
        .progress(false);

    exporter.export().unwrap();
    let path = root.join("books").join("p-books.json");
    fs::write(&path, "stale").unwrap();

    exporter.export().unwrap();
    let fresh = fs::read_to_string(&path).unwrap();
    assert_ne!(fresh, "stale");
    assert!(fresh.contains("\"id\": \"p-books\""));
}
