use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use tempfile::tempdir;

use storyline::StorylineError;
use storyline_cli::{Args, run};

/// Corpora live at the workspace root, relative to workspace not the crate
fn corpora_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("corpora")
}

/// Collects all .xml files from a directory
fn collect_xml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("xml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output: &Path, extra: &[&str]) -> Args {
    let mut argv = vec![
        "storyline".to_string(),
        input.to_string_lossy().to_string(),
        "--output".to_string(),
        output.to_string_lossy().to_string(),
        "--log-level".to_string(),
        "off".to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    Args::parse_from(argv)
}

#[test]
fn e2e_smoke_test_valid_corpora() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let corpora = collect_xml_files(corpora_dir());

    assert!(!corpora.is_empty(), "No corpora found in corpora/");

    let mut failed = Vec::new();
    for corpus_path in &corpora {
        let stem = corpus_path.file_stem().unwrap().to_string_lossy();
        let svg_path = temp_dir.path().join(format!("{stem}.svg"));
        let json_path = temp_dir.path().join(format!("{stem}.json"));

        if let Err(e) = run(&args(corpus_path, &svg_path, &[])) {
            failed.push((corpus_path.clone(), e));
            continue;
        }
        if let Err(e) = run(&args(corpus_path, &json_path, &["--format", "json"])) {
            failed.push((corpus_path.clone(), e));
            continue;
        }

        let svg = fs::read_to_string(&svg_path).unwrap();
        assert!(svg.contains("</svg>"), "{} produced incomplete SVG", stem);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert!(json["positions"].is_array());
    }

    if !failed.is_empty() {
        eprintln!("\nValid corpora that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid corpora failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_corpora() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let corpora = collect_xml_files(corpora_dir().join("errors"));

    assert!(!corpora.is_empty(), "No error corpora found in corpora/errors/");

    let mut unexpectedly_succeeded = Vec::new();
    for corpus_path in &corpora {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            corpus_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(corpus_path, &output_path, &[])) {
            Ok(()) => unexpectedly_succeeded.push(corpus_path.clone()),
            Err(err) => assert!(
                matches!(err, StorylineError::Load { .. }),
                "{}: expected a load error, got {err}",
                corpus_path.display()
            ),
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError corpora that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error corpora succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_actor_filter_and_steps() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = corpora_dir().join("odyssey.xml");
    let output = temp_dir.path().join("penelope.json");

    run(&args(
        &input,
        &output,
        &["--actors", "Penelope", "--format", "json", "--steps", "1"],
    ))
    .expect("Filtered run should succeed");

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["positions"].as_array().unwrap().len(), 1);
    assert_eq!(json["positions"][0]["speech_id"], "TS5");
    assert_eq!(json["max_visible_index"], 0);
}

#[test]
fn e2e_orphans_are_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = corpora_dir().join("orphans.xml");
    let output = temp_dir.path().join("orphans.json");

    run(&args(&input, &output, &["--format", "json"])).expect("Orphans are not fatal");

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["orphans"], serde_json::json!(["TS4"]));
    assert_eq!(json["max_visible_index"], 1);
}

#[test]
fn e2e_unknown_actor_and_anchor_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = corpora_dir().join("odyssey.xml");
    let output = temp_dir.path().join("out.svg");

    let err = run(&args(&input, &output, &["--actors", "Cyclops"])).unwrap_err();
    assert!(matches!(err, StorylineError::Config(_)));
    let message = err.to_string();
    assert!(message.contains("Cyclops"));
    assert!(message.contains("TA2 (Penelope)"));

    let err = run(&args(&input, &output, &["--anchor", "TS99"])).unwrap_err();
    assert!(matches!(err, StorylineError::Layout(_)));
}
