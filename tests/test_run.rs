use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tipmap::config::{RenameConfig, RenameOptions, TreeInput, TreeOutput};
use tipmap::rename::{RenameError, run};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn file_config(map: PathBuf, input: PathBuf, output: PathBuf) -> RenameConfig {
    RenameConfig::new(map)
        .with_input(TreeInput::File(input))
        .with_output(TreeOutput::File(output))
}

#[test]
fn test_run_renames_every_tree() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("renamed.nwk");
    let config = file_config(fixture("rails.map"), fixture("three_trees.nwk"), output.clone());

    let summary = run(&config).unwrap();

    assert_eq!(summary.trees, 3);
    assert_eq!(summary.renamed, 9);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "(Porphyrio_hochstetteri:1.5,Gallirallus_australis:0.5,(Pukeko:0.25,Spotless_Crake:0.75,Porphyrio_mantelli:1)Porphyrio:2);\n\
         ((Porphyrio_hochstetteri:1,Gallirallus_australis:1):0.5,(Pukeko:1,Spotless_Crake:2)Inner:0.5,Porphyrio_mantelli:3);\n\
         (Porphyrio_mantelli,(Porphyrio_hochstetteri,(Gallirallus_australis,(Pukeko,Spotless_Crake))));\n"
    );
}

#[test]
fn test_run_output_parses_back() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("renamed.nwk");
    let config = file_config(fixture("rails.map"), fixture("three_trees.nwk"), output.clone());
    run(&config).unwrap();

    let trees = tipmap::parse_newick_file(&output).unwrap();
    assert_eq!(trees.len(), 3);
    for tree in &trees {
        assert!(tree.tip_index().contains_name("Porphyrio_mantelli"));
        assert!(!tree.tip_index().contains_name("Moho"));
    }
}

#[test]
fn test_run_unknown_tip_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("renamed.nwk");
    let config = file_config(
        fixture("unknown_tip.map"),
        fixture("three_trees.nwk"),
        output.clone(),
    );

    let err = run(&config).unwrap_err();

    assert!(matches!(err, RenameError::UnknownTip { ref name } if name == "Kiwi"));
    // Output is opened before renaming, but no tree is written
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_run_malformed_map_fails_before_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("renamed.nwk");
    let config = file_config(fixture("malformed.map"), fixture("three_trees.nwk"), output.clone());

    let err = run(&config).unwrap_err();

    assert!(matches!(err, RenameError::Format { line: 2 }));
    assert!(!output.exists());
}

#[test]
fn test_run_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.nwk");
    let config = file_config(fixture("rails.map"), input.clone(), dir.path().join("out.nwk"));

    match run(&config).unwrap_err() {
        RenameError::Io { target, .. } => assert_eq!(target, input),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_run_unreadable_input() {
    // A directory opens fine on some platforms but every read fails
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trees");
    fs::create_dir(&input).unwrap();
    let output = dir.path().join("out.nwk");
    let config = file_config(fixture("rails.map"), input.clone(), output.clone());

    match run(&config).unwrap_err() {
        RenameError::Io { target, .. } => assert_eq!(target, input),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_run_invalid_newick() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.nwk");
    fs::write(&input, "(Takahe,Weka;\n").unwrap();
    let config = file_config(fixture("rails.map"), input, dir.path().join("out.nwk"));

    assert!(matches!(run(&config).unwrap_err(), RenameError::Parse(_)));
}

#[test]
fn test_run_strict_rejects_collision() {
    let dir = TempDir::new().unwrap();
    let map = dir.path().join("collide.map");
    fs::write(&map, "Takahe\tRail\nWeka\tRail\n").unwrap();
    let config = file_config(map, fixture("three_trees.nwk"), dir.path().join("out.nwk"))
        .with_options(RenameOptions { strict: true });

    let err = run(&config).unwrap_err();

    assert!(matches!(err, RenameError::NameCollision { ref name, .. } if name == "Rail"));
}
