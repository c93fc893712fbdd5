use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(db: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jeach"))
        .arg("--db")
        .arg(db)
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .expect("run jeach")
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn first_run_seeds_then_prints_four_passes() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("demo.db");
    let out = run(&db, &["--rows", "4", "--seed", "11"]);
    assert!(out.status.success());
    let text = stdout(&out);

    assert!(text.starts_with("...."), "{text}");
    assert!(db.exists());
    assert!(text.contains("All rows in the table.\n"));
    assert!(text.contains("'WRONG' id"));
    assert!(text.contains("uses `rowid`"));
    assert!(text.contains("SELECT DISTINCT"));
    for id in 1..=4 {
        assert!(text.contains(&format!("\t{id} : [")), "missing row {id}");
    }
}

#[test]
fn second_run_skips_seeding_and_prints_the_same() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("demo.db");
    let first = stdout(&run(&db, &["--rows", "3", "--seed", "5"]));
    let second = stdout(&run(&db, &["--rows", "3", "--seed", "6"]));

    assert!(!second.starts_with('.'));
    assert_eq!(first.trim_start_matches('.'), second);
}

#[test]
fn exact_mode_prints_the_same_matches() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("demo.db");
    let pattern = stdout(&run(&db, &["--seed", "3"]));
    let exact = stdout(&run(&db, &["--exact"]));
    assert_eq!(pattern.trim_start_matches('.'), exact);
}

#[test]
fn bad_table_name_fails() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("demo.db");
    let out = run(&db, &["--table", "no-dashes"]);
    assert!(!out.status.success());
    assert!(!db.exists());
}
