mod common;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_writes_default_config() {
    let fixture = TestFixture::new();

    fixture.command().arg("init").assert().success();

    let content = fs::read_to_string(fixture.data_dir().join("confcat.toml")).unwrap();
    assert!(content.contains("write_msgpack = true"));
    assert!(content.contains("slug_collisions = \"suffix\""));

    fixture
        .command()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fixture.command().args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_disables_msgpack() {
    let fixture = TestFixture::new();
    fs::write(
        fixture.data_dir().join("confcat.toml"),
        "[store]\nwrite_msgpack = false\n",
    )
    .unwrap();

    fixture.run_captures().unwrap();

    assert!(fixture.data_dir().join("sessions.json").exists());
    assert!(!fixture.data_dir().join("sessions.msgpack").exists());
}

#[test]
fn test_config_relocates_reports() {
    let fixture = TestFixture::new();
    fs::write(
        fixture.data_dir().join("confcat.toml"),
        "[reports]\ndir = \"out\"\n",
    )
    .unwrap();

    fixture.run_captures().unwrap();

    assert!(fixture.data_dir().join("out/roles/distribution.csv").exists());
    assert!(!fixture.reports_dir().exists());
}

#[test]
fn test_capture_pattern_from_config() {
    let fixture = TestFixture::new();
    fs::write(
        fixture.data_dir().join("confcat.toml"),
        "[capture]\nendpoint_pattern = \"api/attributes\"\n",
    )
    .unwrap();

    fixture.run_captures().unwrap();

    let value = fixture.json(&["session", "search"]);
    assert_eq!(value["total"], 1);
    assert_eq!(value["items"][0]["code"], "ATTR");
}

#[test]
fn test_init_json_output() {
    let fixture = TestFixture::new();

    let value = fixture.json(&["init"]);
    let config = fixture.data_dir().join("confcat.toml");
    assert_eq!(value["config"], config.to_str().unwrap());
    assert_eq!(value["overwritten"], false);

    let value = fixture.json(&["init", "--force"]);
    assert_eq!(value["overwritten"], true);
}
