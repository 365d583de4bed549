use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn curriculum() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("curriculum");
    cmd.env_remove("RUST_LOG")
        .env_remove("CURRICULUM_DATA_DIR")
        .env_remove("CURRICULUM_LOG__LEVEL");
    cmd
}

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "curriculum.json",
        r#"{"superblocks": ["responsive-web-design"], "certifications": ["responsive-web-design", "legacy-front-end"]}"#,
    );
    write(
        tmp.path(),
        "superblocks/responsive-web-design.json",
        r#"{"name": "Responsive Web Design", "blocks": ["basic-html-and-html5"]}"#,
    );
    write(
        tmp.path(),
        "blocks/basic-html-and-html5.json",
        r#"{
            "name": "Basic HTML and HTML5",
            "helpCategory": "HTML-CSS",
            "blockLayout": "challenge-list",
            "blockLabel": "workshop",
            "challengeOrder": [
                {"id": "bd7123c8c441eddfaeb5bdef", "title": "Say Hello to HTML Elements"},
                {"id": "bad87fee1348bd9aedf08833", "title": "Headline with the h2 Element"}
            ]
        }"#,
    );
    tmp
}

#[test]
fn help_flag_exits_0_and_prints_usage() {
    curriculum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("curriculum"));
}

#[test]
fn check_prints_counts() {
    let tmp = fixture();
    curriculum()
        .args(["check", "-q", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Superblocks: 1"))
        .stdout(predicate::str::contains("Blocks: 1"))
        .stdout(predicate::str::contains("Challenges: 2"))
        .stdout(predicate::str::contains("legacy-front-end"))
        .stdout(predicate::str::contains("Ready: true"));
}

#[test]
fn block_prints_canonical_json() {
    let tmp = fixture();
    let output = curriculum()
        .args(["block", "basic-html-and-html5", "-q", "--data-dir", tmp.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let block: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(block["blockLayout"], "CHALLENGE_LIST");
    assert_eq!(block["blockLabel"], "WORKSHOP");
    assert_eq!(block["superblocks"][0], "responsive-web-design");
    assert!(block["template"].is_null());
}

#[test]
fn challenge_prints_owning_block() {
    let tmp = fixture();
    curriculum()
        .args(["challenge", "bd7123c8c441eddfaeb5bdef", "-q", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"block\": \"basic-html-and-html5\""));
}

#[test]
fn unknown_block_exits_1() {
    let tmp = fixture();
    curriculum()
        .args(["block", "ghost-block", "-q", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Block \"ghost-block\" not found"));
}

#[test]
fn load_failure_reports_file_and_field() {
    let tmp = fixture();
    write(
        tmp.path(),
        "superblocks/responsive-web-design.json",
        r#"{"blocks": ["basic-html-and-html5", "ghost-block"]}"#,
    );

    curriculum()
        .args(["curriculum", "-q", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ghost-block"))
        .stderr(predicate::str::contains("responsive-web-design.json"))
        .stderr(predicate::str::contains("field: blocks"));
}

#[test]
fn missing_data_dir_exits_1() {
    let tmp = TempDir::new().unwrap();
    curriculum()
        .args(["check", "-q", "--data-dir", tmp.path().join("absent").to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("curriculum.json"));
}

#[test]
fn missing_config_file_exits_1() {
    let tmp = fixture();
    curriculum()
        .args(["check", "--config", tmp.path().join("nope.yml").to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn data_dir_from_config_file() {
    let tmp = fixture();
    let config = tmp.path().join("config.yml");
    fs::write(
        &config,
        format!("data_dir: {}\nlog:\n  level: ERROR\n", tmp.path().display()),
    )
    .unwrap();

    curriculum()
        .args(["superblock", "responsive-web-design", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isCertification\": true"));
}

#[test]
fn malformed_config_names_the_file() {
    let tmp = fixture();
    let config = tmp.path().join("config.yml");
    fs::write(&config, "data_dir: [unclosed\n").unwrap();

    curriculum()
        .args(["check", "--config", config.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"))
        .stderr(predicate::str::contains("config.yml"));
}
