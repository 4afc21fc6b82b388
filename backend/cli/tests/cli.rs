use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestEnv {
    tmp: TempDir,
    config_dir: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config_dir = tmp.path().join("config");
        fs::create_dir_all(&config_dir).expect("create config dir");
        Self { tmp, config_dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ocrbatch");
        cmd.env("OCRBATCH_CONFIG_DIR", &self.config_dir)
            .env("NO_COLOR", "1")
            .env_remove("OCRBATCH_CONFIG")
            .env_remove("OCRBATCH_LANGS")
            .env_remove("OCRBATCH_FORMAT")
            .env_remove("OCRBATCH_FAIL_FAST")
            .env_remove("OCRBATCH_LOG_DIR")
            .env_remove("OCRBATCH_LOG_LEVEL")
            .env_remove("RUST_LOG");
        cmd
    }

    fn dir(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn input_with(&self, files: &[&str]) -> PathBuf {
        let input = self.dir("input");
        fs::create_dir_all(&input).expect("create input dir");
        for name in files {
            fs::write(input.join(name), b"placeholder").expect("write fixture");
        }
        input
    }
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let env = TestEnv::new();
    env.cmd().assert().code(1).stderr(contains("Usage"));
}

#[test]
fn one_argument_exits_1_without_creating_output() {
    let env = TestEnv::new();
    let input = env.input_with(&[]);

    env.cmd().arg(&input).assert().code(1).stderr(contains("OUTPUT_DIR"));

    let entries: Vec<_> = fs::read_dir(env.tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 2, "only config and input dirs should exist");
}

#[test]
fn help_exits_0() {
    let env = TestEnv::new();
    env.cmd().arg("--help").assert().success().stdout(contains("INPUT_DIR"));
}

#[test]
fn empty_input_creates_empty_output_dir() {
    let env = TestEnv::new();
    let input = env.input_with(&[]);
    let output = env.dir("out").join("nested");

    env.cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Processed 0 of 0"));

    assert!(output.is_dir());
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn non_image_files_are_ignored() {
    let env = TestEnv::new();
    let input = env.input_with(&["notes.txt", "data.csv"]);
    let output = env.dir("out");

    env.cmd().arg(&input).arg(&output).assert().success();

    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn missing_input_dir_fails_without_creating_output() {
    let env = TestEnv::new();
    let output = env.dir("out");

    env.cmd()
        .arg(env.dir("does-not-exist"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(contains("directory not found"));

    assert!(!output.exists());
}

#[test]
fn invalid_config_file_fails() {
    let env = TestEnv::new();
    fs::write(env.config_dir.join("config.yaml"), "languages: [\"en g\"]\n").unwrap();
    let input = env.input_with(&[]);

    env.cmd()
        .arg(&input)
        .arg(env.dir("out"))
        .assert()
        .failure()
        .stderr(contains("Failed to load configuration"));
}

#[test]
fn bad_env_override_fails() {
    let env = TestEnv::new();
    let input = env.input_with(&[]);

    env.cmd()
        .env("OCRBATCH_FORMAT", "xml")
        .arg(&input)
        .arg(env.dir("out"))
        .assert()
        .failure()
        .stderr(contains("unknown output format"));
}

#[test]
fn extra_arguments_are_ignored() {
    let env = TestEnv::new();
    let input = env.input_with(&[]);
    let output = env.dir("out");

    env.cmd()
        .arg(&input)
        .arg(&output)
        .arg("extra")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(contains("Processed 0 of 0"));

    assert!(output.is_dir());
}

#[test]
fn input_dir_may_start_with_hyphen() {
    let env = TestEnv::new();
    fs::create_dir_all(env.dir("-scans")).unwrap();

    env.cmd()
        .current_dir(env.tmp.path())
        .arg("-scans")
        .arg("out")
        .assert()
        .success();

    assert!(env.dir("out").is_dir());
}
