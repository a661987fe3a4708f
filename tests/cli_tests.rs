//! CLI integration tests for safelist_scanner.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn scanner_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_safelist_scanner"))
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_cli_help() {
    let output = scanner_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--check"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_cli_version() {
    let output = scanner_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(output.status.success());
}

#[test]
fn test_cli_writes_safelist_and_summary() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "src/App.tsx", r#"<div className="flex items-center p-4">"#);
    let output_file = temp_dir.path().join("out/safelist.json");

    let output = scanner_cmd()
        .current_dir(temp_dir.path())
        .arg("src")
        .arg("--output")
        .arg(&output_file)
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 3 unique classes"));
    assert!(stdout.contains("Results saved to"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing:"));

    let content = fs::read_to_string(&output_file).unwrap();
    assert_eq!(
        content,
        "{\n  \"safelist\": [\n    \"flex\",\n    \"items-center\",\n    \"p-4\"\n  ]\n}"
    );
}

#[test]
fn test_cli_unreadable_file_keeps_exit_status() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "src/App.tsx", r#"<div className="grid">"#);
    fs::write(temp_dir.path().join("src/Bad.tsx"), [0xff, 0xfe, 0x00]).unwrap();

    let output = scanner_cmd()
        .current_dir(temp_dir.path())
        .args(["src", "-o", "safelist.json"])
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipped 1 unreadable files"));
    assert!(stdout.contains("Read 50.0% of files"));
    assert!(temp_dir.path().join("safelist.json").exists());
}

#[test]
fn test_cli_missing_source_dir() {
    let temp_dir = tempdir().unwrap();

    let output = scanner_cmd()
        .current_dir(temp_dir.path())
        .args(["does-not-exist", "-o", "safelist.json"])
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
    assert!(!temp_dir.path().join("safelist.json").exists());
}

#[test]
fn test_cli_check_mode() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "src/App.tsx", r#"<div className="grid gap-2">"#);

    let check = || {
        scanner_cmd()
            .current_dir(temp_dir.path())
            .args(["src", "-o", "safelist.json", "--check"])
            .output()
            .expect("Failed to execute safelist_scanner")
    };

    let stale = check();
    assert!(!stale.status.success());
    assert!(String::from_utf8_lossy(&stale.stderr).contains("out of date"));
    assert!(!temp_dir.path().join("safelist.json").exists());

    let generated = scanner_cmd()
        .current_dir(temp_dir.path())
        .args(["src", "-o", "safelist.json"])
        .output()
        .expect("Failed to execute safelist_scanner");
    assert!(generated.status.success());

    let fresh = check();
    assert!(fresh.status.success());
    assert!(String::from_utf8_lossy(&fresh.stdout).contains("up to date"));
}

#[test]
fn test_cli_reads_config_file() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "web/src/Page.vue", r#"<div class="Card card-body">"#);
    write(
        temp_dir.path(),
        "web/safelist.toml",
        "source_dir = \"src\"\noutput_file = \"config/safelist.json\"\n\n[filter]\nallow_uppercase = true\n",
    );

    let output = scanner_cmd()
        .current_dir(temp_dir.path())
        .args(["--config", "web/safelist.toml"])
        .output()
        .expect("Failed to execute safelist_scanner");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let content = fs::read_to_string(temp_dir.path().join("web/config/safelist.json")).unwrap();
    assert!(content.contains("\"Card\""));
    assert!(content.contains("\"card-body\""));
}
