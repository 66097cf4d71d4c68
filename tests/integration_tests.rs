mod common;

use assert_cmd::Command;
use common::{config_path, create_fake_pdf_files, create_temp_directory, TEST_API_KEY};
use predicates::prelude::*;
use std::fs;

/// Command with a throwaway config location and no ambient API key.
fn pdf_squeeze(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pdf-squeeze").unwrap();
    cmd.env("PDF_SQUEEZE_CONFIG", config);
    cmd.env_remove("ILOVEPDF_PUBLIC_KEY");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("pdf-squeeze").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("pdf-squeeze").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pdf-squeeze"));
}

#[test]
fn test_set_api_key_rejects_bad_prefix() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.args(["--set-api-key", "foo"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API key"));
    assert!(!config.exists());
}

#[test]
fn test_set_api_key_persists_for_later_runs() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.args(["--set-api-key", TEST_API_KEY]);
    cmd.assert().success();

    let body = fs::read_to_string(&config).unwrap();
    assert!(body.contains(TEST_API_KEY));

    // a later run without --set-api-key picks the key up from the
    // config file (exits 0 before any network call: no input files)
    let mut cmd = pdf_squeeze(&config);
    cmd.assert().success();
}

#[test]
fn test_missing_api_key_is_reported() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.arg("nonexistent.pdf");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("needs an iLovePDF public key"));
}

#[test]
fn test_no_input_files_ignored_by_default() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_no_input_files_error_policy() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.args(["--on-no-files", "error"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No input files provided"));
}

#[test]
fn test_bad_files_rejected_before_any_network_call() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.args(["foo.svg", "bar.png"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unexpected extension"));
}

#[test]
fn test_bad_files_warn_policy_proceeds() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    // only bad files: after the warning nothing is left to compress,
    // which the default no-files policy ignores
    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.args(["foo.svg", "baz.png", "--on-bad-files", "warn"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("without a PDF extension"));
}

#[test]
fn test_bad_files_ignore_policy_is_silent() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.args(["foo.svg", "--on-bad-files", "ignore"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_empty_suffix_without_inplace_is_rejected() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());
    let pdfs = create_fake_pdf_files(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.env("ILOVEPDF_PUBLIC_KEY", TEST_API_KEY);
    cmd.args(["--suffix", ""]);
    cmd.arg(pdfs[0].as_os_str());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("compressed in-place"));
}

#[test]
fn test_inplace_conflicts_with_suffix() {
    let temp_dir = create_temp_directory();
    let config = config_path(temp_dir.path());

    let mut cmd = pdf_squeeze(&config);
    cmd.args(["-i", "-s", "-small", "a.pdf"]);
    cmd.assert().failure();
}
