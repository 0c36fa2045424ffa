//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passphrases are supplied through `LOCKBOX_PASSPHRASE` and
//! `LOCKBOX_NEW_PASSPHRASE` so no interactive prompt is needed.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lockbox").expect("binary should exist");
    cmd.env_remove("LOCKBOX_PASSPHRASE")
        .env_remove("LOCKBOX_NEW_PASSPHRASE")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: `lockbox init` in `dir` with the given payload file contents.
fn init_store(dir: &TempDir, payload: &str) {
    dir.child("payload.json").write_str(payload).unwrap();
    lockbox()
        .current_dir(dir.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .args(["init", "--input", "payload.json"])
        .assert()
        .success();
}

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Passphrase-protected encrypted blob store",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("cat"))
        .stdout(predicate::str::contains("write"))
        .stdout(predicate::str::contains("rekey"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn no_args_shows_help() {
    lockbox()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_then_cat_prints_payload() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "{\"Accounts\":[]}");
    tmp.child("lockbox.store").assert(predicate::path::exists());

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("cat")
        .assert()
        .success()
        .stdout("{\"Accounts\":[]}");
}

#[test]
fn init_refuses_existing_store() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "first");

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_enforces_min_passphrase_length() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));

    tmp.child("lockbox.store").assert(predicate::path::missing());
}

#[test]
fn cat_with_wrong_passphrase_fails() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "secret");

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "not the passphrase")
        .arg("cat")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn cat_on_missing_store_fails() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .args(["cat", "--file", "nope.store"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn write_from_stdin_replaces_payload() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "cleartext");

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("write")
        .write_stdin("updated cleartext")
        .assert()
        .success();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("cat")
        .assert()
        .success()
        .stdout("updated cleartext");
}

#[test]
fn rekey_changes_passphrase() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "cleartext");

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .env("LOCKBOX_NEW_PASSPHRASE", "Nur fuer den Dienstgebrauch")
        .arg("rekey")
        .assert()
        .success();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("verify")
        .assert()
        .failure();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Nur fuer den Dienstgebrauch")
        .arg("cat")
        .assert()
        .success()
        .stdout("cleartext");
}

#[test]
fn rekey_with_wrong_current_passphrase_fails() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "cleartext");

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "wrong wrong wrong")
        .env("LOCKBOX_NEW_PASSPHRASE", "Nur fuer den Dienstgebrauch")
        .arg("rekey")
        .assert()
        .failure()
        .stderr(predicate::str::contains("current passphrase is incorrect"));
}

#[test]
fn info_json_does_not_need_passphrase() {
    let tmp = TempDir::new().unwrap();
    init_store(&tmp, "0123456789");

    lockbox()
        .current_dir(tmp.path())
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": 1"))
        .stdout(predicate::str::contains("\"payload_len\": 10"));
}

#[test]
fn config_file_sets_default_store_path() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".lockbox.toml")
        .write_str("store_path = \"hill.store\"\n")
        .unwrap();

    lockbox()
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSPHRASE", "Staatsgeheimnis")
        .arg("init")
        .assert()
        .success();

    tmp.child("hill.store").assert(predicate::path::exists());
    tmp.child("lockbox.store").assert(predicate::path::missing());
}

#[test]
fn completions_for_unknown_shell_fail() {
    lockbox()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'csh'"));
}

#[test]
fn completions_script_names_the_binary() {
    lockbox()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}
