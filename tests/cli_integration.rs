//! Integration tests for CLI commands.
//!
//! Provider settings are blanked in the environment and the binary runs
//! outside the project tree, so a developer's `.env` cannot switch a test
//! out of demo mode and every test stays off the network.

use assert_cmd::Command;
use predicates::prelude::*;

/// Settings a `.env` file could otherwise supply; blank counts as absent
const PROVIDER_VARS: &[&str] = &[
    "HUGGINGFACE_API_KEY",
    "OPENAI_API_KEY",
    "HUGGINGFACE_ENDPOINT",
    "OPENAI_ENDPOINT",
];

/// Get a Command for the pollyglot binary in demo mode
fn pollyglot() -> Command {
    let mut cmd = Command::cargo_bin("pollyglot").unwrap();
    for var in PROVIDER_VARS {
        cmd.env(var, "");
    }
    cmd.env_remove("RUST_LOG").current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_help_command() {
    pollyglot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("languages"));
}

#[test]
fn test_version_command() {
    pollyglot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pollyglot"));
}

#[test]
fn test_translate_known_phrase_in_demo_mode() {
    pollyglot()
        .args(["translate", "Hello", "--target-lang", "fr"])
        .assert()
        .success()
        .stdout("Bonjour\n");
}

#[test]
fn test_translate_accepts_language_name() {
    pollyglot()
        .args(["translate", "Goodbye", "-t", "Spanish"])
        .assert()
        .success()
        .stdout("Adiós\n");
}

#[test]
fn test_translate_unknown_phrase_prints_placeholder() {
    pollyglot()
        .args(["translate", "Hello", "-t", "de"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello").and(predicate::str::contains("German")));
}

#[test]
fn test_translate_blank_text_fails() {
    pollyglot()
        .args(["translate", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to translate"));
}

#[test]
fn test_languages_lists_catalog() {
    pollyglot()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("* fr  French"))
        .stdout(predicate::str::contains("  ko  Korean"));
}

#[test]
fn test_chat_session_over_stdin() {
    pollyglot()
        .args(["chat", "-t", "es"])
        .write_stdin("Thank you\n\n/lang ja\nPlease\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Select the language"))
        .stdout(predicate::str::contains("🦜 Gracias"))
        .stdout(predicate::str::contains("🦜 お願いします"));
}

#[test]
fn test_chat_rejects_unknown_language() {
    pollyglot()
        .args(["chat", "-t", "tlh"])
        .write_stdin("/quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown language code"));
}

#[test]
fn test_blank_key_flag_stays_in_demo_mode() {
    pollyglot()
        .args(["--huggingface-api-key", "", "translate", "Hello", "-t", "fr"])
        .env("RUST_LOG", "pollyglot=info")
        .assert()
        .success()
        .stdout("Bonjour\n")
        .stderr(predicate::str::contains("demo mode"));
}
