//! CLI tests for Filterkit
//!
//! This test suite covers:
//! - Help and version output
//! - The `mailto` subcommand and its flags
//! - The `render` subcommand with variables and includes
//! - Config file and environment overrides
//! - Exit codes for each error class

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper to get a command for testing
fn filterkit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("filterkit").unwrap();
    for var in [
        "FILTERKIT_CONFIG",
        "FILTERKIT_MAILTO_LINK",
        "FILTERKIT_MAILTO_PROTECT",
        "FILTERKIT_MAILTO_PLACEHOLDER",
        "FILTERKIT_LOG_LEVEL",
        "FILTERKIT_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    filterkit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("mailto"));
}

#[test]
fn test_version() {
    filterkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    filterkit_cmd().assert().failure();
}

// ============================================================================
// Mailto
// ============================================================================

#[test]
fn test_mailto_unprotected_link() {
    filterkit_cmd()
        .args(["mailto", "a@b.com", "--unprotected"])
        .assert()
        .success()
        .stdout("<a href=\"mailto:a@b.com\">a@b.com</a>\n");
}

#[test]
fn test_mailto_unprotected_plain() {
    filterkit_cmd()
        .args(["mailto", "a@b.com", "--unprotected", "--no-link", "--text", "Write us"])
        .assert()
        .success()
        .stdout("Write us\n");
}

#[test]
fn test_mailto_protected_hides_address() {
    filterkit_cmd()
        .args(["mailto", "someone@example.com", "--class", "btn"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<span id=\"e"))
        .stdout(predicate::str::contains("</script>"))
        .stdout(predicate::str::contains("someone@example.com").not())
        .stdout(predicate::str::contains("mailto").not());
}

#[test]
fn test_mailto_unsupported_characters_exit_code() {
    filterkit_cmd()
        .args(["mailto", "jörg@example.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be protected"))
        .stderr(predicate::str::contains("'ö'"));
}

#[test]
fn test_mailto_unsupported_characters_allowed_unprotected() {
    filterkit_cmd()
        .args(["mailto", "jörg@example.com", "--unprotected", "--no-link"])
        .assert()
        .success()
        .stdout("jörg@example.com\n");
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_with_vars() {
    let dir = tempdir().unwrap();
    let template = write(dir.path(), "page.txt", "Hello {{ name | uppercase }}!\n");
    let vars = write(dir.path(), "vars.yml", "name: Jack\n");

    filterkit_cmd()
        .arg("render")
        .arg(&template)
        .arg("--vars")
        .arg(&vars)
        .assert()
        .success()
        .stdout("Hello JACK!\n");
}

#[test]
fn test_render_json_and_toml_vars() {
    let dir = tempdir().unwrap();
    let template = write(dir.path(), "page.txt", "{{ title | truncate(5) }}");
    let json = write(dir.path(), "vars.json", r#"{"title": "Gordon Freeman"}"#);
    let toml = write(dir.path(), "vars.toml", "title = \"Gordon Freeman\"\n");

    for vars in [json, toml] {
        filterkit_cmd()
            .arg("render")
            .arg(&template)
            .arg("--vars")
            .arg(&vars)
            .assert()
            .success()
            .stdout("Gordo...");
    }
}

#[test]
fn test_render_includes_sibling_templates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "footer.html", "Contact: {{ 'a@b.com' | mailto }}");
    let page = write(dir.path(), "page.html", "<p>Hi</p>{% include 'footer.html' %}");

    filterkit_cmd()
        .arg("render")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<p>Hi</p>Contact: <span id="))
        .stdout(predicate::str::contains("a@b.com").not());
}

#[test]
fn test_render_missing_template() {
    filterkit_cmd()
        .args(["render", "does/not/exist.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_render_syntax_error_exit_code() {
    let dir = tempdir().unwrap();
    let template = write(dir.path(), "broken.txt", "{{ name ");

    filterkit_cmd()
        .arg("render")
        .arg(&template)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Template error"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_mailto_defaults() {
    let dir = tempdir().unwrap();
    let config = write(dir.path(), "filterkit.toml", "[mailto]\nprotect = false\n");

    filterkit_cmd()
        .args(["mailto", "a@b.com", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout("<a href=\"mailto:a@b.com\">a@b.com</a>\n");
}

#[test]
fn test_config_discovered_in_working_directory() {
    let dir = tempdir().unwrap();
    write(dir.path(), "filterkit.yaml", "mailto:\n  link: false\n  protect: false\n");

    filterkit_cmd()
        .current_dir(dir.path())
        .args(["mailto", "a@b.com"])
        .assert()
        .success()
        .stdout("a@b.com\n");
}

#[test]
fn test_config_values_reach_templates() {
    let dir = tempdir().unwrap();
    let config = write(
        dir.path(),
        "filterkit.json",
        r#"{"values": {"site": {"name": "Demo"}}, "translations": {"hello": "Hi :name"}}"#,
    );
    let template = write(
        dir.path(),
        "page.txt",
        "{{ config('site.name') }} {{ trans('hello', {'name': 'jack'}) }}",
    );

    filterkit_cmd()
        .arg("-c")
        .arg(&config)
        .arg("render")
        .arg(&template)
        .assert()
        .success()
        .stdout("Demo Hi jack");
}

#[test]
fn test_env_overrides_config() {
    filterkit_cmd()
        .env("FILTERKIT_MAILTO_PROTECT", "false")
        .env("FILTERKIT_MAILTO_LINK", "0")
        .args(["mailto", "a@b.com"])
        .assert()
        .success()
        .stdout("a@b.com\n");
}

#[test]
fn test_missing_config_file_exit_code() {
    filterkit_cmd()
        .args(["-c", "/nonexistent/filterkit.toml", "mailto", "a@b.com"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_invalid_config_value_exit_code() {
    let dir = tempdir().unwrap();
    let config = write(dir.path(), "filterkit.toml", "[mailto]\nid_prefix = \"9bad\"\n");

    filterkit_cmd()
        .args(["mailto", "a@b.com", "-c"])
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("id_prefix"));
}
