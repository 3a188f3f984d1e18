//! Integration tests for the `wgforge` CLI binary.
//!
//! Every test runs against its own temporary config and store, so the
//! user's real catalog is never read or written.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Build a [`Command`] for the `wgforge` binary with env isolation.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("wgforge");
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.path("config-home"))
            .env("XDG_DATA_HOME", self.path("data-home"))
            .env("WGFORGE_CONFIG", self.path("config.toml"))
            .env("WGFORGE_STORE", self.path("store.json"))
            .env_remove("WGFORGE_OUTPUT")
            .env_remove("WGFORGE_CONFIG_NAME")
            .env_remove("WGFORGE_DEFAULT_LOCATION")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success(), "{args:?} failed:\n{}", combined_output(&output));
        String::from_utf8(output.stdout).unwrap()
    }
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    Sandbox::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("locations")
            .and(predicate::str::contains("generate"))
            .and(predicate::str::contains("backup")),
    );
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wgforge"));
}

#[test]
fn test_completions_bash() {
    Sandbox::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Locations ───────────────────────────────────────────────────────

#[test]
fn test_locations_list_plain_shows_builtin_catalog() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout_of(&["locations", "list", "-o", "plain"]);
    let names: Vec<&str> = out.lines().collect();
    assert_eq!(names.len(), 12);
    assert_eq!(names[0], "Russia");
    assert!(names.contains(&"Czech Republic"));
}

#[test]
fn test_unknown_location_exits_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["locations", "show", "Atlantis"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Atlantis"));
}

#[test]
fn test_set_ips_keeps_order_and_duplicates() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["locations", "set-ips", "USA", " 1.1.1.1 ", "", "1.1.1.1", "2.2.2.2"])
        .assert()
        .success();

    let out = sandbox.stdout_of(&["locations", "show", "USA", "-o", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["ips"], serde_json::json!(["1.1.1.1", "1.1.1.1", "2.2.2.2"]));
    assert_eq!(json["countryCode"], "us");
    assert!(sandbox.path("store.json").exists());
}

// ── Generate ────────────────────────────────────────────────────────

#[test]
fn test_generate_stdout_renders_both_sections() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout_of(&["generate", "--stdout"]);
    assert!(out.starts_with("[Interface]\nPrivateKey = "));
    assert!(out.contains("Address = 10.8.0.2/24, fddd:2c4:2c4:2c4::2/64"));
    assert!(out.contains("\n\n[Peer]\nPublicKey = aB1cD2eF3gH4iJ5kL6mN7oP8qR9sT0uV1wX2yZ3aB4c="));
    assert!(out.contains("PersistentKeepalive = 25"));
    let endpoint = out.lines().find(|l| l.starts_with("Endpoint = ")).unwrap();
    assert!(
        ["192.0.2.10:51820", "198.51.100.10:51820", "203.0.113.10:51820"]
            .iter()
            .any(|e| endpoint.ends_with(e)),
        "unexpected {endpoint}"
    );
}

#[test]
fn test_generate_writes_named_file_and_refuses_overwrite() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["generate", "--name", "Home  Office", "--out-dir", "out", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home-Office.conf"));

    let written = std::fs::read_to_string(sandbox.path("out/Home-Office.conf")).unwrap();
    assert!(written.contains("[Peer]"));

    let output = sandbox
        .cmd()
        .args(["generate", "--name", "Home  Office", "--out-dir", "out"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));

    sandbox
        .cmd()
        .args(["generate", "--name", "Home  Office", "--out-dir", "out", "--force"])
        .assert()
        .success();
}

#[test]
fn test_generate_name_with_separators_stays_in_out_dir() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["generate", "-q", "--name", "../../x", "--out-dir", "a/b"])
        .assert()
        .success();
    assert!(sandbox.path("a/b/..-..-x.conf").exists());
    assert!(!sandbox.path("x.conf").exists());
}

#[test]
fn test_generate_default_file_name() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["generate", "-q"]).assert().success();
    assert!(sandbox.path("My-WireGuard-Config.conf").exists());
}

#[test]
fn test_generate_overrides_omit_empty_lines() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout_of(&[
        "generate",
        "--stdout",
        "--ipv6",
        "",
        "--mtu",
        "",
        "--no-keepalive",
        "--no-preshared-key",
        "--dns-preset",
        "google",
    ]);
    assert!(out.contains("Address = 10.8.0.2/24\n"));
    assert!(out.contains("DNS = 8.8.8.8, 8.8.4.4"));
    assert!(!out.contains("MTU"));
    assert!(!out.contains("PresharedKey"));
    assert!(!out.contains("PersistentKeepalive"));
}

#[test]
fn test_generate_empty_pool_omits_endpoint() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["locations", "set-ips", "Oman"]).assert().success();

    let output = sandbox
        .cmd()
        .args(["generate", "--location", "Oman", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout).unwrap();
    assert!(!out.contains("Endpoint"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--endpoint-ip"));

    let out = sandbox.stdout_of(&[
        "generate",
        "--location",
        "Oman",
        "--endpoint-ip",
        "10.0.0.1",
        "--stdout",
    ]);
    assert!(out.contains("Endpoint = 10.0.0.1:51820"));
}

#[test]
fn test_generate_missing_peer_key_is_a_precondition_failure() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["generate", "--peer-public-key", "", "--stdout"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_generate_self_server_reports_peer_private_key() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["generate", "--self-server", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Peer private key"));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("aB1cD2eF3gH4iJ5kL6mN7oP8qR9sT0uV1wX2yZ3aB4c="));
}

#[test]
fn test_generate_derives_public_key_from_given_private_key() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "generate",
            "--private-key",
            "dwdtCnMYpX08FsFyUbJmRd9ML4frwJkqsXf7pR25LCo=",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo="));
}

#[test]
fn test_configured_default_location_is_selected() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.path("config.toml"),
        "default_location = \"Japan\"\nconfig_name = \"From Config\"\n",
    )
    .unwrap();
    // Japan is not in the catalog: warn and stay on the first location.
    let out = sandbox.stdout_of(&["generate", "--stdout"]);
    assert!(out.contains("aB1cD2eF3gH4iJ5kL6mN7oP8qR9sT0uV1wX2yZ3aB4c="));

    std::fs::write(
        sandbox.path("config.toml"),
        "default_location = \"France\"\nconfig_name = \"From Config\"\n",
    )
    .unwrap();
    let out = sandbox.stdout_of(&["generate", "--stdout"]);
    assert!(out.contains("hI8jK9lM0nO1pQ2rS3tU4vW5xY6zZ7aB8c9dE0hL1mN="));

    sandbox.cmd().args(["generate", "-q"]).assert().success();
    assert!(sandbox.path("From-Config.conf").exists());
}

// ── Keys ────────────────────────────────────────────────────────────

#[test]
fn test_keys_pubkey_matches_known_vector() {
    Sandbox::new()
        .cmd()
        .args(["keys", "pubkey"])
        .write_stdin("dwdtCnMYpX08FsFyUbJmRd9ML4frwJkqsXf7pR25LCo=\n")
        .assert()
        .success()
        .stdout("hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo=\n");
}

#[test]
fn test_keys_pubkey_rejects_garbage() {
    let output = Sandbox::new()
        .cmd()
        .args(["keys", "pubkey"])
        .write_stdin("not a key")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_keys_generate_json() {
    let out = Sandbox::new().stdout_of(&["keys", "generate", "-o", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    for key in ["private_key", "public_key", "preshared_key"] {
        assert_eq!(json[key].as_str().unwrap().len(), 44, "{key}");
    }
}

// ── Backup ──────────────────────────────────────────────────────────

#[test]
fn test_backup_round_trip_through_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["locations", "set-ips", "USA", "9.9.9.9"])
        .assert()
        .success();
    sandbox.cmd().args(["backup", "export"]).assert().success();
    assert!(sandbox.path("wireguard-ips-backup.json").exists());

    sandbox
        .cmd()
        .args(["locations", "set-ips", "USA", "8.8.8.8"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["--yes", "backup", "restore", "wireguard-ips-backup.json"])
        .assert()
        .success();

    let out = sandbox.stdout_of(&["locations", "show", "USA", "-o", "plain"]);
    assert_eq!(out, "9.9.9.9\n");
}

#[test]
fn test_backup_restore_rejects_invalid_file_and_keeps_catalog() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path("bad.json"), r#"{"a":1}"#).unwrap();

    let output = sandbox
        .cmd()
        .args(["--yes", "backup", "restore", "bad.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let out = sandbox.stdout_of(&["locations", "list", "-o", "plain"]);
    assert_eq!(out.lines().count(), 12);
}

#[test]
fn test_backup_restore_check_changes_nothing() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.path("one.json"),
        r#"[{"name":"Lab","countryCode":"nl","ips":["10.1.1.1"]}]"#,
    )
    .unwrap();
    sandbox
        .cmd()
        .args(["backup", "restore", "one.json", "--check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 location"));

    let out = sandbox.stdout_of(&["locations", "list", "-o", "plain"]);
    assert_eq!(out.lines().count(), 12);
}

#[test]
fn test_backup_restore_requires_confirmation_when_not_interactive() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.path("one.json"),
        r#"[{"name":"Lab","countryCode":"nl","ips":["10.1.1.1"]}]"#,
    )
    .unwrap();
    let output = sandbox
        .cmd()
        .args(["backup", "restore", "one.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[test]
fn test_backup_restore_replaces_catalog_and_defaults_port() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.path("one.json"),
        r#"[{"name":"Lab","countryCode":"nl","ips":["10.1.1.1"],"serverPublicKey":"LAB="}]"#,
    )
    .unwrap();
    sandbox
        .cmd()
        .args(["-y", "backup", "restore", "one.json"])
        .assert()
        .success();

    let out = sandbox.stdout_of(&["generate", "--stdout"]);
    assert!(out.contains("PublicKey = LAB="));
    assert!(out.contains("Endpoint = 10.1.1.1:51820"));
}

#[test]
fn test_backup_export_stdout_is_json_array() {
    let out = Sandbox::new().stdout_of(&["backup", "export", "--stdout"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 12);
    assert_eq!(json[0]["name"], "Russia");
}

// ── Presets ─────────────────────────────────────────────────────────

#[test]
fn test_dns_presets_table() {
    Sandbox::new()
        .cmd()
        .args(["dns", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloudflare").and(predicate::str::contains("1.0.0.1")));
}

#[test]
fn test_address_presets_plain() {
    let out = Sandbox::new().stdout_of(&["addresses", "presets", "-o", "plain"]);
    assert!(out.lines().any(|l| l == "10.10.10.2/24"));
    assert!(out.lines().any(|l| l == "fd12:3456:789a:1::2/64"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_show_and_path() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["config", "init"]).assert().success();
    assert!(sandbox.path("config.toml").exists());

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .code(6);

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("config_name = \"My-WireGuard-Config\"")
                .and(predicate::str::contains("[tunnel]")),
        );

    let out = sandbox.stdout_of(&["config", "path", "-o", "plain"]);
    assert!(out.contains("config.toml"));
    assert!(out.contains("store.json"));
}

#[test]
fn test_man_writes_a_page_per_subcommand() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["man", "--out-dir", "man"]).assert().success();
    assert!(sandbox.path("man/wgforge.1").exists());
    let page = std::fs::read_to_string(sandbox.path("man/wgforge-generate.1")).unwrap();
    assert!(page.contains(".TH"));

    sandbox
        .cmd()
        .arg("man")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH"));
}
