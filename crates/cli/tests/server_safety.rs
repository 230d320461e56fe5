use assert_cmd::prelude::*;
use std::process::Command;

const SETTINGS_ENV: [&str; 4] = ["SF_CLIENT_ID", "SF_CLIENT_SECRET", "SF_USERNAME", "SF_PASSWORD"];

fn journey_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("journey"));
    for key in SETTINGS_ENV {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn serve_http_refuses_non_loopback_without_public() {
    journey_cmd()
        .args(["serve-http", "--bind", "0.0.0.0:0"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Refusing to bind"));
}

#[test]
fn build_without_settings_prints_failure_envelope() {
    journey_cmd()
        .args(["build", "--contact-id", "003xyz"])
        .assert()
        .failure()
        .stdout(predicates::str::contains(r#""success":false"#))
        .stdout(predicates::str::contains(
            "Missing Salesforce environment variables: SF_CLIENT_ID, SF_CLIENT_SECRET, SF_USERNAME, SF_PASSWORD",
        ));
}

#[test]
fn auth_without_settings_reports_missing_keys() {
    journey_cmd()
        .arg("auth")
        .assert()
        .failure()
        .stdout(predicates::str::contains(r#""success":false"#))
        .stdout(predicates::str::contains(r#""timestamp":"#));
}
