use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::io::Write;
use assert_cmd::Command;

fn checkout_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin!("checkout-flow"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_select_confirm_close() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = checkout_cmd();
    cmd.arg("--delay-ms")
        .arg("0")
        .write_stdin("select mobile_wallet\nconfirm\nclose\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "[confirm] disabled: Select a payment method",
        ))
        .stdout(predicate::str::contains("[*] Mobile wallet (mobile_wallet)"))
        .stdout(predicate::str::contains("[confirm] enabled: Confirm withdrawal"))
        .stdout(predicate::str::contains("[confirm] disabled: Processing..."))
        .stdout(predicate::str::contains("=== Payment pending ==="))
        .stdout(predicate::str::contains("Payment reference: REF-84920"))
        .stdout(predicate::str::contains("=== modal closed ==="));

    Ok(())
}

#[test]
fn test_cli_confirm_without_selection() {
    let mut cmd = checkout_cmd();
    cmd.write_stdin("confirm\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "! error: Select a payment method first.",
        ))
        .stdout(predicate::str::contains("Payment pending").not());
}

#[test]
fn test_cli_failed_submission() {
    let mut cmd = checkout_cmd();
    cmd.args(["--delay-ms", "0", "--fail"])
        .write_stdin("select bank_transfer\nconfirm\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "! error: Failed to process the request. Please try again.",
        ))
        .stdout(predicate::str::contains("Payment pending").not());
}

#[test]
fn test_cli_copy_falls_back_to_osc52() {
    let mut cmd = checkout_cmd();
    cmd.args(["--delay-ms", "0"])
        .write_stdin("select bank_transfer\nconfirm\ncopy account\nesc\n");

    cmd.assert()
        .success()
        // base64("ACC-12345")
        .stdout(predicate::str::contains("\x1b]52;c;QUNDLTEyMzQ1\x07"))
        .stdout(predicate::str::contains("[copied] account"))
        .stdout(predicate::str::contains("=== modal closed ==="));
}

#[test]
fn test_cli_rejects_unknown_input() {
    let mut cmd = checkout_cmd();
    cmd.write_stdin("select cash\ndance\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("? unknown payment method: cash"))
        .stdout(predicate::str::contains("? unknown command: dance"));
}

#[test]
fn test_cli_loads_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{ "options": [ {{ "id": "voucher", "label": "Voucher",
              "details": [ {{ "field": "code", "label": "Voucher code", "value": "V-777" }} ] }} ],
            "timings": {{ "processing_delay_ms": 0 }} }}"#
    )
    .unwrap();

    let mut cmd = checkout_cmd();
    cmd.arg("--config")
        .arg(config.path())
        .write_stdin("select voucher\nconfirm\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[*] Voucher (voucher)"))
        .stdout(predicate::str::contains("Voucher code: V-777 (copy code)"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{ "options": [] }}"#).unwrap();

    let mut cmd = checkout_cmd();
    cmd.arg("--config").arg(config.path()).write_stdin("quit\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at least one payment option"));
}

#[test]
fn test_cli_rejects_delay_beyond_timeout() {
    let mut cmd = checkout_cmd();
    cmd.args(["--delay-ms", "20000"]).write_stdin("quit\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "must be less than submit_timeout_ms",
        ));
}

#[cfg(not(feature = "system-clipboard"))]
#[test]
fn test_system_clipboard_fallback_warning() {
    let mut cmd = checkout_cmd();
    cmd.arg("--system-clipboard").write_stdin("quit\n");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "'system-clipboard' feature is not enabled",
        ));
}
