//! Integration test: `dms demo` against the built binary

use std::process::{Command, Output};

fn run_dms(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dms"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run dms")
}

#[test]
fn test_demo_runs_all_steps() {
    let output = run_dms(&["demo"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    for step in [
        "[1] Mapping Internal Reservation => Google Reservation",
        "[2] Mapped Google Reservation:",
        "[3] Round-trip Mapped Internal Reservation:",
        "[4] Error Handling Demonstration",
    ] {
        assert!(stdout.contains(step), "missing step {step}");
    }
    assert!(stdout.contains("External ID: 1001"));
    assert!(stdout.contains("Error caught: MappingFailure"));
    assert!(stdout.contains("Message: Mapping execution failed"));
    assert!(stdout.contains("Details: Invalid room type: InvalidType"));
    assert!(stdout.contains("Demo complete."));
}

#[test]
fn test_demo_defaults_to_enhanced_profile() {
    let output = run_dms(&["demo"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // 249.99 EUR -> 269.9892 USD
    assert!(stdout.contains("Price: 249.99"));
    assert!(stdout.contains("Price: 269.99"));
}

#[test]
fn test_demo_standard_profile_keeps_prices() {
    let output = run_dms(&["--profile", "standard", "demo"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Price: 249.99"));
    assert!(!stdout.contains("Price: 269.99"));
}

#[test]
fn test_demo_with_missing_config_fails() {
    let output = run_dms(&["--config", "/nonexistent/dms.yaml", "demo"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read config file"));
}
