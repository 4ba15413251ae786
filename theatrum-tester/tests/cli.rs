use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "theatrum-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_theatrum-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("happy-path"));
    assert!(content.contains("upsell-price-drift"));
}

#[test]
fn cli_runs_every_logic_scenario_as_json() {
    let exe = env!("CARGO_BIN_EXE_theatrum-tester");
    let output_path = temp_path("all");
    let status = Command::new(exe)
        .args([
            "--scenarios",
            "all",
            "--seeds",
            "1,0x2a",
            "--iterations",
            "3",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let runs = results.as_array().expect("array of results");
    assert_eq!(runs.len(), 16);
    assert!(runs.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_survives_unknown_browser() {
    let exe = env!("CARGO_BIN_EXE_theatrum-tester");
    let output_path = temp_path("browser");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown browser"));
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_theatrum-tester");
    let output = Command::new(exe)
        .args(["--seeds", "popcorn"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
