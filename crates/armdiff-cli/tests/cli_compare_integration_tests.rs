//! CLI compare integration tests
//!
//! These tests run the built binary against template files in a temporary
//! directory and inspect the exit status, stderr, and the written report.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn write_text(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn run_compare(left: &Path, right: &Path, output: &Path, config: Option<&Path>) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_armdiff-cli");
    let mut command = Command::new(cli_bin);
    command
        .arg("--left")
        .arg(left)
        .arg("--right")
        .arg(right)
        .arg("--output")
        .arg(output);
    if let Some(config) = config {
        command.arg("--config").arg(config);
    }
    command.output().expect("Failed to execute CLI")
}

fn storage(sku: &str) -> Value {
    json!({
        "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#",
        "resources": [{
            "type": "Microsoft.Storage/storageAccounts",
            "name": "acct1",
            "sku": {"name": sku},
            "dependsOn": ["[resourceId('Microsoft.Network/virtualNetworks', 'vnet')]"]
        }]
    })
}

#[test]
fn test_cli_compare_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&left, &right, &output_path, None);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Report written to"));

    let report = fs::read_to_string(&output_path).unwrap();
    assert!(report.starts_with("# Summary"));
    assert!(report.contains(
        "| Microsoft.Storage/storageAccounts | [acct1](#microsoftstoragestorageaccounts-acct1) | 4 | 2 | 1 |"
    ));
    assert!(report.contains("Standard_LRS"));
    assert!(report.contains("✗"));
    assert!(report.contains("## Ignored Properties"));
    assert!(report.contains("- dependsOn[0]"));
}

#[test]
fn test_cli_report_carries_line_numbers() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&left, &right, &output_path, None);
    assert!(output.status.success());

    let report = fs::read_to_string(&output_path).unwrap();
    let row = report
        .lines()
        .find(|line| line.starts_with("| sku.name |"))
        .unwrap();
    assert!(row.contains("Standard_LRS ("), "row without line number: {}", row);
    assert!(row.contains("Standard_GRS ("), "row without line number: {}", row);
}

#[test]
fn test_cli_missing_left_fails() {
    let temp_dir = TempDir::new().unwrap();
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&temp_dir.path().join("absent.json"), &right, &output_path, None);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("does not exist"));
    assert!(!output_path.exists(), "no report on failure");
}

#[test]
fn test_cli_missing_left_reported_before_missing_right() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(
        &temp_dir.path().join("left-missing.json"),
        &temp_dir.path().join("right-missing.json"),
        &output_path,
        None,
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("left-missing.json"));
    assert!(!stderr.contains("right-missing.json"));
}

#[test]
fn test_cli_malformed_json_fails() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_text(&temp_dir, "left.json", "{\"resources\": [");
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&left, &right, &output_path, None);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read JSON file"));
    assert!(!output_path.exists());
}

#[test]
fn test_cli_malformed_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let config = write_text(&temp_dir, "config.yaml", "ignoreRules: {not: [a list");
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&left, &right, &output_path, Some(&config));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read YAML config file"));
}

#[test]
fn test_cli_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(
        &left,
        &right,
        &output_path,
        Some(&temp_dir.path().join("config.yaml")),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("YAML config file"));
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_cli_unwritable_output_fails() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let output_path = temp_dir.path().join("no-such-dir").join("report.md");

    let output = run_compare(&left, &right, &output_path, None);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to write output file"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Report written"));
    assert!(!output_path.exists());
}

#[test]
fn test_cli_config_ignores_type_and_maps_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(
        &temp_dir,
        "left.json",
        &json!({"resources": [
            {"type": "Microsoft.Insights/components", "name": "ai", "kind": "web"},
            {"type": "Microsoft.Web/sites", "name": "app-dev-api", "kind": "app"},
            {"type": "Microsoft.KeyVault/vaults", "name": "kv-legacy"}
        ]}),
    );
    let right = write_json(
        &temp_dir,
        "right.json",
        &json!({"resources": [
            {"type": "Microsoft.Insights/components", "name": "ai", "kind": "other"},
            {"type": "Microsoft.Web/sites", "name": "app-prod-api", "kind": "app"}
        ]}),
    );
    let config = write_text(
        &temp_dir,
        "config.yaml",
        "ignoreRules:\n  - Microsoft.Insights/components\nresourceMappings:\n  - leftResourceTypePrefix: Microsoft.Web/sites\n    leftResourceNamePrefix: app-dev-\n    rightResourceTypePrefix: Microsoft.Web/sites\n    rightResourceNamePrefix: app-prod-\n",
    );
    let output_path = temp_dir.path().join("report.md");

    let output = run_compare(&left, &right, &output_path, Some(&config));
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = fs::read_to_string(&output_path).unwrap();
    assert!(!report.contains("Microsoft.Insights/components"));
    assert!(report.contains("[app-dev-api](#microsoftwebsites-app-dev-api)"));
    assert!(report.contains("Matched with: Microsoft.Web/sites / app-prod-api"));
    assert!(report.contains("## Unmatched Resources in Left Template"));
    assert!(report.contains("| Microsoft.KeyVault/vaults | kv-legacy |"));
    assert!(!report.contains("Unmatched Resources in Right Template"));
}

#[test]
fn test_cli_output_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let left = write_json(&temp_dir, "left.json", &storage("Standard_LRS"));
    let right = write_json(&temp_dir, "right.json", &storage("Standard_GRS"));
    let first = temp_dir.path().join("first.md");
    let second = temp_dir.path().join("second.md");

    assert!(run_compare(&left, &right, &first, None).status.success());
    assert!(run_compare(&left, &right, &second, None).status.success());

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}
