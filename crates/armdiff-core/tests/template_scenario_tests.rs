#![allow(clippy::unwrap_used, clippy::expect_used)]

use armdiff_core::compare::PropertyStatus;
use armdiff_core::{
    compute_template_diff, render_report, CompareConfig, Document, ResourceKey, ResourceMapping,
};
use serde_json::{json, Value};
use std::path::Path;

fn doc(root: Value) -> Document {
    Document::from_value(&root)
}

fn config(yaml: &str) -> CompareConfig {
    CompareConfig::parse(yaml, Path::new("config.yaml")).unwrap()
}

#[test]
fn test_scenario_a_single_property_difference() {
    // Scenario: same key on both sides, one differing SKU, no config
    let left = doc(json!({"resources": [{
        "type": "Microsoft.Storage/storageAccounts",
        "name": "acct1",
        "sku": {"name": "Standard_LRS"}
    }]}));
    let right = doc(json!({"resources": [{
        "type": "Microsoft.Storage/storageAccounts",
        "name": "acct1",
        "sku": {"name": "Standard_GRS"}
    }]}));

    let diff = compute_template_diff(&left, &right, &CompareConfig::default()).unwrap();

    assert_eq!(diff.compared.len(), 1);
    let resource = &diff.compared[0];
    assert_eq!((resource.total, resource.correct, resource.incorrect), (3, 2, 1));
    let sku = resource
        .properties
        .iter()
        .find(|p| p.path == "sku.name")
        .unwrap();
    assert_eq!(sku.status(), PropertyStatus::Different);
    assert!(diff.ignored_properties.is_empty());
    assert!(diff.unmatched_left.is_empty() && diff.unmatched_right.is_empty());

    let report = render_report(&diff);
    assert!(report.contains("| sku.name | Standard_LRS | Standard_GRS | ✗ |"));
    assert!(!report.contains("dependsOn"));
}

#[test]
fn test_scenario_b_prefix_mapping_pairs_resources() {
    let left = doc(json!({"resources": [{"type": "A", "name": "x1", "v": 1}]}));
    let right = doc(json!({"resources": [{"type": "A", "name": "y1", "v": 1}]}));
    let config = config(
        "resourceMappings:\n  - leftResourceTypePrefix: A\n    leftResourceNamePrefix: x\n    rightResourceTypePrefix: A\n    rightResourceNamePrefix: y\n",
    );
    assert!(matches!(
        config.resource_mappings[0],
        ResourceMapping::Prefix { .. }
    ));

    let diff = compute_template_diff(&left, &right, &config).unwrap();

    assert_eq!(diff.compared.len(), 1);
    assert_eq!(diff.compared[0].key, ResourceKey::new("A", "x1"));
    assert_eq!(diff.compared[0].right_key, ResourceKey::new("A", "y1"));
    assert!(diff.unmatched_left.is_empty());
    assert!(diff.unmatched_right.is_empty());

    let report = render_report(&diff);
    assert!(report.contains("Matched with: A / y1"));
    assert!(report.contains("| name | x1 | y1 | ✗ |"));
}

#[test]
fn test_scenario_c_ignored_type_excluded_from_report() {
    let insights = json!({"type": "Microsoft.Insights/components", "name": "ai", "kind": "web"});
    let storage = json!({"type": "Microsoft.Storage/storageAccounts", "name": "acct1"});
    let left = doc(json!({"resources": [insights.clone(), storage.clone()]}));
    let mut changed = insights;
    changed["kind"] = json!("other");
    let right = doc(json!({"resources": [changed, storage]}));

    let diff = compute_template_diff(
        &left,
        &right,
        &config("ignoreRules:\n  - Microsoft.Insights/components\n"),
    )
    .unwrap();

    assert_eq!(diff.compared.len(), 1);
    assert_eq!(diff.compared[0].key.name, "acct1");
    assert!(diff.unmatched_left.is_empty());

    let report = render_report(&diff);
    assert!(!report.contains("Microsoft.Insights/components"));
}

#[test]
fn test_scenario_d_extra_left_resource_unmatched() {
    let shared = json!({"type": "A", "name": "shared"});
    let left = doc(json!({"resources": [shared.clone(), {"type": "B", "name": "extra"}]}));
    let right = doc(json!({"resources": [shared]}));

    let diff = compute_template_diff(&left, &right, &CompareConfig::default()).unwrap();

    assert_eq!(diff.compared.len(), 1);
    assert_eq!(diff.unmatched_left, vec![ResourceKey::new("B", "extra")]);
    assert!(diff.unmatched_right.is_empty());

    let report = render_report(&diff);
    assert!(report.contains("## Unmatched Resources in Left Template"));
    assert!(report.contains("| B | extra |"));
    assert!(!report.contains("### Comparison for Resource: B / extra"));
}

#[test]
fn test_exact_mapping_wins_over_identity() {
    let left = doc(json!({"resources": [{"type": "A", "name": "old"}, {"type": "A", "name": "new"}]}));
    let right = doc(json!({"resources": [{"type": "A", "name": "new"}]}));
    let config = config(
        "resourceMappings:\n  - leftResourceType: A\n    leftResourceName: old\n    rightResourceType: A\n    rightResourceName: new\n",
    );

    let diff = compute_template_diff(&left, &right, &config).unwrap();

    assert_eq!(diff.compared.len(), 1);
    assert_eq!(diff.compared[0].key, ResourceKey::new("A", "old"));
    assert_eq!(diff.unmatched_left, vec![ResourceKey::new("A", "new")]);
}

#[test]
fn test_depends_on_ignored_implicitly() {
    let left = doc(json!({"resources": [{"type": "A", "name": "x", "dependsOn": ["p", "q"]}]}));
    let right = doc(json!({"resources": [{"type": "A", "name": "x", "dependsOn": ["r"]}]}));

    let diff = compute_template_diff(&left, &right, &CompareConfig::default()).unwrap();

    let resource = &diff.compared[0];
    assert_eq!(resource.incorrect, 0);
    assert_eq!(resource.ignored_count(), 2);
    assert!(diff.ignored_properties.contains("dependsOn[0]"));
    assert!(diff.ignored_properties.contains("dependsOn[1]"));
}

#[test]
fn test_colliding_anchors_disambiguated() {
    let left = doc(json!({"resources": [
        {"type": "A", "name": "my app"},
        {"type": "A", "name": "my-app"}
    ]}));
    let right = left.clone();

    let diff = compute_template_diff(&left, &right, &CompareConfig::default()).unwrap();

    let anchors: Vec<&str> = diff.compared.iter().map(|r| r.anchor.as_str()).collect();
    assert_eq!(anchors, vec!["a-my-app", "a-my-app-2"]);
    let report = render_report(&diff);
    assert!(report.contains("[my app](#a-my-app)"));
    assert!(report.contains("[my-app](#a-my-app-2)"));
}

#[test]
fn test_shell_patterns_with_double_star_and_open_bracket() {
    let left = doc(json!({"resources": [
        {"type": "A", "name": "x", "properties": {"a": {"b": 1}}, "zones": ["1"]}
    ]}));
    let right = doc(json!({"resources": [
        {"type": "A", "name": "x", "properties": {"a": {"b": 2}}, "zones": ["2"]}
    ]}));
    let config = config("ignoreRules:\n  - properties.**\n  - zones[*\n");

    let diff = compute_template_diff(&left, &right, &config).unwrap();

    assert_eq!(diff.compared[0].incorrect, 0);
    assert!(diff.ignored_properties.contains("properties.a.b"));
    assert!(diff.ignored_properties.contains("zones[0]"));
}

#[test]
fn test_numbers_compare_by_value() {
    let left = doc(json!({"resources": [{"type": "A", "name": "x", "capacity": 1, "port": 80}]}));
    let right = doc(json!({"resources": [{"type": "A", "name": "x", "capacity": 1.0, "port": "80"}]}));

    let diff = compute_template_diff(&left, &right, &CompareConfig::default()).unwrap();

    let resource = &diff.compared[0];
    assert_eq!((resource.correct, resource.incorrect), (3, 1));
    let report = render_report(&diff);
    assert!(report.contains("| capacity | 1 | 1.0 |  |"));
    assert!(report.contains("| port | 80 | 80 | ✗ |"));
}

#[test]
fn test_diff_and_report_deterministic() {
    let left = doc(json!({"resources": [
        {"type": "B", "name": "b", "p": {"x": [1, 2]}},
        {"type": "A", "name": "a", "tags": {"env": "dev"}},
        {"type": "C", "name": "only-left"}
    ]}));
    let right = doc(json!({"resources": [
        {"type": "A", "name": "a", "tags": {"env": "prod"}},
        {"type": "B", "name": "b", "p": {"x": [1, 3]}},
        {"type": "D", "name": "only-right"}
    ]}));
    let config = config("ignoreRules:\n  - tags.*\n");

    let first = compute_template_diff(&left, &right, &config).unwrap();
    let second = compute_template_diff(&left, &right, &config).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(render_report(&first), render_report(&second));
}
