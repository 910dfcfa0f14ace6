//! Template diff computation.

use crate::compare::comparator::Comparator;
use crate::compare::model::TemplateDiff;
use crate::compare::report::AnchorSet;
use crate::config::CompareConfig;
use crate::document::Document;
use crate::errors::Result;
use crate::matcher::match_resources;
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeSet;

/// Compare two templates under `config`.
///
/// Resources are paired by the matcher, each pair is compared unless its type
/// is ignored, and the leftovers on each side are reported as unmatched.
///
/// # Errors
///
/// `InvalidPattern` if an ignore rule cannot be compiled.
pub fn compute_template_diff(
    left: &Document,
    right: &Document,
    config: &CompareConfig,
) -> Result<TemplateDiff> {
    let start = std::time::Instant::now();
    log_op_start!(
        "compute_template_diff",
        left_resources = left.resources().len(),
        right_resources = right.resources().len()
    );

    let rules = match config.compile_rules() {
        Ok(rules) => rules,
        Err(e) => {
            log_op_error!(
                "compute_template_diff",
                &e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(e);
        }
    };

    let outcome = match_resources(left.pool(), right.pool(), &config.resource_mappings);
    let comparator = Comparator::new(&rules).with_sources(left.source(), right.source());

    let mut anchors = AnchorSet::default();
    let mut ignored_properties = BTreeSet::new();
    let mut compared = Vec::with_capacity(outcome.pairs.len());
    for pair in &outcome.pairs {
        let Some(mut resource) = comparator.compare(pair) else {
            continue;
        };
        ignored_properties.extend(resource.ignored_paths().map(str::to_string));
        resource.anchor = anchors.claim(std::mem::take(&mut resource.anchor));
        compared.push(resource);
    }

    let diff = TemplateDiff {
        compared,
        ignored_properties,
        unmatched_left: outcome.left.into_keys().collect(),
        unmatched_right: outcome.right.into_keys().collect(),
    };

    log_op_end!(
        "compute_template_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        matched_len = outcome.pairs.len(),
        unmatched_left_len = diff.unmatched_left.len(),
        unmatched_right_len = diff.unmatched_right.len()
    );
    Ok(diff)
}
