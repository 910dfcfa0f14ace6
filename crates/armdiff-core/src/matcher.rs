//! Resource pairing between the left and right templates.
//!
//! Three passes run in order, each consuming the pools left by the previous
//! one:
//!
//! 1. [`match_exact`]: explicit full-key mappings
//! 2. [`match_prefix`]: prefix mappings, remainders carried across
//! 3. [`match_identity`]: identical keys on both sides
//!
//! A resource is paired at most once. Whatever is left in either pool after
//! the last pass is that side's unmatched set.

use crate::config::ResourceMapping;
use crate::document::{ResourceKey, ResourcePool};
use serde_json::Value;

/// One left resource paired with one right resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub left_key: ResourceKey,
    pub left: Value,
    pub right_key: ResourceKey,
    pub right: Value,
}

/// Result of one matching pass, or of the whole matcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// Pairs in the order they were made.
    pub pairs: Vec<MatchedPair>,
    /// Left resources not paired (yet).
    pub left: ResourcePool,
    /// Right resources not paired (yet).
    pub right: ResourcePool,
}

impl MatchOutcome {
    fn new(left: ResourcePool, right: ResourcePool) -> Self {
        Self {
            pairs: Vec::new(),
            left,
            right,
        }
    }

    /// Pair `left_key` with `right_key` if both are still unpaired.
    fn take_pair(&mut self, left_key: &ResourceKey, right_key: &ResourceKey) -> bool {
        if !self.left.contains_key(left_key) || !self.right.contains_key(right_key) {
            return false;
        }
        let (Some((left_key, left)), Some((right_key, right))) = (
            self.left.remove_entry(left_key),
            self.right.remove_entry(right_key),
        ) else {
            return false;
        };
        self.pairs.push(MatchedPair {
            left_key,
            left,
            right_key,
            right,
        });
        true
    }

    /// Append a later pass's pairs and adopt its remaining pools.
    fn absorb(&mut self, next: MatchOutcome) {
        self.pairs.extend(next.pairs);
        self.left = next.left;
        self.right = next.right;
    }
}

/// Pair resources named by exact mappings, in declaration order.
///
/// A mapping whose left or right key is absent (or already paired by an
/// earlier mapping) is skipped.
pub fn match_exact(
    left: ResourcePool,
    right: ResourcePool,
    mappings: &[ResourceMapping],
) -> MatchOutcome {
    let mut outcome = MatchOutcome::new(left, right);
    for mapping in mappings {
        if let ResourceMapping::Exact { left, right } = mapping {
            if !outcome.take_pair(left, right) {
                tracing::debug!(%left, %right, "exact mapping did not apply");
            }
        }
    }
    outcome
}

/// Pair resources through prefix mappings, in declaration order.
///
/// For each prefix mapping, every remaining left resource whose type and
/// name start with the left prefixes is paired with the right resource keyed
/// by the right prefixes followed by the same remainders, if present.
pub fn match_prefix(
    left: ResourcePool,
    right: ResourcePool,
    mappings: &[ResourceMapping],
) -> MatchOutcome {
    let mut outcome = MatchOutcome::new(left, right);
    for mapping in mappings {
        let ResourceMapping::Prefix {
            left_type_prefix,
            left_name_prefix,
            right_type_prefix,
            right_name_prefix,
        } = mapping
        else {
            continue;
        };

        let candidates: Vec<(ResourceKey, ResourceKey)> = outcome
            .left
            .keys()
            .filter_map(|key| {
                let type_rest = key.resource_type.strip_prefix(left_type_prefix.as_str())?;
                let name_rest = key.name.strip_prefix(left_name_prefix.as_str())?;
                let target = ResourceKey::new(
                    format!("{}{}", right_type_prefix, type_rest),
                    format!("{}{}", right_name_prefix, name_rest),
                );
                Some((key.clone(), target))
            })
            .collect();

        for (left_key, right_key) in candidates {
            outcome.take_pair(&left_key, &right_key);
        }
    }
    outcome
}

/// Pair every left resource whose key also exists on the right.
pub fn match_identity(left: ResourcePool, right: ResourcePool) -> MatchOutcome {
    let mut outcome = MatchOutcome::new(left, right);
    let shared: Vec<ResourceKey> = outcome
        .left
        .keys()
        .filter(|key| outcome.right.contains_key(*key))
        .cloned()
        .collect();
    for key in shared {
        outcome.take_pair(&key, &key);
    }
    outcome
}

/// Run all three passes and return the pairs plus both unmatched remainders.
pub fn match_resources(
    left: ResourcePool,
    right: ResourcePool,
    mappings: &[ResourceMapping],
) -> MatchOutcome {
    let mut outcome = match_exact(left, right, mappings);
    let exact_len = outcome.pairs.len();

    let prefix = match_prefix(
        std::mem::take(&mut outcome.left),
        std::mem::take(&mut outcome.right),
        mappings,
    );
    outcome.absorb(prefix);
    let prefix_len = outcome.pairs.len() - exact_len;

    let identity = match_identity(
        std::mem::take(&mut outcome.left),
        std::mem::take(&mut outcome.right),
    );
    outcome.absorb(identity);
    let identity_len = outcome.pairs.len() - exact_len - prefix_len;

    tracing::debug!(
        exact_len,
        prefix_len,
        identity_len,
        unmatched_left_len = outcome.left.len(),
        unmatched_right_len = outcome.right.len(),
        "resource matching complete"
    );
    outcome
}
