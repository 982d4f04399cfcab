//! Snippet merger.
//!
//! Conflict rules, applied per incoming entry in file order:
//! - value is not an object            -> skipped
//! - name already present in target    -> replaced (name wins over prefix)
//! - prefix shared with another name   -> skipped, target untouched
//! - otherwise                         -> added
//!
//! Prefix ownership (name -> prefix set) is rebuilt from the target before each
//! incoming collection and updated as entries land, so later entries of one
//! file see the earlier ones.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::snippet::{entry_prefixes, prefix_set, SnippetCollection};

/// Counters reported after a merge.
///
/// `skipped` counts both prefix conflicts and invalid entries;
/// `skipped_invalid` is the invalid share of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub skipped_invalid: usize,
}

impl MergeStats {
    fn record(&mut self, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Added => self.added += 1,
            MergeOutcome::Replaced => self.replaced += 1,
            MergeOutcome::SkippedConflict { .. } => self.skipped += 1,
            MergeOutcome::SkippedInvalid => {
                self.skipped += 1;
                self.skipped_invalid += 1;
            }
        }
    }
}

/// What happened to one incoming entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Replaced,
    /// Shares a prefix with `conflicts_with`, an entry under another name.
    SkippedConflict { conflicts_with: String },
    SkippedInvalid,
}

/// Name -> prefix set for every object entry of `target`.
fn prefix_owners(target: &SnippetCollection) -> HashMap<String, BTreeSet<String>> {
    target
        .iter()
        .filter(|(_, entry)| entry.is_object())
        .map(|(name, entry)| (name.clone(), entry_prefixes(entry)))
        .collect()
}

/// First owner (in name order, for stable messages) whose prefixes intersect `prefixes`.
fn find_conflict(
    owners: &HashMap<String, BTreeSet<String>>,
    prefixes: &BTreeSet<String>,
) -> Option<String> {
    owners
        .iter()
        .filter(|(_, owned)| !owned.is_disjoint(prefixes))
        .map(|(name, _)| name)
        .min()
        .cloned()
}

/// Merges one incoming collection into `target` and returns its per-entry outcomes.
pub fn merge_collection(
    target: &mut SnippetCollection,
    incoming: &SnippetCollection,
) -> Vec<(String, MergeOutcome)> {
    let mut owners = prefix_owners(target);
    let mut outcomes = Vec::with_capacity(incoming.len());

    for (name, entry) in incoming {
        let outcome = merge_entry(target, &mut owners, name, entry);
        match &outcome {
            MergeOutcome::Added => debug!("added '{}'", name),
            MergeOutcome::Replaced => debug!("replaced '{}'", name),
            MergeOutcome::SkippedConflict { conflicts_with } => {
                info!("skipped '{}': prefix already used by '{}'", name, conflicts_with)
            }
            MergeOutcome::SkippedInvalid => warn!("skipped '{}': entry is not an object", name),
        }
        outcomes.push((name.clone(), outcome));
    }
    outcomes
}

fn merge_entry(
    target: &mut SnippetCollection,
    owners: &mut HashMap<String, BTreeSet<String>>,
    name: &str,
    entry: &Value,
) -> MergeOutcome {
    let Value::Object(obj) = entry else {
        return MergeOutcome::SkippedInvalid;
    };
    let prefixes = prefix_set(obj.get("prefix"));

    if target.contains_key(name) {
        target.insert(name.to_string(), entry.clone());
        owners.insert(name.to_string(), prefixes);
        return MergeOutcome::Replaced;
    }

    if let Some(owner) = find_conflict(owners, &prefixes) {
        return MergeOutcome::SkippedConflict {
            conflicts_with: owner,
        };
    }

    target.insert(name.to_string(), entry.clone());
    owners.insert(name.to_string(), prefixes);
    MergeOutcome::Added
}

/// Merges every incoming collection, in order, into `target`.
pub fn merge_all<'a, I>(target: &mut SnippetCollection, incoming: I) -> MergeStats
where
    I: IntoIterator<Item = &'a SnippetCollection>,
{
    let mut stats = MergeStats::default();
    for coll in incoming {
        for (_, outcome) in merge_collection(target, coll) {
            stats.record(&outcome);
        }
    }
    stats
}
