//! Controller-level resource aggregation
//!
//! Folds a pod list into one [`ControllerAggregate`] per owning
//! controller, summing normalized requests and limits across all
//! containers and tallying normalization flags into a count-per-flag
//! multiset. The fold is commutative and associative (sums and counts
//! only), so partial aggregates could be merged if a caller ever chose
//! to parallelize it.

use std::collections::BTreeMap;

use crate::models::{ControllerAggregate, ControllerKey};
use crate::quantity::{normalize_cpu, normalize_memory};
use crate::snapshot::Pod;

const FLAG_STANDALONE: &str = "Standalone pod without controller";

/// Controller key for a pod: `ownerReferences[0]` when present
/// (lowercased kind), else `standalone/<pod name>`.
pub fn controller_key(pod: &Pod) -> ControllerKey {
    match pod.metadata.owner_references.first() {
        Some(owner) => ControllerKey {
            kind: owner.kind.to_lowercase(),
            name: owner.name.clone(),
        },
        None => ControllerKey::standalone(&pod.metadata.name),
    }
}

/// Fold pods into finalized per-controller aggregates, sorted by key.
pub fn aggregate(pods: &[Pod]) -> Vec<ControllerAggregate> {
    let mut grouped: BTreeMap<ControllerKey, ControllerAggregate> = BTreeMap::new();

    for pod in pods {
        let key = controller_key(pod);
        let standalone = pod.metadata.owner_references.is_empty();
        let agg = grouped
            .entry(key.clone())
            .or_insert_with(|| ControllerAggregate::new(key));

        agg.pod_count += 1;
        if standalone {
            *agg.flag_counts.entry(FLAG_STANDALONE.to_string()).or_insert(0) += 1;
        }

        // A pod with zero containers still counts toward pod_count.
        for container in &pod.spec.containers {
            let req = &container.resources.requests;
            let lim = &container.resources.limits;

            add(&mut agg.cpu_request, &mut agg.flag_counts, normalize_cpu(req.get("cpu").map(String::as_str)));
            add(&mut agg.cpu_limit, &mut agg.flag_counts, normalize_cpu(lim.get("cpu").map(String::as_str)));
            add(&mut agg.memory_request_mib, &mut agg.flag_counts, normalize_memory(req.get("memory").map(String::as_str)));
            add(&mut agg.memory_limit_mib, &mut agg.flag_counts, normalize_memory(lim.get("memory").map(String::as_str)));
            add(&mut agg.ephemeral_request_mib, &mut agg.flag_counts, normalize_memory(req.get("ephemeral-storage").map(String::as_str)));
            add(&mut agg.ephemeral_limit_mib, &mut agg.flag_counts, normalize_memory(lim.get("ephemeral-storage").map(String::as_str)));
        }
    }

    grouped.into_values().map(finalize).collect()
}

fn add(sum: &mut f64, tally: &mut BTreeMap<String, u32>, normalized: (f64, Option<String>)) {
    let (value, flag) = normalized;
    *sum += value;
    if let Some(flag) = flag {
        *tally.entry(flag).or_insert(0) += 1;
    }
}

fn finalize(mut agg: ControllerAggregate) -> ControllerAggregate {
    agg.cpu_request = round2(agg.cpu_request);
    agg.cpu_limit = round2(agg.cpu_limit);
    agg.memory_request_mib = round2(agg.memory_request_mib);
    agg.memory_limit_mib = round2(agg.memory_limit_mib);
    agg.ephemeral_request_mib = round2(agg.ephemeral_request_mib);
    agg.ephemeral_limit_mib = round2(agg.ephemeral_limit_mib);
    agg.flags = render_flags(&agg.flag_counts);
    agg
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Render a flag multiset: `"OK"` when empty, else lexicographically
/// sorted flags joined by `"; "`, recurring flags suffixed `" (Nx)"`.
fn render_flags(tally: &BTreeMap<String, u32>) -> String {
    if tally.is_empty() {
        return "OK".to_string();
    }
    tally
        .iter()
        .map(|(flag, count)| {
            if *count > 1 {
                format!("{flag} ({count}x)")
            } else {
                flag.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
