//! PDB coverage of namespace pods
//!
//! A pod is covered when at least one PDB's `matchLabels` selector is
//! fully satisfied by the pod's labels. Expression-based selectors are
//! not evaluated; a PDB with no match-labels contributes nothing.

use crate::models::CoverageResult;
use crate::snapshot::{Pod, PodDisruptionBudget};

/// Partition pods into covered/uncovered and compute the coverage ratio.
pub fn compute_coverage(pods: &[Pod], pdbs: &[PodDisruptionBudget]) -> CoverageResult {
    let selectors: Vec<_> = pdbs
        .iter()
        .filter_map(|pdb| pdb.spec.selector.as_ref())
        .map(|sel| &sel.match_labels)
        .filter(|labels| !labels.is_empty())
        .collect();

    let mut covered_pods = Vec::new();
    let mut uncovered_pods = Vec::new();

    for pod in pods {
        let labels = &pod.metadata.labels;
        let matched = selectors
            .iter()
            .any(|sel| sel.iter().all(|(k, v)| labels.get(k) == Some(v)));
        if matched {
            covered_pods.push(pod.metadata.name.clone());
        } else {
            uncovered_pods.push(pod.metadata.name.clone());
        }
    }

    let total_pods = pods.len();
    let coverage_percentage = if total_pods > 0 {
        (covered_pods.len() as f64 / total_pods as f64 * 100.0).round() as u32
    } else {
        0
    };

    CoverageResult {
        total_pods,
        covered_pods,
        uncovered_pods,
        coverage_percentage,
    }
}
