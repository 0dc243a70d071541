//! Namespace front-page totals

use std::collections::BTreeSet;

use crate::models::NamespaceSummary;
use crate::snapshot::Pod;

use super::aggregate::controller_key;

/// Fold namespace-wide totals out of the pod list.
pub fn summarize(pods: &[Pod]) -> NamespaceSummary {
    let mut summary = NamespaceSummary {
        total_pods: pods.len(),
        ..Default::default()
    };

    let mut controllers = BTreeSet::new();
    for pod in pods {
        summary.total_containers += pod.spec.containers.len();
        controllers.insert(controller_key(pod));
        summary.total_restarts += pod
            .status
            .container_statuses
            .iter()
            .map(|s| u64::from(s.restart_count))
            .sum::<u64>();

        let qos = pod
            .status
            .qos_class
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        *summary.qos_distribution.entry(qos).or_insert(0) += 1;
    }
    summary.total_controllers = controllers.len();

    summary
}
