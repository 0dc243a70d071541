//! Namespace analysis
//!
//! This module folds a [`NamespaceSnapshot`] into the tabular result
//! sets the report renderer consumes:
//! - per-container classification flags
//! - per-controller resource aggregates
//! - quota utilization records
//! - PDB coverage
//! - namespace totals and probe timing
//!
//! Everything is a pure fold over the snapshot; running the analysis
//! twice on the same snapshot yields identical output.

mod aggregate;
mod classifier;
mod coverage;
mod probes;
mod quota;
mod summary;

pub use aggregate::{aggregate, controller_key};
pub use classifier::{classify_container, classify_pods};
pub use coverage::compute_coverage;
pub use probes::{compute as compute_probes, probe_window};
pub use quota::compute as compute_quota_usage;
pub use summary::summarize;

use serde::Serialize;

use crate::models::{
    ContainerResourceRecord, ControllerAggregate, CoverageResult, NamespaceSummary, ProbeReport,
    QuotaUsageRecord,
};
use crate::snapshot::NamespaceSnapshot;

/// All result tables for one namespace, one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceReport {
    pub namespace: String,
    pub summary: NamespaceSummary,
    pub quota_usage: Vec<QuotaUsageRecord>,
    pub controllers: Vec<ControllerAggregate>,
    pub containers: Vec<ContainerResourceRecord>,
    pub coverage: CoverageResult,
    pub probes: ProbeReport,
}

/// Run the full analysis over a snapshot.
pub fn analyze(snapshot: &NamespaceSnapshot) -> NamespaceReport {
    tracing::debug!(
        namespace = %snapshot.namespace,
        pods = snapshot.pods.len(),
        "analyzing namespace snapshot"
    );

    let report = NamespaceReport {
        namespace: snapshot.namespace.clone(),
        summary: summarize(&snapshot.pods),
        quota_usage: compute_quota_usage(&snapshot.quotas),
        controllers: aggregate(&snapshot.pods),
        containers: classify_pods(&snapshot.pods),
        coverage: compute_coverage(&snapshot.pods, &snapshot.pdbs),
        probes: compute_probes(&snapshot.pods),
    };

    tracing::info!(
        namespace = %report.namespace,
        controllers = report.controllers.len(),
        coverage_percentage = report.coverage.coverage_percentage,
        "namespace analysis complete"
    );
    report
}
