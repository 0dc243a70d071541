//! Typed view of a namespace snapshot
//!
//! The engine does not talk to a cluster. An external collaborator runs
//! `kubectl get {pods,resourcequota,pdb} -o json` (or an equivalent API
//! call) and hands the payloads here. These records mirror the subset of
//! the Kubernetes object shapes the analysis reads; everything else in
//! the payload is ignored by serde.
//!
//! Malformed quantity *strings* are tolerated downstream and surface as
//! flags. Malformed *structure* (e.g. a non-mapping `resources` block)
//! is a hard fault raised from ingestion, never guessed at.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Structural fault in an input payload
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed {kind} list payload: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Subset of `metadata` read by the engine
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
}

/// `resources.requests` / `resources.limits` maps, raw quantity strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerResources {
    #[serde(default)]
    pub requests: BTreeMap<String, String>,
    #[serde(default)]
    pub limits: BTreeMap<String, String>,
}

/// Probe block; only the timing knobs matter for analysis
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(default)]
    pub initial_delay_seconds: u32,
    pub period_seconds: Option<u32>,
    pub failure_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resources: ContainerResources,
    pub startup_probe: Option<Probe>,
    pub liveness_probe: Option<Probe>,
    pub readiness_probe: Option<Probe>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub restart_count: u32,
    #[serde(default)]
    pub ready: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    pub qos_class: Option<String>,
    #[serde(default)]
    pub container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
    #[serde(default)]
    pub status: PodStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotaStatus {
    #[serde(default)]
    pub hard: BTreeMap<String, String>,
    #[serde(default)]
    pub used: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuota {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: QuotaStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdbSpec {
    pub selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodDisruptionBudget {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PdbSpec,
}

/// kubectl list envelope (`{"items": [...]}`)
#[derive(Debug, Deserialize)]
struct List<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Everything one analysis run reads, fetched once and held in memory
#[derive(Debug, Clone, Default)]
pub struct NamespaceSnapshot {
    pub namespace: String,
    pub pods: Vec<Pod>,
    pub quotas: Vec<ResourceQuota>,
    pub pdbs: Vec<PodDisruptionBudget>,
}

impl NamespaceSnapshot {
    /// Build a snapshot from the three `kubectl get ... -o json` payloads.
    ///
    /// Structural problems in any payload abort the run; quantity-string
    /// problems do not (they become flags during analysis).
    pub fn from_json(
        namespace: impl Into<String>,
        pods_json: &str,
        quotas_json: &str,
        pdbs_json: &str,
    ) -> Result<Self, SnapshotError> {
        let pods: List<Pod> = parse_list("pod", pods_json)?;
        let quotas: List<ResourceQuota> = parse_list("resourcequota", quotas_json)?;
        let pdbs: List<PodDisruptionBudget> = parse_list("poddisruptionbudget", pdbs_json)?;

        let snapshot = Self {
            namespace: namespace.into(),
            pods: pods.items,
            quotas: quotas.items,
            pdbs: pdbs.items,
        };
        tracing::debug!(
            namespace = %snapshot.namespace,
            pods = snapshot.pods.len(),
            quotas = snapshot.quotas.len(),
            pdbs = snapshot.pdbs.len(),
            "parsed namespace snapshot"
        );
        Ok(snapshot)
    }
}

fn parse_list<T: for<'de> Deserialize<'de>>(
    kind: &'static str,
    payload: &str,
) -> Result<List<T>, SnapshotError> {
    serde_json::from_str(payload).map_err(|source| SnapshotError::Malformed { kind, source })
}
