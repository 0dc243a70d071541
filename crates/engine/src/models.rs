//! Derived record types handed to the report renderer
//!
//! Everything here is plain data: the renderer consumes these tables
//! as-is, so field names and numeric precision (2 decimals for resource
//! sums, 1 decimal for quota usage percent, whole numbers for coverage
//! percent) are part of the contract.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Presentation severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Normal,
    Caution,
    Critical,
}

impl Severity {
    /// Tier for a quota usage percentage: caution at 80%, critical at 90%.
    pub fn for_quota_usage(usage_percent: f64) -> Self {
        if usage_percent >= 90.0 {
            Self::Critical
        } else if usage_percent >= 80.0 {
            Self::Caution
        } else {
            Self::Normal
        }
    }

    /// Tier for PDB coverage: healthy at 90%+, critical below 80%.
    pub fn for_coverage(coverage_percent: u32) -> Self {
        if coverage_percent >= 90 {
            Self::Normal
        } else if coverage_percent >= 80 {
            Self::Caution
        } else {
            Self::Critical
        }
    }
}

/// Per-container configuration record with anomaly flags
///
/// Raw quantity strings are carried unmodified so the report can show
/// exactly what the manifest said; `None` means the field was absent,
/// which is not the same thing as a present zero.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerResourceRecord {
    pub pod: String,
    pub container: String,
    pub cpu_request: Option<String>,
    pub cpu_limit: Option<String>,
    pub memory_request: Option<String>,
    pub memory_limit: Option<String>,
    pub ephemeral_request: Option<String>,
    pub ephemeral_limit: Option<String>,
    pub qos_class: String,
    /// Ordered, de-duplicated; `["OK"]` when nothing triggered.
    pub flags: Vec<String>,
}

/// Identity of the workload object owning a set of pods
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ControllerKey {
    /// Lowercased owner kind, or `"standalone"` for owner-less pods.
    pub kind: String,
    pub name: String,
}

impl ControllerKey {
    pub fn standalone(pod_name: &str) -> Self {
        Self {
            kind: "standalone".to_string(),
            name: pod_name.to_string(),
        }
    }
}

impl fmt::Display for ControllerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Summed resource footprint of one controller's pods
///
/// Built additively while pods are folded in, then finalized (sums
/// rounded to 2 decimals, flag tallies rendered) before the renderer
/// sees it. Sums are arithmetic sums over containers, never averages.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerAggregate {
    pub key: ControllerKey,
    pub pod_count: usize,
    pub cpu_request: f64,
    pub cpu_limit: f64,
    pub memory_request_mib: f64,
    pub memory_limit_mib: f64,
    pub ephemeral_request_mib: f64,
    pub ephemeral_limit_mib: f64,
    /// Count per distinct flag observed across this controller's pods.
    pub flag_counts: BTreeMap<String, u32>,
    /// Rendered flag column, e.g. `"OK"` or `"No limits (3x)"`.
    pub flags: String,
}

impl ControllerAggregate {
    pub fn new(key: ControllerKey) -> Self {
        Self {
            key,
            pod_count: 0,
            cpu_request: 0.0,
            cpu_limit: 0.0,
            memory_request_mib: 0.0,
            memory_limit_mib: 0.0,
            ephemeral_request_mib: 0.0,
            ephemeral_limit_mib: 0.0,
            flag_counts: BTreeMap::new(),
            flags: String::new(),
        }
    }
}

/// Utilization of one hard limit inside one ResourceQuota object
#[derive(Debug, Clone, Serialize)]
pub struct QuotaUsageRecord {
    pub quota: String,
    pub resource: String,
    pub used: String,
    pub hard: String,
    /// `used / hard * 100`, rounded to 1 decimal; `0.0` when hard is zero.
    pub usage_percent: f64,
    /// `"OK"` or `"; "`-joined parse flags from either side.
    pub flags: String,
    /// `None` for the `resourcequotas` bookkeeping row, which is never
    /// color-classified.
    pub severity: Option<Severity>,
}

/// PDB coverage of a namespace's pods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageResult {
    pub total_pods: usize,
    pub covered_pods: Vec<String>,
    pub uncovered_pods: Vec<String>,
    /// Whole-number percentage; `0` when there are no pods.
    pub coverage_percentage: u32,
}

impl CoverageResult {
    pub fn severity(&self) -> Severity {
        Severity::for_coverage(self.coverage_percentage)
    }
}

/// Front-page totals for the namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    pub total_pods: usize,
    pub total_containers: usize,
    pub total_controllers: usize,
    pub total_restarts: u64,
    /// Pod count per QoS class (`Guaranteed`, `Burstable`, `BestEffort`,
    /// `Unknown` when the status carries none).
    pub qos_distribution: BTreeMap<String, usize>,
}

/// Detection window of a configured probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeWindow {
    /// Worst-case seconds before the first failure is acted on
    /// (initial delay + period x failure threshold).
    pub initial_secs: u32,
    /// Steady-state seconds to detect a failure (period x threshold).
    pub runtime_secs: u32,
}

/// Probe configuration of one container, grouped under its controller
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRecord {
    pub controller: ControllerKey,
    pub pod: String,
    pub container: String,
    pub startup: Option<ProbeWindow>,
    pub liveness: Option<ProbeWindow>,
    pub readiness: Option<ProbeWindow>,
}

/// Probe records plus per-kind missing counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeReport {
    pub records: Vec<ProbeRecord>,
    pub startup_missing: usize,
    pub liveness_missing: usize,
    pub readiness_missing: usize,
}
