//! Analysis engine for KubeCase namespace reports
//!
//! This crate provides the core functionality for:
//! - Normalizing Kubernetes quantity strings into canonical units
//! - Classifying per-container resource configuration anomalies
//! - Aggregating requests/limits by owning controller
//! - Computing ResourceQuota utilization
//! - Computing Pod Disruption Budget coverage
//!
//! Cluster I/O and report rendering live outside this crate; callers
//! hand in an already-fetched [`NamespaceSnapshot`] and receive plain
//! record tables back.

pub mod analysis;
pub mod models;
pub mod quantity;
pub mod snapshot;

pub use analysis::{analyze, NamespaceReport};
pub use models::*;
pub use quantity::{normalize_cpu, normalize_memory, normalize_quota_value, ResourceKind};
pub use snapshot::{NamespaceSnapshot, SnapshotError};
