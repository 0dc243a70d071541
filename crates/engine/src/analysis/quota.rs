//! ResourceQuota utilization
//!
//! One record per (quota object x hard limit key). A missing `used`
//! entry means nothing has been consumed yet and defaults to `"0"`; a
//! zero hard limit yields 0.0% rather than a division error.

use crate::models::{QuotaUsageRecord, Severity};
use crate::quantity::normalize_quota_value;
use crate::snapshot::ResourceQuota;

/// Object-count bookkeeping row that is never color-classified.
const RESOURCEQUOTAS_KEY: &str = "resourcequotas";

/// Compute utilization records for every hard limit of every quota.
pub fn compute(quotas: &[ResourceQuota]) -> Vec<QuotaUsageRecord> {
    let mut records = Vec::new();

    for quota in quotas {
        for (resource, hard_raw) in &quota.status.hard {
            let used_raw = quota
                .status
                .used
                .get(resource)
                .map(String::as_str)
                .unwrap_or("0");

            let (used, used_flag) = normalize_quota_value(resource, Some(used_raw));
            let (hard, hard_flag) = normalize_quota_value(resource, Some(hard_raw));

            let usage_percent = if hard > 0.0 {
                (used / hard * 1000.0).round() / 10.0
            } else {
                0.0
            };

            let flags: Vec<String> = [used_flag, hard_flag].into_iter().flatten().collect();
            let flags = if flags.is_empty() {
                "OK".to_string()
            } else {
                flags.join("; ")
            };

            let severity = if resource == RESOURCEQUOTAS_KEY {
                None
            } else {
                Some(Severity::for_quota_usage(usage_percent))
            };

            records.push(QuotaUsageRecord {
                quota: quota.metadata.name.clone(),
                resource: resource.clone(),
                used: used_raw.to_string(),
                hard: hard_raw.clone(),
                usage_percent,
                flags,
                severity,
            });
        }
    }

    records
}
