//! Probe timing analysis
//!
//! For each configured probe the interesting number is how long a
//! failure can go unnoticed: `periodSeconds x failureThreshold` at
//! steady state, plus `initialDelaySeconds` for the first detection
//! after a cold start. Startup probes only ever gate the cold start, so
//! they report the initial window alone. Unconfigured probes are
//! counted per kind so the report can call out the gaps.

use crate::models::{ProbeRecord, ProbeReport, ProbeWindow};
use crate::snapshot::{Pod, Probe};

use super::aggregate::controller_key;

const DEFAULT_PERIOD_SECONDS: u32 = 10;
const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Detection window for one probe block, kubelet defaults applied.
pub fn probe_window(probe: &Probe) -> ProbeWindow {
    let period = probe.period_seconds.unwrap_or(DEFAULT_PERIOD_SECONDS);
    let threshold = probe.failure_threshold.unwrap_or(DEFAULT_FAILURE_THRESHOLD);
    let runtime_secs = period * threshold;
    ProbeWindow {
        initial_secs: probe.initial_delay_seconds + runtime_secs,
        runtime_secs,
    }
}

/// Compute probe windows for every container and tally missing probes.
pub fn compute(pods: &[Pod]) -> ProbeReport {
    let mut report = ProbeReport::default();

    for pod in pods {
        let controller = controller_key(pod);
        for container in &pod.spec.containers {
            let startup = container.startup_probe.as_ref().map(probe_window);
            let liveness = container.liveness_probe.as_ref().map(probe_window);
            let readiness = container.readiness_probe.as_ref().map(probe_window);

            report.startup_missing += usize::from(startup.is_none());
            report.liveness_missing += usize::from(liveness.is_none());
            report.readiness_missing += usize::from(readiness.is_none());

            report.records.push(ProbeRecord {
                controller: controller.clone(),
                pod: pod.metadata.name.clone(),
                container: container.name.clone(),
                startup,
                liveness,
                readiness,
            });
        }
    }

    report
}
