//! Per-container resource configuration anomaly detection

use crate::models::ContainerResourceRecord;
use crate::quantity::normalize_cpu;
use crate::snapshot::{ContainerSpec, Pod};

const FLAG_MISSING_RESOURCES: &str = "Missing resources";
const FLAG_NO_REQUESTS: &str = "No requests";
const FLAG_NO_LIMITS: &str = "No limits";
const FLAG_CPU_REQ_GT_LIM: &str = "CPU req > lim";
const FLAG_OK: &str = "OK";

/// Classify one container's resource configuration.
///
/// Pure function of the container spec and the pod's QoS class. Flags
/// come out in a fixed order with no duplicates; a clean container gets
/// the single flag `"OK"`.
///
/// The CPU request-vs-limit check compares normalized core values, so
/// `"1"` vs `"500m"` is judged numerically rather than by string order.
pub fn classify_container(
    pod_name: &str,
    qos_class: &str,
    container: &ContainerSpec,
) -> ContainerResourceRecord {
    let req = &container.resources.requests;
    let lim = &container.resources.limits;

    let cpu_request = req.get("cpu").cloned();
    let cpu_limit = lim.get("cpu").cloned();
    let memory_request = req.get("memory").cloned();
    let memory_limit = lim.get("memory").cloned();
    let ephemeral_request = req.get("ephemeral-storage").cloned();
    let ephemeral_limit = lim.get("ephemeral-storage").cloned();

    let no_requests =
        cpu_request.is_none() && memory_request.is_none() && ephemeral_request.is_none();
    let no_limits = cpu_limit.is_none() && memory_limit.is_none() && ephemeral_limit.is_none();

    let mut flags = Vec::new();
    if no_requests && no_limits {
        flags.push(FLAG_MISSING_RESOURCES.to_string());
    }
    if no_requests {
        flags.push(FLAG_NO_REQUESTS.to_string());
    }
    if no_limits {
        flags.push(FLAG_NO_LIMITS.to_string());
    }
    if let (Some(r), Some(l)) = (cpu_request.as_deref(), cpu_limit.as_deref()) {
        let (req_cores, req_flag) = normalize_cpu(Some(r));
        let (lim_cores, lim_flag) = normalize_cpu(Some(l));
        // Only compare values that actually parsed.
        if req_flag.is_none() && lim_flag.is_none() && req_cores > lim_cores {
            flags.push(FLAG_CPU_REQ_GT_LIM.to_string());
        }
    }
    if flags.is_empty() {
        flags.push(FLAG_OK.to_string());
    }

    ContainerResourceRecord {
        pod: pod_name.to_string(),
        container: container.name.clone(),
        cpu_request,
        cpu_limit,
        memory_request,
        memory_limit,
        ephemeral_request,
        ephemeral_limit,
        qos_class: qos_class.to_string(),
        flags,
    }
}

/// Classify every container of every pod, in input order.
pub fn classify_pods(pods: &[Pod]) -> Vec<ContainerResourceRecord> {
    pods.iter()
        .flat_map(|pod| {
            let qos = pod.status.qos_class.as_deref().unwrap_or("Unknown");
            pod.spec
                .containers
                .iter()
                .map(move |c| classify_container(&pod.metadata.name, qos, c))
        })
        .collect()
}
