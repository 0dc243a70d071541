//! End-to-end tests: kubectl JSON payloads in, report tables out

use kubecase_engine::{analyze, NamespaceSnapshot, Severity};
use serde_json::json;

fn pods_payload() -> String {
    json!({
        "items": [
            {
                "metadata": {
                    "name": "web-6d4b-1",
                    "labels": {"app": "web"},
                    "ownerReferences": [{"kind": "ReplicaSet", "name": "web-6d4b"}]
                },
                "spec": {
                    "containers": [{
                        "name": "app",
                        "resources": {
                            "requests": {"cpu": "250m", "memory": "256Mi"},
                            "limits": {"cpu": "500m", "memory": "512Mi"}
                        },
                        "livenessProbe": {"initialDelaySeconds": 5, "periodSeconds": 10, "failureThreshold": 3},
                        "readinessProbe": {"periodSeconds": 5, "failureThreshold": 3}
                    }]
                },
                "status": {
                    "qosClass": "Burstable",
                    "containerStatuses": [{"name": "app", "restartCount": 2, "ready": true}]
                }
            },
            {
                "metadata": {
                    "name": "web-6d4b-2",
                    "labels": {"app": "web"},
                    "ownerReferences": [{"kind": "ReplicaSet", "name": "web-6d4b"}]
                },
                "spec": {
                    "containers": [{
                        "name": "app",
                        "resources": {
                            "requests": {"cpu": "250m", "memory": "256Mi"},
                            "limits": {"cpu": "500m", "memory": "512Mi"}
                        }
                    }]
                },
                "status": {"qosClass": "Burstable"}
            },
            {
                "metadata": {"name": "debug-shell", "labels": {"app": "debug"}},
                "spec": {"containers": [{"name": "shell"}]},
                "status": {"qosClass": "BestEffort"}
            }
        ]
    })
    .to_string()
}

fn quotas_payload() -> String {
    json!({
        "items": [{
            "metadata": {"name": "team-quota"},
            "status": {
                "hard": {"limits.cpu": "4", "requests.memory": "8Gi", "pods": "20", "resourcequotas": "1"},
                "used": {"limits.cpu": "1", "requests.memory": "512Mi", "pods": "3", "resourcequotas": "1"}
            }
        }]
    })
    .to_string()
}

fn pdbs_payload() -> String {
    json!({
        "items": [{
            "metadata": {"name": "web-pdb"},
            "spec": {"selector": {"matchLabels": {"app": "web"}}}
        }]
    })
    .to_string()
}

fn snapshot() -> NamespaceSnapshot {
    NamespaceSnapshot::from_json("team-a", &pods_payload(), &quotas_payload(), &pdbs_payload())
        .expect("fixture payloads are well formed")
}

#[test]
fn test_summary_totals() {
    let report = analyze(&snapshot());
    assert_eq!(report.namespace, "team-a");
    assert_eq!(report.summary.total_pods, 3);
    assert_eq!(report.summary.total_containers, 3);
    assert_eq!(report.summary.total_controllers, 2);
    assert_eq!(report.summary.total_restarts, 2);
    assert_eq!(report.summary.qos_distribution["Burstable"], 2);
}

#[test]
fn test_controller_aggregates() {
    let report = analyze(&snapshot());
    assert_eq!(report.controllers.len(), 2);

    let web = report
        .controllers
        .iter()
        .find(|c| c.key.to_string() == "replicaset/web-6d4b")
        .unwrap();
    assert_eq!(web.pod_count, 2);
    assert_eq!(web.cpu_request, 0.5);
    assert_eq!(web.cpu_limit, 1.0);
    assert_eq!(web.memory_request_mib, 512.0);
    assert_eq!(web.flags, "OK");

    let standalone = report
        .controllers
        .iter()
        .find(|c| c.key.to_string() == "standalone/debug-shell")
        .unwrap();
    assert_eq!(standalone.pod_count, 1);
    assert_eq!(standalone.flags, "Standalone pod without controller");
}

#[test]
fn test_container_classification() {
    let report = analyze(&snapshot());
    assert_eq!(report.containers.len(), 3);

    let shell = report
        .containers
        .iter()
        .find(|c| c.pod == "debug-shell")
        .unwrap();
    assert_eq!(
        shell.flags,
        vec!["Missing resources", "No requests", "No limits"]
    );
    assert_eq!(shell.qos_class, "BestEffort");

    let app = report
        .containers
        .iter()
        .find(|c| c.pod == "web-6d4b-1")
        .unwrap();
    assert_eq!(app.flags, vec!["OK"]);
    assert_eq!(app.cpu_request.as_deref(), Some("250m"));
}

#[test]
fn test_quota_usage_records() {
    let report = analyze(&snapshot());
    let by_resource = |name: &str| {
        report
            .quota_usage
            .iter()
            .find(|r| r.resource == name)
            .unwrap()
    };

    assert_eq!(by_resource("limits.cpu").usage_percent, 25.0);
    assert_eq!(by_resource("requests.memory").usage_percent, 6.3);
    assert_eq!(by_resource("pods").usage_percent, 15.0);
    assert_eq!(by_resource("pods").severity, Some(Severity::Normal));
    assert_eq!(by_resource("resourcequotas").severity, None);
}

#[test]
fn test_pdb_coverage() {
    let report = analyze(&snapshot());
    assert_eq!(report.coverage.total_pods, 3);
    assert_eq!(report.coverage.covered_pods.len(), 2);
    assert_eq!(report.coverage.uncovered_pods, vec!["debug-shell"]);
    assert_eq!(report.coverage.coverage_percentage, 67);
}

#[test]
fn test_probe_report() {
    let report = analyze(&snapshot());
    assert_eq!(report.probes.records.len(), 3);
    assert_eq!(report.probes.startup_missing, 3);
    assert_eq!(report.probes.liveness_missing, 2);
    assert_eq!(report.probes.readiness_missing, 2);

    let probed = report
        .probes
        .records
        .iter()
        .find(|r| r.pod == "web-6d4b-1")
        .unwrap();
    let liveness = probed.liveness.unwrap();
    assert_eq!(liveness.initial_secs, 35);
    assert_eq!(liveness.runtime_secs, 30);
    let readiness = probed.readiness.unwrap();
    assert_eq!(readiness.initial_secs, 15);
}

#[test]
fn test_analysis_is_idempotent() {
    let snap = snapshot();
    let first = serde_json::to_value(analyze(&snap)).unwrap();
    let second = serde_json::to_value(analyze(&snap)).unwrap();
    assert_eq!(first, second);
}
