//! Kubernetes quantity string normalization
//!
//! Converts raw quantity strings (`"500m"`, `"2Gi"`, `"12"`) into
//! canonical numeric units: CPU in cores, memory and ephemeral storage
//! in MiB, object counts as plain numbers. Normalization never panics
//! and never returns an error; malformed input yields a zero value plus
//! a flag string describing the problem, so a bad quantity shows up in
//! the report instead of aborting the run.

/// Resource kind behind a quota key, resolved once per key
///
/// Quota keys arrive as free-form strings (`"limits.cpu"`,
/// `"requests.memory"`, `"count/deployments.apps"`). Routing is decided
/// here exactly once, then dispatched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Cpu,
    Memory,
    EphemeralStorage,
    Count,
    Other,
}

/// Quota keys that count namespaced objects rather than compute resources
const COUNT_RESOURCES: &[&str] = &["pods", "secrets", "configmaps", "persistentvolumeclaims"];

impl ResourceKind {
    /// Classify a quota resource key.
    pub fn from_quota_key(key: &str) -> Self {
        if key.contains("cpu") {
            Self::Cpu
        } else if key.contains("ephemeral-storage") {
            Self::EphemeralStorage
        } else if key.contains("memory") || key.contains("storage") {
            Self::Memory
        } else if key.starts_with("count/") || COUNT_RESOURCES.contains(&key) {
            Self::Count
        } else {
            Self::Other
        }
    }
}

/// Normalize a CPU quantity string to cores.
///
/// Millicore values (`"250m"`) divide by 1000; bare numerics are whole
/// cores. Absent or empty input is zero with no flag: a missing request
/// is not a parse failure.
pub fn normalize_cpu(raw: Option<&str>) -> (f64, Option<String>) {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return (0.0, None),
    };

    let parsed = match raw.strip_suffix('m') {
        Some(milli) => milli.parse::<f64>().map(|v| v / 1000.0),
        None => raw.parse::<f64>(),
    };
    match parsed {
        Ok(cores) => (cores, None),
        Err(_) => (0.0, Some(format!("invalid CPU value '{raw}'"))),
    }
}

/// Normalize a memory or storage quantity string to MiB.
///
/// Decimal suffixes (`K/M/G/T`) deliberately use the same 1024-based
/// magnitudes as their binary counterparts (`Ki/Mi/Gi/Ti`). That is not
/// SI-correct, but it keeps mixed-suffix namespaces ordered the same way
/// earlier reports did. A bare `m` suffix is almost always a typo for
/// `Mi`; it converts as millibytes (near zero) and carries a flag so the
/// report shows it.
pub fn normalize_memory(raw: Option<&str>) -> (f64, Option<String>) {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return (0.0, None),
    };

    const MIB: f64 = 1024.0 * 1024.0;
    // Two-character binary suffixes first so "Mi" is not read as "i".
    let scaled = if let Some(v) = raw.strip_suffix("Ki") {
        v.parse::<f64>().map(|n| n / 1024.0)
    } else if let Some(v) = raw.strip_suffix("Mi") {
        v.parse::<f64>()
    } else if let Some(v) = raw.strip_suffix("Gi") {
        v.parse::<f64>().map(|n| n * 1024.0)
    } else if let Some(v) = raw.strip_suffix("Ti") {
        v.parse::<f64>().map(|n| n * 1024.0 * 1024.0)
    } else if let Some(v) = raw.strip_suffix('K') {
        v.parse::<f64>().map(|n| n / 1024.0)
    } else if let Some(v) = raw.strip_suffix('M') {
        v.parse::<f64>()
    } else if let Some(v) = raw.strip_suffix('G') {
        v.parse::<f64>().map(|n| n * 1024.0)
    } else if let Some(v) = raw.strip_suffix('T') {
        v.parse::<f64>().map(|n| n * 1024.0 * 1024.0)
    } else if let Some(v) = raw.strip_suffix('m') {
        // millibytes -> MiB
        return match v.parse::<f64>() {
            Ok(n) => (
                n / 1000.0 / MIB,
                Some(format!("non-standard memory suffix 'm' in '{raw}'")),
            ),
            Err(_) => (0.0, Some(format!("unable to parse memory value '{raw}'"))),
        };
    } else {
        // Unsuffixed values are raw bytes.
        raw.parse::<f64>().map(|n| n / MIB)
    };

    match scaled {
        Ok(mib) => (mib, None),
        Err(_) => (0.0, Some(format!("unable to parse memory value '{raw}'"))),
    }
}

/// Normalize a quota value according to its resource key.
///
/// CPU keys route to [`normalize_cpu`], memory/storage keys to
/// [`normalize_memory`], count-style keys parse as integers with no unit
/// conversion, and anything else parses as a bare float.
pub fn normalize_quota_value(key: &str, raw: Option<&str>) -> (f64, Option<String>) {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return (0.0, None),
    };

    match ResourceKind::from_quota_key(key) {
        ResourceKind::Cpu => normalize_cpu(Some(raw)),
        ResourceKind::Memory | ResourceKind::EphemeralStorage => normalize_memory(Some(raw)),
        ResourceKind::Count => match raw.parse::<i64>() {
            Ok(n) => (n as f64, None),
            Err(e) => (0.0, Some(format!("parse error for '{key}': {e} in '{raw}'"))),
        },
        ResourceKind::Other => match raw.parse::<f64>() {
            Ok(v) => (v, None),
            Err(e) => (0.0, Some(format!("parse error for '{key}': {e} in '{raw}'"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_millicores() {
        assert_eq!(normalize_cpu(Some("250m")), (0.25, None));
        assert_eq!(normalize_cpu(Some("1500m")), (1.5, None));
        assert_eq!(normalize_cpu(Some("0m")), (0.0, None));
    }

    #[test]
    fn test_cpu_whole_cores() {
        assert_eq!(normalize_cpu(Some("2")), (2.0, None));
        assert_eq!(normalize_cpu(Some("0.5")), (0.5, None));
    }

    #[test]
    fn test_cpu_absent_is_not_an_error() {
        assert_eq!(normalize_cpu(None), (0.0, None));
        assert_eq!(normalize_cpu(Some("")), (0.0, None));
    }

    #[test]
    fn test_cpu_malformed_yields_flag_never_panics() {
        let (v, flag) = normalize_cpu(Some("abc"));
        assert_eq!(v, 0.0);
        assert_eq!(flag.as_deref(), Some("invalid CPU value 'abc'"));

        let (v, flag) = normalize_cpu(Some("2Gi"));
        assert_eq!(v, 0.0);
        assert!(flag.is_some());
    }

    #[test]
    fn test_memory_binary_suffixes() {
        assert_eq!(normalize_memory(Some("2048Ki")), (2.0, None));
        assert_eq!(normalize_memory(Some("128Mi")), (128.0, None));
        assert_eq!(normalize_memory(Some("2Gi")), (2048.0, None));
        assert_eq!(normalize_memory(Some("1Ti")), (1024.0 * 1024.0, None));
    }

    #[test]
    fn test_memory_decimal_suffixes_match_binary_magnitudes() {
        // Compatibility quirk: 1G == 1Gi in this engine.
        assert_eq!(normalize_memory(Some("1G")), normalize_memory(Some("1Gi")));
        assert_eq!(normalize_memory(Some("512M")), normalize_memory(Some("512Mi")));
        assert_eq!(normalize_memory(Some("1024K")), normalize_memory(Some("1024Ki")));
    }

    #[test]
    fn test_memory_unsuffixed_is_bytes() {
        assert_eq!(normalize_memory(Some("1048576")), (1.0, None));
    }

    #[test]
    fn test_memory_milli_suffix_flagged_near_zero() {
        let (v, flag) = normalize_memory(Some("100m"));
        assert!(v > 0.0 && v < 0.001);
        assert_eq!(
            flag.as_deref(),
            Some("non-standard memory suffix 'm' in '100m'")
        );
    }

    #[test]
    fn test_memory_malformed_yields_flag() {
        let (v, flag) = normalize_memory(Some("lots"));
        assert_eq!(v, 0.0);
        assert_eq!(flag.as_deref(), Some("unable to parse memory value 'lots'"));
    }

    #[test]
    fn test_quota_key_classification() {
        assert_eq!(ResourceKind::from_quota_key("limits.cpu"), ResourceKind::Cpu);
        assert_eq!(
            ResourceKind::from_quota_key("requests.memory"),
            ResourceKind::Memory
        );
        assert_eq!(
            ResourceKind::from_quota_key("requests.ephemeral-storage"),
            ResourceKind::EphemeralStorage
        );
        assert_eq!(ResourceKind::from_quota_key("pods"), ResourceKind::Count);
        assert_eq!(
            ResourceKind::from_quota_key("count/deployments.apps"),
            ResourceKind::Count
        );
        assert_eq!(
            ResourceKind::from_quota_key("resourcequotas"),
            ResourceKind::Other
        );
    }

    #[test]
    fn test_quota_value_dispatch() {
        assert_eq!(normalize_quota_value("limits.cpu", Some("500m")), (0.5, None));
        assert_eq!(normalize_quota_value("pods", Some("12")), (12.0, None));
        assert_eq!(
            normalize_quota_value("requests.memory", Some("4Gi")),
            (4096.0, None)
        );
        assert_eq!(normalize_quota_value("resourcequotas", Some("1")), (1.0, None));
    }

    #[test]
    fn test_quota_value_parse_error_names_the_key() {
        let (v, flag) = normalize_quota_value("pods", Some("many"));
        assert_eq!(v, 0.0);
        let flag = flag.unwrap();
        assert!(flag.starts_with("parse error for 'pods':"), "got: {flag}");
    }
}
