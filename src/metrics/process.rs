//! Process Memory Sampling — /proc Reads for the Informational Route
//!
//! The `/my-app` body reports the pod's resident set size. The scrape
//! path gets this from the Prometheus process collector; this helper
//! exists for the JSON response, which samples at request time.

/// Resident set size in MiB, read from `/proc/self/statm`.
///
/// Returns `None` off Linux or if /proc is unreadable, in which case
/// the caller reports 0.
#[cfg(target_os = "linux")]
pub fn resident_memory_mb() -> Option<f64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    resident_pages(&statm).map(pages_to_mb)
}

#[cfg(not(target_os = "linux"))]
pub fn resident_memory_mb() -> Option<f64> {
    None
}

/// Second field of statm is the resident page count.
#[cfg(target_os = "linux")]
fn resident_pages(statm: &str) -> Option<f64> {
    statm.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(target_os = "linux")]
fn pages_to_mb(pages: f64) -> f64 {
    // statm reports in pages; 4 KiB pages on every Linux target this
    // service ships to.
    pages * 4096.0 / (1024.0 * 1024.0)
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn test_statm_second_field_is_rss() {
        let pages = resident_pages("12345 2560 800 50 0 1200 0\n").unwrap();
        assert!((pages - 2560.0).abs() < f64::EPSILON);
        // 2560 pages * 4 KiB = 10 MiB
        assert!((pages_to_mb(pages) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_statm_yields_none() {
        assert!(resident_pages("garbage").is_none());
        assert!(resident_pages("").is_none());
    }

    #[test]
    fn test_live_sample_is_positive() {
        let mb = resident_memory_mb().unwrap();
        assert!(mb > 0.0);
    }
}
