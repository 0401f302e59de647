//! Benchmark scoring: coverage-normalized rates and the risk band.

use crate::models::{Impact, Status};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
/// Threshold constants for the status bands.
///
/// These changed between revisions of the methodology without the
/// algorithm changing, so they are configuration, not code.
pub struct Thresholds {
    pub inaccessibility_high: f64,
    pub inaccessibility_low: f64,
    pub impact_weighted_high: f64,
    pub impact_weighted_low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            inaccessibility_high: 0.25,
            inaccessibility_low: 0.1,
            impact_weighted_high: 0.25,
            impact_weighted_low: 0.1,
        }
    }
}

/// `failed / total`, defined as 0 when nothing was checked.
pub fn inaccessibility_rate(failed_nodes: usize, total_nodes_checked: usize) -> f64 {
    if total_nodes_checked == 0 {
        0.0
    } else {
        failed_nodes as f64 / total_nodes_checked as f64
    }
}

/// Severity-weighted rate over `(failed-node amount, impact)` pairs,
/// normalized to [0, 1]; 1.0 means every failing node is critical. Defined
/// as 0 when no nodes failed.
pub fn impact_weighted_rate(groups: impl Iterator<Item = (usize, Impact)>) -> f64 {
    let mut weighted = 0u64;
    let mut total = 0u64;
    for (amount, impact) in groups {
        weighted += amount as u64 * impact.weight();
        total += amount as u64;
    }
    if total == 0 {
        0.0
    } else {
        weighted as f64 / (total * Impact::MAX_WEIGHT) as f64
    }
}

/// Band classification over both rates.
///
/// Red requires both rates above their high thresholds; Green requires
/// both at or below their low thresholds; Yellow is the catch-all middle
/// band — many-but-mild and few-but-severe pages both land there.
pub fn status(inaccessibility: f64, impact_weighted: f64, thresholds: &Thresholds) -> Status {
    if inaccessibility > thresholds.inaccessibility_high
        && impact_weighted > thresholds.impact_weighted_high
    {
        Status::Red
    } else if inaccessibility <= thresholds.inaccessibility_low
        && impact_weighted <= thresholds.impact_weighted_low
    {
        Status::Green
    } else {
        Status::Yellow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_zero_without_input() {
        assert_eq!(inaccessibility_rate(0, 0), 0.0);
        assert_eq!(inaccessibility_rate(5, 0), 0.0);
        assert_eq!(impact_weighted_rate(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_reference_scenario() {
        // 3 serious failed nodes out of 10 checked
        let ir = inaccessibility_rate(3, 10);
        let iw = impact_weighted_rate([(3, Impact::Serious)].into_iter());
        assert!((ir - 0.3).abs() < 1e-9);
        assert!((iw - 0.6).abs() < 1e-9);
        assert_eq!(status(ir, iw, &Thresholds::default()), Status::Red);
    }

    #[test]
    fn test_weighted_rate_bounds() {
        let all_critical = impact_weighted_rate([(4, Impact::Critical)].into_iter());
        assert!((all_critical - 1.0).abs() < 1e-9);
        let all_minor = impact_weighted_rate([(4, Impact::Minor)].into_iter());
        assert!((all_minor - 0.1).abs() < 1e-9);
        let mixed = impact_weighted_rate(
            [
                (1, Impact::Critical),
                (2, Impact::Serious),
                (3, Impact::Moderate),
                (4, Impact::Minor),
            ]
            .into_iter(),
        );
        assert!(mixed > 0.0 && mixed < 1.0);
    }

    #[test]
    fn test_status_covers_the_unit_square() {
        // Every rate pair maps to exactly one band; sample a coarse grid
        // including the threshold boundaries themselves.
        let thresholds = Thresholds::default();
        let mut seen = [false; 3];
        let mut v = 0.0f64;
        let mut values = Vec::new();
        while v <= 1.0 {
            values.push(v);
            v += 0.05;
        }
        values.extend([0.1, 0.25]);
        for &ir in &values {
            for &iw in &values {
                match status(ir, iw, &thresholds) {
                    Status::Red => seen[0] = true,
                    Status::Yellow => seen[1] = true,
                    Status::Green => seen[2] = true,
                }
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_status_boundaries() {
        let t = Thresholds::default();
        // Exactly at the low thresholds: still Green
        assert_eq!(status(0.1, 0.1, &t), Status::Green);
        // Exactly at the high thresholds: not Red (strict comparison)
        assert_eq!(status(0.25, 0.25, &t), Status::Yellow);
        // Just above both high thresholds: Red
        assert_eq!(status(0.26, 0.26, &t), Status::Red);
        // Asymmetric pages are Yellow either way
        assert_eq!(status(0.9, 0.05, &t), Status::Yellow);
        assert_eq!(status(0.05, 0.9, &t), Status::Yellow);
    }

    #[test]
    fn test_custom_thresholds_move_the_bands() {
        let strict = Thresholds {
            inaccessibility_high: 0.05,
            inaccessibility_low: 0.01,
            impact_weighted_high: 0.05,
            impact_weighted_low: 0.01,
        };
        assert_eq!(status(0.1, 0.1, &strict), Status::Red);
        assert_eq!(status(0.1, 0.1, &Thresholds::default()), Status::Green);
    }
}
