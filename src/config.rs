//! Configuration discovery and effective settings resolution.
//!
//! a11ybench reads `a11ybench.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `[thresholds]`: high 0.25 / low 0.1 for both rates
//! - `[batch].reports_dir`: `reports`
//! - `[batch].write`: false
//!
//! Overrides precedence: CLI > config file > defaults. The taxonomy path
//! has no default: commands require it to be configured.

use crate::bench::Thresholds;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `a11ybench.toml|yaml`.
pub struct BenchConfig {
    pub taxonomy: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub thresholds: Option<ThresholdsCfg>,
    #[serde(default)]
    pub batch: Option<BatchCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Status-band thresholds under `[thresholds]`; unset fields keep their
/// defaults.
pub struct ThresholdsCfg {
    pub inaccessibility_high: Option<f64>,
    pub inaccessibility_low: Option<f64>,
    pub impact_weighted_high: Option<f64>,
    pub impact_weighted_low: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Batch-related configuration section under `[batch]`.
pub struct BatchCfg {
    pub reports_dir: Option<String>,
    pub write: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub taxonomy: String,
    pub taxonomy_configured: bool,
    pub output: String,
    pub thresholds: Thresholds,
    pub reports_dir: String,
    pub write: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `a11ybench.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("a11ybench.toml").exists()
            || cur.join("a11ybench.yaml").exists()
            || cur.join("a11ybench.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BenchConfig` from `a11ybench.toml` or `a11ybench.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<BenchConfig> {
    let toml_path = root.join("a11ybench.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: BenchConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["a11ybench.yaml", "a11ybench.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: BenchConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

fn resolve_thresholds(cfg: Option<&ThresholdsCfg>) -> Thresholds {
    let defaults = Thresholds::default();
    match cfg {
        Some(t) => Thresholds {
            inaccessibility_high: t
                .inaccessibility_high
                .unwrap_or(defaults.inaccessibility_high),
            inaccessibility_low: t
                .inaccessibility_low
                .unwrap_or(defaults.inaccessibility_low),
            impact_weighted_high: t
                .impact_weighted_high
                .unwrap_or(defaults.impact_weighted_high),
            impact_weighted_low: t
                .impact_weighted_low
                .unwrap_or(defaults.impact_weighted_low),
        },
        None => defaults,
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_taxonomy: Option<&str>,
    cli_output: Option<&str>,
    cli_reports_dir: Option<&str>,
    cli_write: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let taxonomy_src = cli_taxonomy.map(|s| s.to_string()).or(cfg.taxonomy);
    let (taxonomy, taxonomy_configured) = match taxonomy_src {
        Some(s) => (s, true),
        None => (String::new(), false),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let thresholds = resolve_thresholds(cfg.thresholds.as_ref());

    let reports_dir = cli_reports_dir
        .map(|s| s.to_string())
        .or_else(|| cfg.batch.as_ref().and_then(|b| b.reports_dir.clone()))
        .unwrap_or_else(|| "reports".to_string());
    let write = cli_write
        .or_else(|| cfg.batch.as_ref().and_then(|b| b.write))
        .unwrap_or(false);

    Effective {
        repo_root,
        taxonomy,
        taxonomy_configured,
        output,
        thresholds,
        reports_dir,
        write,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("a11ybench.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
taxonomy = "taxonomy/wcag.toml"
output = "json"
[thresholds]
inaccessibility_high = 0.4
"#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.taxonomy, "taxonomy/wcag.toml");
        assert!(eff.taxonomy_configured);
        assert_eq!(eff.output, "json");
        assert!((eff.thresholds.inaccessibility_high - 0.4).abs() < 1e-9);
        // unset threshold fields keep their defaults
        assert!((eff.thresholds.impact_weighted_low - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("a11ybench.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
taxonomy: taxonomy/wcag.toml
batch:
  reports_dir: out/reports
  write: true
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.taxonomy, "taxonomy/wcag.toml");
        assert_eq!(eff.output, "human");
        assert_eq!(eff.reports_dir, "out/reports");
        assert!(eff.write);
        assert!((eff.thresholds.inaccessibility_high - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_cli_takes_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("a11ybench.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
taxonomy = "from-config.toml"
output = "json"
[batch]
write = true
"#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            Some("from-cli.toml"),
            Some("human"),
            Some("elsewhere"),
            Some(false),
        );
        assert_eq!(eff.taxonomy, "from-cli.toml");
        assert_eq!(eff.output, "human");
        assert_eq!(eff.reports_dir, "elsewhere");
        assert!(!eff.write);
    }

    #[test]
    fn test_unconfigured_taxonomy() {
        let dir = tempdir().unwrap();
        // no config file at all; .git marks the root
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None, None);
        assert!(!eff.taxonomy_configured);
        assert_eq!(eff.reports_dir, "reports");
    }
}
