//! a11ybench CLI binary entry point.
//! Delegates to the audit/batch drivers and prints results.

mod aggregate;
mod audit;
mod batch;
mod bench;
mod cli;
mod config;
mod error;
mod extract;
mod models;
mod output;
mod utils;

use crate::models::raw::{AxeReport, LighthouseReport, Pa11yIssue};
use crate::models::taxonomy::Taxonomy;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::path::PathBuf;

/// Gate shared by both commands: a configured, existing, loadable taxonomy.
fn load_taxonomy_or_exit(eff: &config::Effective) -> Taxonomy {
    if !eff.taxonomy_configured {
        eprintln!(
            "{} {}",
            utils::error_prefix(),
            "Taxonomy is not configured. Pass --taxonomy or add a11ybench.toml."
        );
        std::process::exit(2);
    }
    if config::load_config(&eff.repo_root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No a11ybench.toml found; using defaults."
        );
    }
    let path = eff.repo_root.join(&eff.taxonomy);
    if !path.is_file() {
        eprintln!(
            "{} {}",
            utils::error_prefix(),
            format!(
                "Taxonomy file not found: {} (pass --taxonomy or configure a11ybench.toml)",
                path.to_string_lossy()
            )
        );
        std::process::exit(2);
    }
    match Taxonomy::load(&path) {
        Ok(taxonomy) => taxonomy,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Audit {
            axe,
            pa11y,
            lighthouse,
            repo_root,
            taxonomy,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                taxonomy.as_deref(),
                output.as_deref(),
                None,
                None,
            );
            let taxonomy = load_taxonomy_or_exit(&eff);

            let result = (|| {
                let axe_report: AxeReport = batch::read_json(Path::new(&axe))?;
                let pa11y_report: Vec<Pa11yIssue> = batch::read_json(Path::new(&pa11y))?;
                let lighthouse_report: Option<LighthouseReport> = match lighthouse.as_deref() {
                    Some(path) => Some(batch::read_json(Path::new(path))?),
                    None => None,
                };
                audit::audit_page(
                    &axe_report,
                    &pa11y_report,
                    lighthouse_report.as_ref(),
                    &taxonomy,
                    &eff.thresholds,
                )
            })();

            match result {
                Ok(page_audit) => output::print_audit(&page_audit, &eff.output),
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Batch {
            repo_root,
            reports_dir,
            taxonomy,
            output,
            write,
            check,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                taxonomy.as_deref(),
                output.as_deref(),
                reports_dir.as_deref(),
                if write { Some(true) } else { None },
            );
            let taxonomy = load_taxonomy_or_exit(&eff);

            let dir = eff.repo_root.join(&eff.reports_dir);
            if !dir.is_dir() {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!(
                        "Reports directory not found: {} (pass --reports-dir or configure a11ybench.toml)",
                        dir.to_string_lossy()
                    )
                );
                std::process::exit(2);
            }

            let outcomes = batch::run_batch(&dir, &taxonomy, &eff.thresholds);
            if outcomes.is_empty() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!(
                        "No *{} bundles found in {}",
                        batch::AXE_SUFFIX,
                        dir.to_string_lossy()
                    )
                );
            }

            let mut write_failures = 0usize;
            if eff.write {
                let shown: PathBuf = pathdiff::diff_paths(&dir, &eff.repo_root)
                    .unwrap_or_else(|| dir.clone());
                if eff.output != "json" {
                    eprintln!(
                        "{} {}",
                        utils::info_prefix(),
                        format!("Writing report files to {}", shown.to_string_lossy())
                    );
                }
                for outcome in &outcomes {
                    if let Ok(page_audit) = &outcome.result {
                        if let Err(e) = batch::write_reports(&dir, &outcome.page, page_audit) {
                            eprintln!("{} {}", utils::error_prefix(), e);
                            write_failures += 1;
                        }
                    }
                }
            }

            output::print_batch(&outcomes, &eff.output);

            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            let any_red = outcomes.iter().any(|o| {
                o.result
                    .as_ref()
                    .map(|a| a.overview.status == models::Status::Red)
                    .unwrap_or(false)
            });
            if failed > 0 || write_failures > 0 || (check && any_red) {
                std::process::exit(1);
            }
        }
    }
}
