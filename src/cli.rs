//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "a11ybench",
    version,
    about = "Accessibility audit merger and benchmarker",
    long_about = "a11ybench — merge axe-core, pa11y, and Lighthouse reports into one canonical accessibility issue catalog with benchmark scores.\n\nConfiguration precedence: CLI > a11ybench.toml > defaults.",
    after_help = "Examples:\n  a11ybench audit --axe page.axe.json --pa11y page.pa11y.json --taxonomy taxonomy/wcag.toml\n  a11ybench audit --axe page.axe.json --pa11y page.pa11y.json --lighthouse page.lighthouse.json --output json\n  a11ybench batch --reports-dir reports --write\n  a11ybench batch --reports-dir reports --check",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for auditing pages.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current a11ybench version.")]
    Version,
    /// Audit a single page from its tool reports
    #[command(
        about = "Audit one page",
        long_about = "Merge the tool reports of one page into the canonical issue catalog and print it with benchmark scores. The lighthouse report is optional; axe-core and pa11y are required.",
        after_help = "Examples:\n  a11ybench audit --axe page.axe.json --pa11y page.pa11y.json\n  a11ybench audit --axe page.axe.json --pa11y page.pa11y.json --output json"
    )]
    Audit {
        #[arg(long, help = "Path to the axe-core JSON report")]
        axe: String,
        #[arg(long, help = "Path to the pa11y JSON report")]
        pa11y: String,
        #[arg(long, help = "Path to the lighthouse JSON report (optional)")]
        lighthouse: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to the rule taxonomy table (required)")]
        taxonomy: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Audit every report bundle in a directory
    #[command(
        about = "Audit a directory of report bundles",
        long_about = "Discover <page>.axe.json bundles in the reports directory, audit every page in parallel, and print a per-page summary. A malformed report fails its own page only.",
        after_help = "Examples:\n  a11ybench batch --reports-dir reports\n  a11ybench batch --reports-dir reports --write\n  a11ybench batch --check"
    )]
    Batch {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Directory containing <page>.axe.json bundles")]
        reports_dir: Option<String>,
        #[arg(long, help = "Path to the rule taxonomy table (required)")]
        taxonomy: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write per-page report files next to the inputs")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero when any page fails or is classified Red")]
        check: bool,
    },
}
