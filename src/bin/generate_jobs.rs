//! Generate an HTCondor `jobs.list` from a YAML case specification.
//!
//! Usage:
//!   generate_jobs --spec cases.yaml
//!   generate_jobs --spec cases.yaml --out jobs.list --case-order B2,B1 --preview
//!   generate_jobs --spec cases.yaml --json
//!
//! Logging goes to stderr; set `RUST_LOG=jobgen=debug` for stage-by-stage
//! detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jobgen::config::{DEFAULT_OUT_PATH, DEFAULT_PREVIEW_LINES};
use jobgen::preview::head_tail_with_window;
use jobgen::{generate, CaseOrder, GeneratorConfig, JobPlan};

/// Generate HTCondor jobs.list from a YAML spec.
#[derive(Parser, Debug)]
#[command(name = "generate_jobs")]
#[command(about = "Generate HTCondor jobs.list from a YAML spec")]
struct Args {
    /// YAML spec file
    #[arg(long, env = "JOBGEN_SPEC")]
    spec: PathBuf,

    /// Output file
    #[arg(long, env = "JOBGEN_OUT", default_value = DEFAULT_OUT_PATH)]
    out: PathBuf,

    /// Comma-separated case order (default: YAML order)
    #[arg(long, default_value = "")]
    case_order: String,

    /// After writing, print first/last few lines
    #[arg(long)]
    preview: bool,

    /// How many lines to show for --preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LINES)]
    preview_lines: usize,

    /// Print the run report (summary, lines written, preview) as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new(&self.spec)
            .out_path(&self.out)
            .case_order(CaseOrder::parse_list(&self.case_order));
        if self.preview {
            config.preview(self.preview_lines)
        } else {
            config
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = args.config();

    if args.json {
        let report = generate(&config).with_context(|| {
            format!("failed to generate from {}", config.spec_path.display())
        })?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let plan = JobPlan::load(&config)
        .with_context(|| format!("invalid job specification {}", config.spec_path.display()))?;

    println!("Spec: {}", config.spec_path.display());
    println!("{}", plan.summary());

    plan.write_to(&config.out_path)
        .with_context(|| format!("failed to write {}", config.out_path.display()))?;
    println!("Wrote: {}", config.out_path.display());

    if let Some(n) = config.preview_lines {
        let preview = head_tail_with_window(&config.out_path, n, config.tail_window_bytes)?;
        println!();
        print!("{preview}");
    }

    Ok(())
}
