//! End-to-end generation pipeline.
//!
//! ```text
//! load_cases(spec_path)          → serde_yaml::Mapping
//!     ↓
//! Specification::from_raw        → validated case model   (Structural)
//!     ↓
//! CaseOrder::resolve             → emission order         (UnknownCases | DuplicateCase)
//!     ↓
//! summarise                      → pre-flight counts
//!     ↓
//! schedule → write_job_list      → published job list     (Io)
//!     ↓
//! head_tail (optional)           → preview
//! ```
//!
//! Every failure before the write step aborts with nothing written.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::JobSpecError;
use crate::loader::load_cases;
use crate::model::Specification;
use crate::order::CaseOrder;
use crate::preview::{head_tail_with_window, Preview};
use crate::schedule::{schedule, JobSchedule};
use crate::summary::{summarise, Summary};
use crate::writer::{write_job_list, write_records};

/// A validated specification with its resolved case order and summary,
/// ready to be written.
#[derive(Debug, Clone)]
pub struct JobPlan {
    spec: Specification,
    order: CaseOrder,
    summary: Summary,
}

impl JobPlan {
    /// Load, validate and summarise the specification named by `config`.
    pub fn load(config: &GeneratorConfig) -> Result<Self, JobSpecError> {
        let raw = load_cases(&config.spec_path)?;
        let spec = Specification::from_raw(&raw)?;
        debug!(cases = spec.len(), "specification validated");
        let order = CaseOrder::resolve(&spec, config.case_order.as_slice())?;
        Ok(Self::from_spec(spec, order))
    }

    pub fn from_spec(spec: Specification, order: CaseOrder) -> Self {
        let summary = summarise(&spec, &order);
        Self {
            spec,
            order,
            summary,
        }
    }

    pub fn specification(&self) -> &Specification {
        &self.spec
    }

    pub fn order(&self) -> &CaseOrder {
        &self.order
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Case names in emission order.
    pub fn case_names(&self) -> Vec<&str> {
        self.order.names(&self.spec)
    }

    /// The ordered job records, lazily.
    pub fn records(&self) -> JobSchedule<'_> {
        schedule(&self.spec, &self.order)
    }

    /// Publish the job list at `path`. Returns the number of lines written.
    pub fn write_to(&self, path: &Path) -> Result<u64, JobSpecError> {
        let lines = write_job_list(self.records(), path)?;
        debug_assert_eq!(lines, self.summary.total_lines);
        Ok(lines)
    }

    /// Stream the job list into any writer.
    pub fn write_into<W: Write>(&self, out: W) -> std::io::Result<u64> {
        write_records(self.records(), out)
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub summary: Summary,
    pub lines_written: u64,
    pub out_path: PathBuf,
    pub preview: Option<Preview>,
}

/// Run the whole pipeline for `config`.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport, JobSpecError> {
    let plan = JobPlan::load(config)?;
    info!(
        total_lines = plan.summary().total_lines,
        max_steps = plan.summary().max_steps,
        "job plan ready"
    );

    let lines_written = plan.write_to(&config.out_path)?;
    let preview = config
        .preview_lines
        .map(|n| head_tail_with_window(&config.out_path, n, config.tail_window_bytes))
        .transpose()?;

    Ok(GenerationReport {
        summary: plan.summary,
        lines_written,
        out_path: config.out_path.clone(),
        preview,
    })
}
