//! Summary engine: pre-flight line and step counts.
//!
//! Computed from dimension lengths and `num_jobs` alone; no combo is ever
//! expanded. Must agree with what the scheduler emits for the same case
//! order (see `tests/properties.rs`).

use std::fmt;

use serde::Serialize;

use crate::model::Specification;
use crate::order::CaseOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub runfile: String,
    pub num_jobs: u64,
    pub combos_per_step: u64,
    pub lines: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub name: String,
    /// Largest `num_jobs` among the case's entries.
    pub num_steps: u64,
    /// Last step index, `num_steps - 1`.
    pub max_step: u64,
    pub entries: Vec<EntrySummary>,
    pub lines: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Cases in emission order.
    pub per_case: Vec<CaseSummary>,
    pub total_lines: u64,
    /// Largest `num_steps` across all cases.
    pub max_steps: u64,
}

pub fn summarise(spec: &Specification, order: &CaseOrder) -> Summary {
    let mut per_case = Vec::with_capacity(order.len());
    let mut total_lines = 0u64;
    let mut max_steps = 0u64;

    for case in order.cases(spec) {
        let entries: Vec<EntrySummary> = case
            .entries
            .iter()
            .map(|e| EntrySummary {
                runfile: e.runfile.clone(),
                num_jobs: e.num_jobs,
                combos_per_step: e.combo_count(),
                lines: e.line_count(),
            })
            .collect();

        let lines = entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.lines));
        let num_steps = case.num_steps();

        total_lines = total_lines.saturating_add(lines);
        max_steps = max_steps.max(num_steps);
        per_case.push(CaseSummary {
            name: case.name.clone(),
            num_steps,
            max_step: num_steps.saturating_sub(1),
            entries,
            lines,
        });
    }

    Summary {
        per_case,
        total_lines,
        max_steps,
    }
}

impl Summary {
    pub fn case(&self, name: &str) -> Option<&CaseSummary> {
        self.per_case.iter().find(|c| c.name == name)
    }
}

/// Human-readable report, one block per case.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.per_case.iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "Case order: {}", names.join(", "))?;
        for case in &self.per_case {
            writeln!(f, "[{}]", case.name)?;
            writeln!(f, "  steps: {} (0..{})", case.num_steps, case.max_step)?;
            for e in &case.entries {
                writeln!(
                    f,
                    "  - {}: num_jobs={}, combos/step={}, lines={}",
                    e.runfile, e.num_jobs, e.combos_per_step, e.lines
                )?;
            }
            writeln!(f, "  total lines for case: {}", case.lines)?;
        }
        writeln!(f, "TOTAL lines: {}", self.total_lines)?;
        write!(f, "Max steps across cases: {}", self.max_steps)
    }
}
