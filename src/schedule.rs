//! Step scheduler: global emission order of job records.
//!
//! ## Ordering
//!
//! ```text
//! for step in 0..max(num_jobs)            (over every ordered case)
//!     for case in case order
//!         for entry in case (declared order)
//!             skip if step >= entry.num_jobs
//!             for combo in Combinations(entry.args)
//!                 emit JobRecord { case, step, runfile, combo }
//! ```
//!
//! The (step, case, entry, combo) order is the reproducibility contract: the
//! same specification and case order always produce the same records in the
//! same sequence. The schedule is a lazy iterator; it holds one odometer at a
//! time and borrows everything else from the specification.

use std::borrow::Cow;
use std::fmt;

use crate::expand::Combinations;
use crate::model::{is_placeholder, Case, Entry, Specification, Token};
use crate::order::CaseOrder;

// ---------------------------------------------------------------------------
// JobRecord
// ---------------------------------------------------------------------------

/// One resolved job. Displays as its job-list line (without newline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord<'a> {
    pub case: &'a str,
    pub step: u64,
    pub runfile: &'a str,
    pub combo: Vec<&'a Token>,
}

impl<'a> JobRecord<'a> {
    /// Combo values with `$JOBID` replaced by the step index.
    pub fn fields(&self) -> impl Iterator<Item = Cow<'a, str>> + '_ {
        self.combo.iter().map(move |&token| match token {
            Token::Literal(s) => Cow::Borrowed(s.as_str()),
            Token::JobId => Cow::Owned(self.step.to_string()),
        })
    }
}

impl JobRecord<'_> {
    fn write_name(&self, f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
        if is_placeholder(name) {
            write!(f, "{}", self.step)
        } else {
            f.write_str(name)
        }
    }
}

impl fmt::Display for JobRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Case name and runfile follow the same `$JOBID` rule as the args.
        self.write_name(f, self.case)?;
        write!(f, " {} ", self.step)?;
        self.write_name(f, self.runfile)?;
        for token in &self.combo {
            match token {
                Token::Literal(s) => write!(f, " {s}")?,
                Token::JobId => write!(f, " {}", self.step)?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JobSchedule
// ---------------------------------------------------------------------------

/// Build the lazy, step-major record sequence for `spec` in `order`.
pub fn schedule<'a>(spec: &'a Specification, order: &CaseOrder) -> JobSchedule<'a> {
    let cases: Vec<&'a Case> = order.cases(spec).collect();
    let max_steps = cases.iter().map(|c| c.num_steps()).max().unwrap_or(0);
    JobSchedule {
        cases,
        max_steps,
        step: 0,
        case_pos: 0,
        entry_pos: 0,
        current: None,
    }
}

#[derive(Debug, Clone)]
pub struct JobSchedule<'a> {
    cases: Vec<&'a Case>,
    max_steps: u64,
    step: u64,
    case_pos: usize,
    entry_pos: usize,
    current: Option<(&'a Case, &'a Entry, Combinations<'a, Token>)>,
}

impl JobSchedule<'_> {
    /// Number of steps the schedule spans (`max(num_jobs)` over ordered cases).
    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }
}

impl<'a> Iterator for JobSchedule<'a> {
    type Item = JobRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((case, entry, combos)) = &mut self.current {
                let (case, entry): (&'a Case, &'a Entry) = (*case, *entry);
                if let Some(combo) = combos.next() {
                    return Some(JobRecord {
                        case: &case.name,
                        step: self.step,
                        runfile: &entry.runfile,
                        combo,
                    });
                }
                self.current = None;
                self.entry_pos += 1;
            }

            if self.step >= self.max_steps {
                return None;
            }

            let Some(&case) = self.cases.get(self.case_pos) else {
                self.step += 1;
                self.case_pos = 0;
                self.entry_pos = 0;
                continue;
            };

            let Some(entry) = case.entries.get(self.entry_pos) else {
                self.case_pos += 1;
                self.entry_pos = 0;
                continue;
            };

            if self.step >= entry.num_jobs {
                self.entry_pos += 1;
                continue;
            }

            self.current = Some((case, entry, Combinations::new(&entry.args)));
        }
    }
}
