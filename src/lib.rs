//! jobgen: compiles hierarchical case specifications into flat,
//! step-ordered job lists for HTCondor-style job arrays.
//!
//! A specification maps case names to entries; each entry names an opaque
//! payload (`runfile`), a list of argument dimensions and a repetition count
//! (`num_jobs`). Compilation expands every entry into one job per step per
//! argument combination and emits them step-major:
//!
//! ```text
//! B1:                                  B1 0 track.py h 0
//!   - runfile: track.py                B1 0 track.py v 0
//!     args: [[h, v], [$JOBID]]   →     B1 1 track.py h 1
//!     num_jobs: 2                      B1 1 track.py v 1
//! ```
//!
//! ## Invariants
//!
//! - Records are ordered by (step, case order, entry order, combo order).
//! - Identical input and case order produce byte-identical output.
//! - `$JOBID` (any case) is replaced by the step index wherever it appears as
//!   a whole field, and must be alone in its args dimension.
//! - The summary line count equals the number of lines written.

pub mod config;
pub mod error;
pub mod expand;
pub mod loader;
pub mod model;
pub mod order;
pub mod pipeline;
pub mod preview;
pub mod schedule;
pub mod summary;
pub mod validate;
pub mod writer;

pub use config::GeneratorConfig;
pub use error::{JobSpecError, StructuralError, StructuralErrorKind};
pub use expand::{combo_count, Combinations};
pub use loader::{load_cases, parse_cases};
pub use model::{Case, Dimension, Entry, Specification, Token, JOBID_PLACEHOLDER};
pub use order::CaseOrder;
pub use pipeline::{generate, GenerationReport, JobPlan};
pub use preview::{head_tail, Preview};
pub use schedule::{schedule, JobRecord, JobSchedule};
pub use summary::{summarise, CaseSummary, EntrySummary, Summary};
pub use validate::validate_cases;
pub use writer::{write_job_list, write_records};
