//! Typed error model for job-list compilation.
//!
//! Every failure maps to exactly one `JobSpecError` variant:
//!
//! ```text
//! load      → Io | Parse | NotAMapping
//! validate  → Structural (case + optional entry index + kind)
//! order     → UnknownCases | DuplicateCase
//! write     → Io
//! preview   → Io
//! ```
//!
//! All errors are fatal to the run. Nothing is retried and no partial job
//! list is ever published.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// JobSpecError: the top-level error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum JobSpecError {
    /// Malformed specification, raised by the validator before any expansion.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The document root is not a `case name → entries` mapping.
    #[error("job specification must be a mapping of case_name -> list of entries")]
    NotAMapping,

    /// The explicit case order names cases the specification does not have.
    #[error("unknown case(s) in case order: {}", names.join(", "))]
    UnknownCases { names: Vec<String> },

    /// The explicit case order names the same case twice.
    #[error("case '{name}' appears more than once in case order")]
    DuplicateCase { name: String },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JobSpecError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = JobSpecError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// StructuralError: validator failures
// ---------------------------------------------------------------------------

/// A structural violation, located by case name and (when the violation is
/// inside an entry) the 0-based entry index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Case '{case}'{}: {kind}", .entry.map(|i| format!(" entry #{i}")).unwrap_or_default())]
pub struct StructuralError {
    pub case: String,
    pub entry: Option<usize>,
    pub kind: StructuralErrorKind,
}

impl StructuralError {
    pub fn case(case: impl Into<String>, kind: StructuralErrorKind) -> Self {
        Self {
            case: case.into(),
            entry: None,
            kind,
        }
    }

    pub fn entry(case: impl Into<String>, entry: usize, kind: StructuralErrorKind) -> Self {
        Self {
            case: case.into(),
            entry: Some(entry),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralErrorKind {
    /// Case key is a list or mapping instead of a scalar name.
    #[error("case name must be a scalar")]
    InvalidCaseName,

    /// Two keys render to the same case name (e.g. `1` and `"1"`).
    #[error("case name is declared more than once")]
    DuplicateName,

    #[error("must be a non-empty list")]
    NotAList,

    #[error("must be a non-empty list")]
    EmptyCase,

    #[error("entry must be a mapping containing runfile, args, num_jobs")]
    EntryNotAMapping,

    #[error("must contain runfile, args, num_jobs (missing '{field}')")]
    MissingField { field: &'static str },

    #[error("'runfile' must be a scalar")]
    InvalidRunfile,

    #[error("'args' must be a list of lists")]
    ArgsNotListOfLists,

    #[error("'args' must contain at least one argument list")]
    EmptyArgs,

    #[error("args list #{dimension} is empty")]
    EmptyDimension { dimension: usize },

    #[error("args list #{dimension} contains a non-scalar value")]
    NonScalarToken { dimension: usize },

    #[error("$JobID must be the only element in an args list (args list #{dimension})")]
    PlaceholderMixed { dimension: usize },

    #[error("num_jobs must be an integer, got '{value}'")]
    InvalidNumJobs { value: String },

    #[error("num_jobs must be > 0, got {value}")]
    NonPositiveNumJobs { value: i128 },

    /// A field would break the space-separated job-list format.
    #[error("{field} '{value}' must be non-empty and contain no whitespace")]
    InvalidField { field: &'static str, value: String },

    #[error("num_jobs x combinations overflows the job counter")]
    TooManyJobs,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
