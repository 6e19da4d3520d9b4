//! Case model: the in-memory form of a parsed job specification.
//!
//! Pure data. A `Specification` is only ever built through
//! [`Specification::from_raw`] or [`Specification::from_cases`], both of which
//! run the validator, so every value reachable from it satisfies:
//!
//! - case names are unique, non-empty, whitespace-free;
//! - every case has at least one entry;
//! - every entry has at least one dimension, every dimension at least one token;
//! - a dimension holding `$JOBID` holds nothing else;
//! - `num_jobs > 0` and `num_jobs × combos` fits in a `u64`.

use std::fmt;

use serde::Serialize;
use serde_yaml::Mapping;

use crate::error::{JobSpecError, StructuralError, StructuralErrorKind};
use crate::validate;

/// The reserved placeholder, substituted with the step index at emission.
pub const JOBID_PLACEHOLDER: &str = "$JOBID";

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// One argument value: either an opaque literal or a reference to the
/// current step index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(String),
    JobId,
}

impl Serialize for Token {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl Token {
    /// Classify a rendered token. `$JOBID` matches case-insensitively.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_placeholder(&raw) {
            Token::JobId
        } else {
            Token::Literal(raw)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::JobId)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(s) => f.write_str(s),
            Token::JobId => f.write_str(JOBID_PLACEHOLDER),
        }
    }
}

pub(crate) fn is_placeholder(s: &str) -> bool {
    s.eq_ignore_ascii_case(JOBID_PLACEHOLDER)
}

/// One axis of argument variation.
pub type Dimension = Vec<Token>;

// ---------------------------------------------------------------------------
// Entry / Case / Specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub runfile: String,
    pub args: Vec<Dimension>,
    pub num_jobs: u64,
}

impl Entry {
    /// Build an entry from plain strings. Not validated until it is placed in
    /// a `Specification`.
    pub fn new<S, D>(runfile: impl Into<String>, args: D, num_jobs: u64) -> Self
    where
        S: Into<String>,
        D: IntoIterator,
        D::Item: IntoIterator<Item = S>,
    {
        Self {
            runfile: runfile.into(),
            args: args
                .into_iter()
                .map(|dim| dim.into_iter().map(Token::parse).collect())
                .collect(),
            num_jobs,
        }
    }

    /// Number of combos per step: the product of dimension lengths.
    pub fn combo_count(&self) -> u64 {
        crate::expand::combo_count(&self.args)
    }

    /// Total job lines this entry contributes across all of its steps.
    pub fn line_count(&self) -> u64 {
        self.num_jobs.saturating_mul(self.combo_count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Case {
    /// Steps this case spans: the largest `num_jobs` among its entries.
    pub fn num_steps(&self) -> u64 {
        self.entries.iter().map(|e| e.num_jobs).max().unwrap_or(0)
    }
}

/// Validated top-level specification; cases kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specification {
    cases: Vec<Case>,
}

impl Specification {
    /// Validate a parsed document and build the case model from it.
    pub fn from_raw(raw: &Mapping) -> Result<Self, JobSpecError> {
        let mut cases: Vec<Case> = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let case = validate::case_from_value(key, value)?;
            if cases.iter().any(|c| c.name == case.name) {
                return Err(duplicate(case.name).into());
            }
            cases.push(case);
        }
        Ok(Self { cases })
    }

    /// Build a specification from already-typed cases, running the same
    /// invariant checks as [`Specification::from_raw`].
    pub fn from_cases<N, I>(cases: I) -> Result<Self, JobSpecError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<Entry>)>,
    {
        let mut built: Vec<Case> = Vec::new();
        for (name, entries) in cases {
            let name = name.into();
            if built.iter().any(|c| c.name == name) {
                return Err(duplicate(name).into());
            }
            let case = Case { name, entries };
            validate::check_case(&case)?;
            built.push(case);
        }
        Ok(Self { cases: built })
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.name == name)
    }

    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }
}

fn duplicate(name: String) -> StructuralError {
    StructuralError::case(name, StructuralErrorKind::DuplicateName)
}
