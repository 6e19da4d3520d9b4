//! Structural validation of job specifications.
//!
//! Two layers share one set of rules:
//!
//! - **shape** (`case_from_value`): the parsed YAML has the right kinds of
//!   nodes: entry lists are lists, entries carry `runfile`/`args`/`num_jobs`,
//!   `args` is a list of lists of scalars, `num_jobs` coerces to an integer;
//! - **invariants** (`check_case` / `check_entry`): the typed model is
//!   emittable: non-empty dimensions, `$JOBID` alone in its dimension,
//!   `num_jobs > 0`, no field that would break the space-separated format.
//!
//! Entries are taken one at a time, in order, and each passes both layers
//! before the next is read. Validation stops at the first violation and
//! reports the case name and entry index. Nothing is partially applied.

use serde_yaml::{Mapping, Value};

use crate::error::{JobSpecError, StructuralError, StructuralErrorKind as Kind};
use crate::expand::checked_combo_count;
use crate::model::{Case, Dimension, Entry, Specification, Token};

/// Check a parsed document without keeping the resulting model.
pub fn validate_cases(raw: &Mapping) -> Result<(), JobSpecError> {
    Specification::from_raw(raw).map(drop)
}

// ---------------------------------------------------------------------------
// Shape: serde_yaml::Value → model
// ---------------------------------------------------------------------------

pub(crate) fn case_from_value(key: &Value, value: &Value) -> Result<Case, StructuralError> {
    let name = scalar_to_string(key)
        .ok_or_else(|| StructuralError::case(format!("{key:?}"), Kind::InvalidCaseName))?;
    check_field("case name", &name).map_err(|kind| StructuralError::case(&name, kind))?;

    let items = match value {
        Value::Sequence(items) if items.is_empty() => {
            return Err(StructuralError::case(name, Kind::EmptyCase))
        }
        Value::Sequence(items) => items,
        _ => return Err(StructuralError::case(name, Kind::NotAList)),
    };

    // Each entry is checked completely before the next one is looked at.
    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Entry, StructuralError> {
            let entry = entry_from_value(&name, i, item)?;
            check_entry(&entry).map_err(|kind| StructuralError::entry(&name, i, kind))?;
            Ok(entry)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Case { name, entries })
}

fn entry_from_value(case: &str, index: usize, value: &Value) -> Result<Entry, StructuralError> {
    let fail = |kind| StructuralError::entry(case, index, kind);

    let map = value.as_mapping().ok_or_else(|| fail(Kind::EntryNotAMapping))?;
    let field = |name: &'static str| {
        map.get(name)
            .ok_or_else(|| fail(Kind::MissingField { field: name }))
    };
    let runfile = field("runfile")?;
    let args = field("args")?;
    let num_jobs = field("num_jobs")?;

    let runfile = scalar_to_string(runfile).ok_or_else(|| fail(Kind::InvalidRunfile))?;
    let args = args_from_value(args).map_err(fail)?;
    check_dimensions(&args).map_err(fail)?;
    let num_jobs = coerce_num_jobs(num_jobs).map_err(fail)?;

    Ok(Entry {
        runfile,
        args,
        num_jobs,
    })
}

fn args_from_value(value: &Value) -> Result<Vec<Dimension>, Kind> {
    let dims = value.as_sequence().ok_or(Kind::ArgsNotListOfLists)?;
    dims.iter()
        .enumerate()
        .map(|(d, dim)| -> Result<Dimension, Kind> {
            let tokens = dim.as_sequence().ok_or(Kind::ArgsNotListOfLists)?;
            tokens
                .iter()
                .map(|t| {
                    scalar_to_string(t)
                        .map(Token::parse)
                        .ok_or(Kind::NonScalarToken { dimension: d })
                })
                .collect()
        })
        .collect()
}

/// Coerce `num_jobs` to a positive integer.
///
/// Accepts integers, integral floats (`4.0`) and integer strings (`"4"`).
/// Fractional values are rejected rather than truncated.
pub(crate) fn coerce_num_jobs(value: &Value) -> Result<u64, Kind> {
    let invalid = || Kind::InvalidNumJobs {
        value: scalar_to_string(value).unwrap_or_else(|| format!("{value:?}")),
    };

    let n: i128 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i128::from(i)
            } else if let Some(u) = n.as_u64() {
                i128::from(u)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e30 => f as i128,
                    _ => return Err(invalid()),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if n <= 0 {
        return Err(Kind::NonPositiveNumJobs { value: n });
    }
    u64::try_from(n).map_err(|_| Kind::TooManyJobs)
}

/// Render a YAML scalar the way it appears in the job list. Booleans are
/// capitalised (`True`/`False`) so lists match those written by the
/// existing submission tooling.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Invariants on the typed model
// ---------------------------------------------------------------------------

pub(crate) fn check_case(case: &Case) -> Result<(), StructuralError> {
    let name = case.name.as_str();
    check_field("case name", name).map_err(|kind| StructuralError::case(name, kind))?;
    if case.entries.is_empty() {
        return Err(StructuralError::case(name, Kind::EmptyCase));
    }
    for (i, entry) in case.entries.iter().enumerate() {
        check_entry(entry).map_err(|kind| StructuralError::entry(name, i, kind))?;
    }
    Ok(())
}

pub(crate) fn check_entry(entry: &Entry) -> Result<(), Kind> {
    check_dimensions(&entry.args)?;

    if entry.num_jobs == 0 {
        return Err(Kind::NonPositiveNumJobs { value: 0 });
    }

    check_field("runfile", &entry.runfile)?;
    for token in entry.args.iter().flatten() {
        if let Token::Literal(s) = token {
            check_field("argument", s)?;
        }
    }

    checked_combo_count(&entry.args)
        .and_then(|c| c.checked_mul(entry.num_jobs))
        .ok_or(Kind::TooManyJobs)?;
    Ok(())
}

fn check_dimensions(args: &[Dimension]) -> Result<(), Kind> {
    if args.is_empty() {
        return Err(Kind::EmptyArgs);
    }
    for (d, dim) in args.iter().enumerate() {
        if dim.is_empty() {
            return Err(Kind::EmptyDimension { dimension: d });
        }
        if dim.len() > 1 && dim.iter().any(Token::is_placeholder) {
            return Err(Kind::PlaceholderMixed { dimension: d });
        }
    }
    Ok(())
}

fn check_field(field: &'static str, value: &str) -> Result<(), Kind> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(Kind::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
