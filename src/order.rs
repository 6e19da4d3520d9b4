//! Case order: which cases are emitted, and in what sequence.
//!
//! A `CaseOrder` is resolved once against a `Specification` and then passed
//! explicitly to both the summary engine and the scheduler, so the two can
//! never disagree about ordering.

use tracing::warn;

use crate::error::JobSpecError;
use crate::model::{Case, Specification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOrder {
    indices: Vec<usize>,
}

impl CaseOrder {
    /// Declaration order of the specification.
    pub fn declared(spec: &Specification) -> Self {
        Self {
            indices: (0..spec.len()).collect(),
        }
    }

    /// Resolve an explicit override. An empty override means declaration
    /// order. Unknown names are all reported together; a name may not repeat.
    /// Naming only some cases selects just those.
    pub fn resolve<S: AsRef<str>>(
        spec: &Specification,
        names: &[S],
    ) -> Result<Self, JobSpecError> {
        if names.is_empty() {
            return Ok(Self::declared(spec));
        }

        let mut resolved = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            let name: &str = name.as_ref();
            match spec.position(name) {
                Some(idx) => resolved.push((name, idx)),
                None => unknown.push(name.to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(JobSpecError::UnknownCases { names: unknown });
        }

        let mut indices: Vec<usize> = Vec::with_capacity(resolved.len());
        for (name, idx) in resolved {
            if indices.contains(&idx) {
                return Err(JobSpecError::DuplicateCase {
                    name: name.to_string(),
                });
            }
            indices.push(idx);
        }

        if indices.len() < spec.len() {
            let skipped: Vec<&str> = spec
                .case_names()
                .enumerate()
                .filter(|(i, _)| !indices.contains(i))
                .map(|(_, n)| n)
                .collect();
            warn!(?skipped, "case order selects a subset of cases");
        }

        Ok(Self { indices })
    }

    /// Split a comma-separated override (`"B1, B2,,B3"`), trimming whitespace
    /// and dropping empty items.
    pub fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Cases in emission order. Indices that do not exist in `spec` (an
    /// order resolved against a different specification) are skipped.
    pub fn cases<'s, 'a: 's>(
        &'s self,
        spec: &'a Specification,
    ) -> impl Iterator<Item = &'a Case> + 's {
        self.indices.iter().filter_map(move |&i| spec.cases().get(i))
    }

    pub fn names<'a>(&self, spec: &'a Specification) -> Vec<&'a str> {
        self.cases(spec).map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;

    fn spec() -> Specification {
        Specification::from_cases(
            ["A", "B", "C"]
                .into_iter()
                .map(|n| (n, vec![Entry::new("run.sh", [vec!["1"]], 1)])),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_override_is_declaration_order() {
        let spec = spec();
        let order = CaseOrder::resolve::<&str>(&spec, &[]).unwrap();
        assert_eq!(order.names(&spec), ["A", "B", "C"]);
        assert_eq!(order, CaseOrder::declared(&spec));
    }

    #[test]
    fn test_explicit_permutation() {
        let spec = spec();
        let order = CaseOrder::resolve(&spec, &["C", "A", "B"]).unwrap();
        assert_eq!(order.names(&spec), ["C", "A", "B"]);
    }

    #[test]
    fn test_unknown_names_reported_together() {
        let spec = spec();
        let err = CaseOrder::resolve(&spec, &["A", "X", "Y"]).unwrap_err();
        match err {
            JobSpecError::UnknownCases { names } => assert_eq!(names, ["X", "Y"]),
            other => panic!("expected UnknownCases, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let spec = spec();
        let err = CaseOrder::resolve(&spec, &["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, JobSpecError::DuplicateCase { ref name } if name == "A"));
    }

    #[test]
    fn test_subset_selects_cases() {
        let spec = spec();
        let order = CaseOrder::resolve(&spec, &["B"]).unwrap();
        assert_eq!(order.names(&spec), ["B"]);
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_cases_borrow_outlives_order() {
        let spec = spec();
        let cases: Vec<&Case> = {
            let order = CaseOrder::resolve(&spec, &["C", "A"]).unwrap();
            order.cases(&spec).collect()
        };
        assert_eq!(cases[0].name, "C");
        assert_eq!(cases[1].name, "A");
    }

    #[test]
    fn test_order_from_larger_spec_skips_missing_cases() {
        let big = spec();
        let order = CaseOrder::resolve(&big, &["C", "A"]).unwrap();
        let small = Specification::from_cases([(
            "only",
            vec![Entry::new("run.sh", [vec!["1"]], 1)],
        )])
        .unwrap();
        assert_eq!(order.names(&small), ["only"]);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(CaseOrder::parse_list(" B1, B2,,B3 ,"), ["B1", "B2", "B3"]);
        assert!(CaseOrder::parse_list("  ").is_empty());
    }
}
