//! Property tests for the scheduling and counting invariants.
//!
//! For arbitrary valid specifications and case orders:
//! - lines written == Σ num_jobs × combos == summary.total_lines
//! - largest step written == max(num_jobs) - 1 == summary.max_steps - 1
//! - output is byte-identical across runs
//! - `$JOBID` fields always equal the step index
//! - records follow the (step, case, entry, combo) nested-loop order

use jobgen::{schedule, summarise, CaseOrder, Entry, JobPlan, Specification, Token};
use proptest::prelude::*;

// -- Strategy helpers --

fn arb_dimension() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        4 => prop::collection::vec("[a-z0-9._-]{1,6}", 1..4),
        1 => Just(vec!["$JOBID".to_string()]),
        1 => Just(vec!["$jobid".to_string()]),
    ]
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        "[a-z]{1,8}\\.(sh|py)",
        prop::collection::vec(arb_dimension(), 1..4),
        1u64..6,
    )
        .prop_map(|(runfile, args, num_jobs)| Entry::new(runfile, args, num_jobs))
}

fn arb_spec() -> impl Strategy<Value = Specification> {
    prop::collection::vec(prop::collection::vec(arb_entry(), 1..4), 1..5).prop_map(|cases| {
        Specification::from_cases(
            cases
                .into_iter()
                .enumerate()
                .map(|(i, entries)| (format!("case{i}"), entries)),
        )
        .expect("generated specifications are valid")
    })
}

fn arb_spec_and_order() -> impl Strategy<Value = (Specification, Vec<String>)> {
    arb_spec().prop_flat_map(|spec| {
        let names: Vec<String> = spec.case_names().map(str::to_string).collect();
        (Just(spec), Just(names).prop_shuffle())
    })
}

fn render(spec: &Specification, order: &CaseOrder) -> Vec<u8> {
    let mut buf = Vec::new();
    jobgen::write_records(schedule(spec, order), &mut buf).expect("write to Vec");
    buf
}

proptest! {
    #[test]
    fn line_count_matches_summary((spec, names) in arb_spec_and_order()) {
        let order = CaseOrder::resolve(&spec, &names).unwrap();
        let summary = summarise(&spec, &order);

        let expected: u64 = spec
            .cases()
            .iter()
            .flat_map(|c| &c.entries)
            .map(|e| e.num_jobs * e.combo_count())
            .sum();
        let written = render(&spec, &order);
        let lines = written.iter().filter(|&&b| b == b'\n').count() as u64;

        prop_assert_eq!(lines, expected);
        prop_assert_eq!(summary.total_lines, expected);
    }

    #[test]
    fn max_step_matches_summary((spec, names) in arb_spec_and_order()) {
        let order = CaseOrder::resolve(&spec, &names).unwrap();
        let summary = summarise(&spec, &order);
        let max_num_jobs = spec
            .cases()
            .iter()
            .flat_map(|c| &c.entries)
            .map(|e| e.num_jobs)
            .max()
            .unwrap();

        let max_step = schedule(&spec, &order).map(|r| r.step).max().unwrap();
        prop_assert_eq!(max_step, max_num_jobs - 1);
        prop_assert_eq!(summary.max_steps, max_num_jobs);
    }

    #[test]
    fn output_is_deterministic((spec, names) in arb_spec_and_order()) {
        let order = CaseOrder::resolve(&spec, &names).unwrap();
        let first = render(&spec, &order);
        let second = render(&spec, &order);
        prop_assert_eq!(&first, &second);

        let plan = JobPlan::from_spec(spec.clone(), order);
        let mut third = Vec::new();
        plan.write_into(&mut third).unwrap();
        prop_assert_eq!(first, third);
    }

    #[test]
    fn placeholder_equals_step((spec, names) in arb_spec_and_order()) {
        let order = CaseOrder::resolve(&spec, &names).unwrap();
        for record in schedule(&spec, &order) {
            let step = record.step.to_string();
            for (token, field) in record.combo.iter().zip(record.fields()) {
                if matches!(token, Token::JobId) {
                    prop_assert_eq!(&*field, step.as_str());
                }
            }
        }
    }

    #[test]
    fn matches_nested_loop_reference((spec, names) in arb_spec_and_order()) {
        let order = CaseOrder::resolve(&spec, &names).unwrap();
        let written = String::from_utf8(render(&spec, &order)).unwrap();
        let got: Vec<&str> = written.lines().collect();
        prop_assert_eq!(got, reference_lines(&spec, &names));
    }
}

/// Materialised (step, case, entry, combo) loops, built independently of
/// the odometer and the scheduler.
fn reference_lines(spec: &Specification, names: &[String]) -> Vec<String> {
    let max_steps = names
        .iter()
        .flat_map(|n| &spec.case(n).unwrap().entries)
        .map(|e| e.num_jobs)
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    for step in 0..max_steps {
        for name in names {
            for entry in &spec.case(name).unwrap().entries {
                if step >= entry.num_jobs {
                    continue;
                }
                let mut combos: Vec<Vec<String>> = vec![Vec::new()];
                for dim in &entry.args {
                    combos = combos
                        .iter()
                        .flat_map(|prefix| {
                            dim.iter().map(move |t| {
                                let mut c = prefix.clone();
                                c.push(match t {
                                    Token::JobId => step.to_string(),
                                    Token::Literal(s) => s.clone(),
                                });
                                c
                            })
                        })
                        .collect();
                }
                for combo in combos {
                    out.push(format!("{name} {step} {} {}", entry.runfile, combo.join(" ")));
                }
            }
        }
    }
    out
}
