use sobol_evo::parameter::{ParameterSpec, SearchSpace};
use sobol_evo::sampler::sobol::{SobolMatrix, map_unit};
use sobol_evo::{Error, ORIGINAL_NUM};

fn mixed_space() -> SearchSpace {
    SearchSpace::new(vec![
        ParameterSpec::float("x", -3.0, 7.0),
        ParameterSpec::int("depth", 2.0, 12.0),
        ParameterSpec::log("lr", 1e-6, 1e-2),
        ParameterSpec::float("momentum", 0.0, 1.0).initial(0.9),
        ParameterSpec::int("batch", 1.0, 512.0),
    ])
    .unwrap()
}

#[test]
fn test_original_params_are_repeatable() {
    let space = mixed_space();
    let matrix = SobolMatrix::initialize(space.len(), ORIGINAL_NUM).unwrap();
    let again = SobolMatrix::initialize(space.len(), ORIGINAL_NUM).unwrap();

    for trial_id in 1..=ORIGINAL_NUM as u64 {
        let first = matrix.original_params(trial_id, &space).unwrap();
        assert_eq!(first, matrix.original_params(trial_id, &space).unwrap());
        assert_eq!(first, again.original_params(trial_id, &space).unwrap());
    }
}

#[test]
fn test_original_params_follow_space_order_and_bounds() {
    let space = mixed_space();
    let matrix = SobolMatrix::initialize(space.len(), ORIGINAL_NUM).unwrap();

    for trial_id in 1..=ORIGINAL_NUM as u64 {
        let candidate = matrix.original_params(trial_id, &space).unwrap();
        let names: Vec<&str> = candidate.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["x", "depth", "lr", "momentum", "batch"]);

        for (entry, spec) in candidate.iter().zip(&space) {
            assert_eq!(entry.kind, spec.kind());
            assert!(
                entry.value >= spec.lower() && entry.value <= spec.upper(),
                "trial {trial_id}: {} = {} out of bounds",
                entry.name,
                entry.value
            );
        }
    }
}

#[test]
fn test_linear_int_values_are_whole() {
    let space = mixed_space();
    let matrix = SobolMatrix::initialize(space.len(), ORIGINAL_NUM).unwrap();
    for trial_id in 1..=ORIGINAL_NUM as u64 {
        let depth = matrix
            .original_params(trial_id, &space)
            .unwrap()
            .value_of("depth")
            .unwrap();
        assert!((depth - depth.trunc()).abs() < f64::EPSILON, "depth = {depth}");
    }
}

#[test]
fn test_log_scaled_values_spread_over_decades() {
    let space = SearchSpace::new(vec![ParameterSpec::log("lr", 1e-6, 1e-2)]).unwrap();
    let matrix = SobolMatrix::initialize(1, 16).unwrap();

    let below_1e4 = (1..=16)
        .map(|t| matrix.original_params(t, &space).unwrap().values()[0])
        .filter(|&v| v < 1e-4)
        .count();
    // Half of the log range lies below 1e-4; a linear mapping would put
    // almost nothing there.
    assert!(below_1e4 >= 5, "only {below_1e4} of 16 samples below 1e-4");
}

#[test]
fn test_map_unit_boundary_cases() {
    let log = ParameterSpec::float("c", 1.0, 100.0);
    assert!((map_unit(0.5, &log) - 10.0).abs() < 1e-9);

    let int = ParameterSpec::int("n", 0.0, 10.0);
    assert!((map_unit(0.25, &int) - 3.0).abs() < f64::EPSILON);
    assert!((map_unit(0.249, &int) - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_original_params_past_budget_is_an_error() {
    let space = mixed_space();
    let matrix = SobolMatrix::initialize(space.len(), ORIGINAL_NUM).unwrap();
    let err = matrix
        .original_params(ORIGINAL_NUM as u64 + 1, &space)
        .unwrap_err();
    assert!(matches!(err, Error::TrialOutOfRange { trial_id: 11, sample_count: 10 }));
}
