use sobol_evo::parameter::{ParameterSpec, SearchSpace};
use sobol_evo::{Error, EvolutionConfig, Optimizer, Phase};

#[test]
fn test_builder_defaults() {
    let optimizer = Optimizer::builder()
        .param(ParameterSpec::float("x", 0.0, 1.0))
        .build()
        .unwrap();

    assert_eq!(optimizer.config(), &EvolutionConfig::default());
    assert_eq!(optimizer.space().len(), 1);
    assert_eq!(optimizer.n_proposals(), 0);
    assert!(optimizer.best().is_none());
}

#[test]
fn test_builder_requires_parameters() {
    let err = Optimizer::builder().build().err().unwrap();
    assert!(matches!(err, Error::EmptySearchSpace));
}

#[test]
fn test_builder_rejects_malformed_parameters() {
    let err = Optimizer::builder()
        .param(ParameterSpec::float("x", 1.0, 0.0))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidBounds { .. }));

    let err = Optimizer::builder()
        .param(ParameterSpec::int("n", 0.2, 0.8))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::EmptyIntRange { .. }));
}

#[test]
fn test_builder_rejects_inconsistent_config() {
    let err = Optimizer::builder()
        .param(ParameterSpec::float("x", 0.0, 1.0))
        .original_num(4)
        .num_parent(5)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let err = Optimizer::builder()
        .param(ParameterSpec::float("x", 0.0, 1.0))
        .schedule_div(-1.0)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_builder_rejects_design_longer_than_sobol_sequence() {
    let err = Optimizer::builder()
        .param(ParameterSpec::float("x", 0.0, 1.0))
        .original_num(70_000)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_custom_budget_moves_phase_boundary() {
    let space = SearchSpace::new(vec![ParameterSpec::float("x", 0.0, 1.0)]).unwrap();
    let mut optimizer = Optimizer::builder()
        .space(space)
        .original_num(6)
        .num_parent(3)
        .explorer_num(20)
        .seed(11)
        .build()
        .unwrap();

    assert_eq!(optimizer.phase_for(6), Phase::Initial);
    assert_eq!(optimizer.phase_for(7), Phase::Evolutionary);

    for _ in 0..30 {
        let proposal = optimizer.generate_parameter().unwrap();
        let x = proposal.params.values()[0];
        assert!((0.0..=1.0).contains(&x));
        optimizer.storage().record(proposal.trial_id, x);
    }
}

#[test]
fn test_sobol_seed_changes_initial_design() {
    let build = |sobol_seed: u32| {
        let mut optimizer = Optimizer::builder()
            .param(ParameterSpec::float("x", 0.0, 100.0))
            .sobol_seed(sobol_seed)
            .build()
            .unwrap();
        (0..10)
            .map(|_| optimizer.generate_parameter().unwrap().params.values()[0])
            .collect::<Vec<f64>>()
    };

    assert_eq!(build(0), build(0));
    assert_ne!(build(0), build(9));
}
