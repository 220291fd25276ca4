use std::sync::Arc;

use sobol_evo::parameter::{ParameterSpec, SearchSpace};
use sobol_evo::storage::{MemoryStorage, ObjectiveHistory};
use sobol_evo::{Error, ORIGINAL_NUM, Optimizer, Phase};

fn single_float() -> SearchSpace {
    SearchSpace::new(vec![ParameterSpec::float("x", 0.0, 10.0)]).unwrap()
}

#[test]
fn test_eleventh_call_breeds_from_parents() {
    let mut optimizer = Optimizer::builder()
        .space(single_float())
        .seed(42)
        .build()
        .unwrap();

    for expected_id in 1..=ORIGINAL_NUM as u64 {
        let proposal = optimizer.generate_parameter().unwrap();
        assert_eq!(proposal.trial_id, expected_id);
        assert_eq!(optimizer.phase_for(proposal.trial_id), Phase::Initial);
        // Every initial sample scores above a fixed threshold.
        let x = proposal.params.value_of("x").unwrap();
        optimizer.storage().record(proposal.trial_id, 100.0 + x);
    }

    let proposal = optimizer.generate_parameter().unwrap();
    assert_eq!(proposal.trial_id, 11);
    assert_eq!(optimizer.phase_for(11), Phase::Evolutionary);
    let x = proposal.params.value_of("x").unwrap();
    assert!((0.0..=10.0).contains(&x), "x = {x}");
}

#[test]
fn test_cache_returns_issued_candidates() {
    let mut optimizer = Optimizer::builder()
        .space(single_float())
        .seed(3)
        .build()
        .unwrap();

    let mut issued = Vec::new();
    for _ in 0..25 {
        let proposal = optimizer.generate_parameter().unwrap();
        let x = proposal.params.value_of("x").unwrap();
        optimizer.storage().record(proposal.trial_id, (x - 5.0).abs());
        issued.push(proposal);
    }

    assert_eq!(optimizer.n_proposals(), 25);
    for proposal in &issued {
        assert_eq!(optimizer.candidate(proposal.trial_id), Some(&proposal.params));
    }
    assert!(optimizer.candidate(0).is_none());
    assert!(optimizer.candidate(26).is_none());
}

#[test]
fn test_evolution_waits_for_enough_objectives() {
    let mut optimizer = Optimizer::new(single_float()).unwrap();

    for _ in 0..ORIGINAL_NUM {
        let proposal = optimizer.generate_parameter().unwrap();
        optimizer.storage().register(proposal.trial_id);
    }
    for id in 1..=4 {
        optimizer.storage().record(id, id as f64);
    }

    let err = optimizer.generate_parameter().unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientHistory {
            required: 5,
            available: 4
        }
    ));
    // The failed call did not consume a trial id.
    assert_eq!(optimizer.n_proposals(), ORIGINAL_NUM);

    optimizer.storage().record(7, 0.5);
    let proposal = optimizer.generate_parameter().unwrap();
    assert_eq!(proposal.trial_id, 11);
}

#[test]
fn test_values_stay_in_bounds_over_a_long_run() {
    let space = SearchSpace::new(vec![
        ParameterSpec::float("x", -2.0, 2.0),
        ParameterSpec::int("n", 1.0, 9.0),
        ParameterSpec::float("lr", 1e-5, 1e-1),
        ParameterSpec::float("p", 0.0, 1.0).initial(1e-2),
    ])
    .unwrap();
    let mut optimizer = Optimizer::builder().space(space.clone()).seed(8).build().unwrap();

    for _ in 0..150 {
        let proposal = optimizer.generate_parameter().unwrap();
        assert_eq!(proposal.params.len(), space.len());
        for (entry, spec) in proposal.params.iter().zip(&space) {
            assert_eq!(entry.name, spec.name());
            assert!(
                (spec.lower()..=spec.upper()).contains(&entry.value),
                "trial {}: {} = {}",
                proposal.trial_id,
                entry.name,
                entry.value
            );
        }
        let n = proposal.params.value_of("n").unwrap();
        assert!((n - n.round()).abs() < f64::EPSILON, "n = {n}");

        let x = proposal.params.value_of("x").unwrap();
        optimizer.storage().record(proposal.trial_id, x * x + n);
    }
}

#[test]
fn test_finds_minimum_of_shifted_parabola() {
    let mut optimizer = Optimizer::builder()
        .space(single_float())
        .seed(1234)
        .build()
        .unwrap();

    for _ in 0..100 {
        let proposal = optimizer.generate_parameter().unwrap();
        let x = proposal.params.value_of("x").unwrap();
        optimizer.storage().record(proposal.trial_id, (x - 3.0).powi(2));
    }

    let best = optimizer.best().unwrap();
    assert!(best.objective < 1.0, "best objective {}", best.objective);
    let x = best.params.value_of("x").unwrap();
    assert!((x - 3.0).abs() < 1.0, "best x = {x}");
}

#[test]
fn test_same_seed_reproduces_run() {
    let run = |seed: u64| {
        let mut optimizer = Optimizer::builder()
            .space(single_float())
            .seed(seed)
            .build()
            .unwrap();
        (0..40)
            .map(|_| {
                let proposal = optimizer.generate_parameter().unwrap();
                let x = proposal.params.value_of("x").unwrap();
                optimizer.storage().record(proposal.trial_id, (x - 7.0).abs());
                x
            })
            .collect::<Vec<f64>>()
    };

    let a = run(77);
    assert_eq!(a, run(77));
    // The Sobol design does not depend on the RNG seed.
    let b = run(78);
    assert_eq!(a[..ORIGINAL_NUM], b[..ORIGINAL_NUM]);
}

#[test]
fn test_shared_storage_handle() {
    let storage = Arc::new(MemoryStorage::new());
    let mut optimizer = Optimizer::builder()
        .space(single_float())
        .storage(Arc::clone(&storage))
        .seed(5)
        .build()
        .unwrap();

    for _ in 0..12 {
        let proposal = optimizer.generate_parameter().unwrap();
        storage.record(proposal.trial_id, proposal.params.values()[0]);
    }

    assert_eq!(storage.n_resolved(), 12);
    assert_eq!(optimizer.storage().trial_ids().map(|ids| ids.len()), Some(12));
    let best = optimizer.best().unwrap();
    let lowest = (1..=12)
        .filter_map(|id| storage.objective(id))
        .fold(f64::INFINITY, f64::min);
    assert!((best.objective - lowest).abs() < f64::EPSILON);
}

#[test]
fn test_dyn_history_backend() {
    struct Fixed;

    impl ObjectiveHistory for Fixed {
        fn trial_ids(&self) -> Option<Vec<u64>> {
            Some((1..=10).collect())
        }

        fn objective(&self, trial_id: u64) -> Option<f64> {
            (trial_id <= 10).then(|| trial_id as f64)
        }
    }

    let storage: Arc<dyn ObjectiveHistory> = Arc::new(Fixed);
    let mut optimizer = Optimizer::builder()
        .space(single_float())
        .storage(storage)
        .seed(2)
        .build()
        .unwrap();

    for _ in 0..15 {
        optimizer.generate_parameter().unwrap();
    }
    assert_eq!(optimizer.best().map(|b| b.trial_id), Some(1));
}
