use bitga::{
    breeding::{Crossover, Mutation},
    error::GeneticError,
    evolution::{Challenge, EvolutionLauncher, EvolutionOptions, LogLevel},
    objective::Objective,
    rng::RandomNumberGenerator,
    selection::{Elitism, Selection},
};

fn options(objective: Objective) -> EvolutionOptions {
    EvolutionOptions::builder()
        .objective(objective)
        .population_size(50)
        .num_generations(100)
        .selection(Selection::tournament(3).unwrap())
        .crossover(Crossover::OnePoint)
        .mutation(Mutation::Medium)
        .elitism(Elitism::enabled(2).unwrap())
        .seed(2024)
        .build()
        .unwrap()
}

#[test]
fn test_absolute_value_is_solved() {
    let result = EvolutionLauncher::new(options(Objective::Absolute))
        .unwrap()
        .run()
        .unwrap();

    assert!(result.solved(), "{}", result.best);
    assert!(result.best.solution()[0].abs() <= 0.01);
    assert_eq!(result.generations(), 100);
    assert_eq!(result.statistics.len(), 101);
}

#[test]
fn test_every_objective_runs_to_completion() {
    for objective in [
        Objective::Absolute,
        Objective::DampedCosine,
        Objective::Rastrigin,
        Objective::Rosenbrock,
    ] {
        let launcher = EvolutionLauncher::new(options(objective)).unwrap();
        let result = launcher.run().unwrap();

        assert_eq!(result.best.solution().len(), objective.dimensions());
        assert!(result.best.fitness() > 0.0 && result.best.fitness() <= 1.0);
        assert!(result.best.value() >= objective.minimum() - 1e-9);
        for stats in &result.statistics {
            assert!(stats.min_fitness <= stats.mean_fitness + 1e-12);
            assert!(stats.mean_fitness <= stats.max_fitness + 1e-12);
        }
    }
}

#[test]
fn test_same_seed_gives_identical_runs() {
    let launcher = EvolutionLauncher::new(options(Objective::Rastrigin)).unwrap();

    let mut rng_a = RandomNumberGenerator::from_seed(77);
    let mut rng_b = RandomNumberGenerator::from_seed(77);
    let mut a = launcher.initialize(&mut rng_a).unwrap();
    let mut b = launcher.initialize(&mut rng_b).unwrap();
    for _ in 0..10 {
        a = launcher.step(a, &mut rng_a).unwrap();
        b = launcher.step(b, &mut rng_b).unwrap();
        assert_eq!(a.population(), b.population());
    }
    assert_eq!(a.into_result(), b.into_result());
}

#[test]
fn test_odd_population_keeps_its_size() {
    for (size, elite) in [(7usize, 2usize), (9, 1), (5, 4)] {
        let options = EvolutionOptions::builder()
            .objective(Objective::Rosenbrock)
            .population_size(size)
            .num_generations(5)
            .selection(Selection::proportional())
            .crossover(Crossover::Uniform)
            .elitism(Elitism::enabled(elite).unwrap())
            .build()
            .unwrap();
        let launcher = EvolutionLauncher::new(options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(size as u64);

        let mut evolution = launcher.initialize(&mut rng).unwrap();
        while !evolution.is_terminated() {
            evolution = launcher.step(evolution, &mut rng).unwrap();
            assert_eq!(evolution.population().len(), size);
        }
    }
}

#[test]
fn test_invalid_configuration_fails_before_any_population() {
    let too_large_tournament = EvolutionOptions::builder()
        .population_size(3)
        .selection(Selection::tournament(4).unwrap())
        .build();
    assert!(matches!(too_large_tournament, Err(GeneticError::Configuration(_))));

    let short_chromosome = EvolutionOptions::builder()
        .search_domain(0.0, 1.0, 0.5)
        .crossover(Crossover::TwoPoint)
        .build();
    assert!(matches!(short_chromosome, Err(GeneticError::Configuration(_))));
}

#[test]
fn test_verbose_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let mut options = options(Objective::DampedCosine);
    options.set_log_level(LogLevel::Verbose);
    let result = EvolutionLauncher::new(options).unwrap().run().unwrap();

    assert_eq!(result.statistics.len(), 101);
}
