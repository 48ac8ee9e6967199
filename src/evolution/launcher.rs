use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
    stats::{BestIndividual, EvolutionResult, GenerationStats},
};
use crate::{
    breeding::GenerationalStrategy,
    codec::Codec,
    error::{GeneticError, Result},
    objective::{score_population, Evaluation},
    population::Population,
    rng::RandomNumberGenerator,
};

/// Where an [`Evolution`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current population is scored and may be bred again.
    Evaluated,
    /// Every configured generation has been bred and scored.
    Terminated,
}

/// The state of a run between two generations.
#[derive(Debug, Clone)]
pub struct Evolution {
    population: Population,
    evaluation: Evaluation,
    best: BestIndividual,
    statistics: Vec<GenerationStats>,
    generation: usize,
    phase: Phase,
}

impl Evolution {
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn best(&self) -> &BestIndividual {
        &self.best
    }

    pub fn statistics(&self) -> &[GenerationStats] {
        &self.statistics
    }

    /// Number of breeding steps taken so far; 0 for the random population.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn into_result(self) -> EvolutionResult {
        EvolutionResult {
            best: self.best,
            statistics: self.statistics,
        }
    }
}

/// Manages the evolution process for one validated configuration.
///
/// The launcher itself is immutable; all run state lives in the
/// [`Evolution`] value threaded through [`EvolutionLauncher::step`].
#[derive(Debug, Clone)]
pub struct EvolutionLauncher {
    options: EvolutionOptions,
    codec: Codec,
    strategy: GenerationalStrategy,
}

impl EvolutionLauncher {
    /// Creates a new `EvolutionLauncher` for `options`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the options are invalid, which is
    /// only possible for options that bypassed the builder.
    pub fn new(options: EvolutionOptions) -> Result<Self> {
        options.validate()?;
        let codec = options.codec()?;
        let strategy = options.strategy();

        info!(
            objective = %options.get_objective(),
            population_size = options.get_population_size(),
            generations = options.get_num_generations(),
            chromosome_length = codec.chromosome_length(),
            selection = %strategy.selection(),
            crossover = %strategy.crossover(),
            mutation = %strategy.mutation(),
            elite = strategy.elitism().size(),
            "Configuration resolved"
        );

        Ok(Self {
            options,
            codec,
            strategy,
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn strategy(&self) -> &GenerationalStrategy {
        &self.strategy
    }

    /// Draws and scores the random initial population (generation 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the population cannot be scored.
    pub fn initialize(&self, rng: &mut RandomNumberGenerator) -> Result<Evolution> {
        let population = Population::random(
            self.options.get_population_size(),
            self.codec.chromosome_length(),
            rng,
        );
        let evaluation = self.evaluate(&population)?;
        let best = BestIndividual::from_evaluation(&evaluation, &self.options.get_objective(), 0)?;

        let mut evolution = Evolution {
            population,
            evaluation,
            best,
            statistics: Vec::with_capacity(self.options.get_num_generations() + 1),
            generation: 0,
            phase: Phase::Evaluated,
        };
        self.record(&mut evolution)?;
        Ok(evolution)
    }

    /// Breeds and scores one generation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Evolution` if `evolution` is already terminated,
    /// or any error raised while breeding or scoring.
    pub fn step(&self, mut evolution: Evolution, rng: &mut RandomNumberGenerator) -> Result<Evolution> {
        if evolution.is_terminated() {
            return Err(GeneticError::Evolution(format!(
                "Evolution already terminated after {} generations",
                evolution.generation
            )));
        }

        let next = self
            .strategy
            .breed(&evolution.population, evolution.evaluation.fitness(), rng)?;
        let evaluation = self.evaluate(&next)?;
        let generation = evolution.generation + 1;
        let candidate =
            BestIndividual::from_evaluation(&evaluation, &self.options.get_objective(), generation)?;

        evolution.population = next;
        evolution.evaluation = evaluation;
        evolution.best = evolution.best.improve(candidate);
        evolution.generation = generation;
        self.record(&mut evolution)?;
        Ok(evolution)
    }

    /// Runs every configured generation with a generator seeded from the
    /// options, or from entropy when they carry no seed.
    ///
    /// # Errors
    ///
    /// Returns any error raised while scoring or breeding.
    pub fn run(&self) -> Result<EvolutionResult> {
        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs every configured generation with the given generator.
    ///
    /// # Errors
    ///
    /// Returns any error raised while scoring or breeding.
    #[tracing::instrument(level = "debug", skip_all, fields(objective = %self.options.get_objective()))]
    pub fn run_with_rng(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        let mut evolution = self.initialize(rng)?;
        while !evolution.is_terminated() {
            evolution = self.step(evolution, rng)?;
        }

        if self.options.get_log_level() != &LogLevel::None {
            info!(
                fitness = evolution.best.fitness(),
                value = evolution.best.value(),
                solved = evolution.best.solved(),
                "Evolution finished"
            );
        }
        Ok(evolution.into_result())
    }

    fn evaluate(&self, population: &Population) -> Result<Evaluation> {
        score_population(&self.codec, &self.options.get_objective(), population)
    }

    /// Appends the statistics of the current generation, checks the best
    /// individual against the optimum and advances the phase.
    ///
    /// Only bred generations can solve the problem; the random population of
    /// generation 0 is never checked.
    fn record(&self, evolution: &mut Evolution) -> Result<()> {
        let generation = evolution.generation;
        let stats = GenerationStats::from_fitness(generation, evolution.evaluation.fitness())?;
        evolution.statistics.push(stats);

        let objective = self.options.get_objective();
        let precision = self.options.get_search_domain().precision();
        let newly_solved = generation > 0
            && !evolution.best.solved()
            && objective.is_solved(evolution.best.solution(), precision);
        if newly_solved {
            evolution.best.mark_solved(generation);
        }

        match self.options.get_log_level() {
            LogLevel::Minimal => {
                info!(
                    generation,
                    max_fitness = stats.max_fitness,
                    mean_fitness = stats.mean_fitness,
                    "Generation evaluated"
                );
            }
            LogLevel::Verbose => {
                info!(
                    generation,
                    max_fitness = stats.max_fitness,
                    min_fitness = stats.min_fitness,
                    mean_fitness = stats.mean_fitness,
                    "Generation evaluated"
                );
                debug!(
                    generation,
                    solution = ?evolution.best.solution(),
                    value = evolution.best.value(),
                    "Best individual"
                );
            }
            LogLevel::None => {}
        }
        if newly_solved && self.options.get_log_level() != &LogLevel::None {
            info!(generation, "Optimum reached within precision");
        }

        if generation >= self.options.get_num_generations() {
            evolution.phase = Phase::Terminated;
        }
        Ok(())
    }
}
