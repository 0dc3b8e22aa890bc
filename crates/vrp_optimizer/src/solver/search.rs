use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use jiff::Timestamp;
use parking_lot::{Mutex, RwLock};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, error, info, trace, warn};

use crate::{
    acceptor::{
        accept_solution::{AcceptSolution, AcceptSolutionContext},
        solution_acceptor::SolutionAcceptor,
    },
    error::SolverError,
    problem::{fleet::FleetSize, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        accepted_solution::AcceptedSolution,
        construction::construct_solution::{complete_solution, construct_solution},
        cost_evaluator::CostEvaluator,
        noise::NoiseGenerator,
        recreate::{
            recreate_context::RecreateContext, recreate_solution::RecreateSolution,
            recreate_strategy::RecreateStrategy,
        },
        ruin::{ruin_context::RuinContext, ruin_solution::RuinSolution, ruin_strategy::RuinStrategy},
        solution::working_solution::{InitialRoute, WorkingSolution},
        solution_pool::SolutionPool,
        solver_params::SolverParams,
        strategy_weights::StrategyWeights,
    },
    timer_debug,
};

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&AcceptedSolution) + Send + Sync + 'static>>;

/// Steps of one ruin-and-recreate iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Ruining,
    Recreating,
    Evaluating,
    Accepted,
    Rejected,
}

struct WorkerState {
    thread: usize,
    iteration: usize,
    max_iterations: usize,
    accepted: usize,
    rejected: usize,
    start: Timestamp,
    current: AcceptedSolution,
    rng: SmallRng,
    insertion_thread_pool: rayon::ThreadPool,
}

impl WorkerState {
    fn new(
        thread: usize,
        max_iterations: usize,
        start: Timestamp,
        current: AcceptedSolution,
        rng: SmallRng,
        insertion_thread_pool: rayon::ThreadPool,
    ) -> Self {
        WorkerState {
            thread,
            iteration: 0,
            max_iterations,
            accepted: 0,
            rejected: 0,
            start,
            current,
            rng,
            insertion_thread_pool,
        }
    }

    fn transition(&self, state: SearchState) {
        trace!(
            thread = self.thread,
            iteration = self.iteration,
            state = ?state
        );
    }
}

/// Splits the iteration budget over the search threads, the first threads
/// taking the remainder.
fn iteration_budgets(max_iterations: usize, num_threads: usize) -> Vec<usize> {
    let num_threads = num_threads.max(1);
    let share = max_iterations / num_threads;
    let remainder = max_iterations % num_threads;

    (0..num_threads)
        .map(|thread| share + usize::from(thread < remainder))
        .collect()
}

/// Ruin-and-recreate search over one or more independent trajectories that
/// share a solution pool.
pub struct Search {
    problem: Arc<VehicleRoutingProblem>,
    params: SolverParams,
    fleet_size: FleetSize,
    evaluator: CostEvaluator,
    acceptor: SolutionAcceptor,
    noise_generator: NoiseGenerator,
    ruin_weights: StrategyWeights<RuinStrategy>,
    recreate_weights: StrategyWeights<RecreateStrategy>,
    initial_routes: Vec<InitialRoute>,
    pool: Arc<RwLock<SolutionPool>>,
    on_best_solution_handler: Option<BestSolutionHandler>,
    is_stopped: Arc<AtomicBool>,
}

impl Search {
    pub fn new(params: SolverParams, problem: Arc<VehicleRoutingProblem>) -> Self {
        let fleet_size = params.fleet_size.unwrap_or(problem.fleet_size());

        Search {
            fleet_size,
            evaluator: CostEvaluator::new(params.unassigned_job_penalty),
            acceptor: SolutionAcceptor::new(
                params.acceptor,
                params.acceptance_temperature,
                params.schrimpf_alpha,
            ),
            noise_generator: NoiseGenerator::new(
                &problem,
                params.noise_probability,
                params.noise_level,
            ),
            ruin_weights: StrategyWeights::new(params.ruin_strategy_weights.clone()),
            recreate_weights: StrategyWeights::new(params.recreate_strategy_weights.clone()),
            initial_routes: Vec::new(),
            pool: Arc::new(RwLock::new(SolutionPool::new(params.pool_capacity))),
            on_best_solution_handler: None,
            is_stopped: Arc::new(AtomicBool::new(false)),
            problem,
            params,
        }
    }

    /// Validates the routes against the problem and uses them as the starting
    /// point of construction.
    pub fn set_initial_routes(&mut self, routes: Vec<InitialRoute>) -> Result<(), SolverError> {
        WorkingSolution::from_routes(Arc::clone(&self.problem), self.fleet_size, &routes)?;
        self.initial_routes = routes;
        Ok(())
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.is_stopped.load(Ordering::Relaxed)
    }

    pub fn evaluator(&self) -> &CostEvaluator {
        &self.evaluator
    }

    pub fn pool(&self) -> &Arc<RwLock<SolutionPool>> {
        &self.pool
    }

    fn create_insertion_thread_pool(&self) -> Result<rayon::ThreadPool, SolverError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.insertion_threads.number_of_threads())
            .build()?;

        Ok(pool)
    }

    fn run_construction(&self, thread_pool: &rayon::ThreadPool) -> Result<(), SolverError> {
        // Solutions already exist, the search resumes from them
        if !self.pool.read().is_empty() {
            return Ok(());
        }

        let solution = timer_debug!("Construction", {
            if self.initial_routes.is_empty() {
                construct_solution(&self.problem, &self.evaluator, self.fleet_size, thread_pool)
            } else {
                let mut solution = WorkingSolution::from_routes(
                    Arc::clone(&self.problem),
                    self.fleet_size,
                    &self.initial_routes,
                )?;
                complete_solution(&mut solution, &self.evaluator, thread_pool);
                solution
            }
        });

        let score = self.evaluator.solution_score(&solution);
        info!(
            score = %score,
            routes = solution.non_empty_routes_count(),
            unassigned = solution.unassigned_jobs().len(),
            "Initial solution"
        );

        self.publish(AcceptedSolution::new(solution, score), 0);

        Ok(())
    }

    pub fn run(&self) -> Result<(), SolverError> {
        let start = Timestamp::now();
        let mut rng = SmallRng::seed_from_u64(self.params.seed);

        self.run_construction(&self.create_insertion_thread_pool()?)?;

        let Ok(initial) = self.pool.read().best_of().cloned() else {
            return Ok(());
        };

        let num_threads = self.params.search_threads.number_of_threads();
        let workers = iteration_budgets(self.params.max_iterations, num_threads)
            .into_iter()
            .enumerate()
            .map(|(thread, max_iterations)| {
                Ok(WorkerState::new(
                    thread,
                    max_iterations,
                    start,
                    initial.clone(),
                    SmallRng::from_rng(&mut rng),
                    self.create_insertion_thread_pool()?,
                ))
            })
            .collect::<Result<Vec<_>, SolverError>>()?;

        debug!("Running search on {} threads", num_threads);

        thread::scope(|s| {
            for mut state in workers {
                let builder = thread::Builder::new().name(state.thread.to_string());
                let thread_index = state.thread;

                if let Err(err) = builder.spawn_scoped(s, move || self.run_worker(&mut state)) {
                    error!(thread = thread_index, "Failed to spawn search thread: {err}");
                }
            }
        });

        let pool = self.pool.read();
        if let Ok(best) = pool.best_of() {
            info!(
                score = %best.score,
                routes = best.solution.non_empty_routes_count(),
                elapsed = ?Timestamp::now().duration_since(start),
                "Search finished"
            );

            debug!(analysis = ?self.evaluator.score_analysis(&best.solution).scores);

            if best.solution.has_unassigned() {
                warn!(
                    "{} jobs could not be assigned",
                    best.solution.unassigned_jobs().len()
                );
            }
        }

        Ok(())
    }

    fn run_worker(&self, state: &mut WorkerState) {
        loop {
            if self.should_terminate(state) {
                break;
            }

            state.iteration += 1;
            self.run_iteration(state);

            if self.params.sync_interval > 0
                && state.iteration.is_multiple_of(self.params.sync_interval)
            {
                self.sync_with_pool(state);
            }
        }

        debug!(
            thread = state.thread,
            iterations = state.iteration,
            accepted = state.accepted,
            rejected = state.rejected,
            "Search thread done"
        );
    }

    fn should_terminate(&self, state: &WorkerState) -> bool {
        if self.is_stopped() || state.iteration >= state.max_iterations {
            return true;
        }

        self.params
            .max_duration
            .is_some_and(|max_duration| Timestamp::now().duration_since(state.start) > max_duration)
    }

    /// Share of the budget consumed, the larger of iterations and elapsed time.
    fn progress(&self, state: &WorkerState) -> f64 {
        let iterations = if state.max_iterations == 0 {
            1.0
        } else {
            state.iteration as f64 / state.max_iterations as f64
        };

        let elapsed = self.params.max_duration.map_or(0.0, |max_duration| {
            let elapsed = Timestamp::now().duration_since(state.start);
            elapsed.as_secs_f64() / max_duration.as_secs_f64().max(f64::EPSILON)
        });

        iterations.max(elapsed).clamp(0.0, 1.0)
    }

    fn run_iteration(&self, state: &mut WorkerState) {
        let mut working_solution = state.current.solution.clone();

        state.transition(SearchState::Ruining);
        let num_jobs_to_remove = self
            .params
            .ruin
            .num_jobs_to_remove(working_solution.assigned_jobs_count(), &mut state.rng);
        if let Some(ruin_strategy) = self.ruin_weights.select_strategy(&mut state.rng) {
            trace!(thread = state.thread, %ruin_strategy, num_jobs_to_remove);
            ruin_strategy.ruin_solution(
                &mut working_solution,
                RuinContext {
                    params: &self.params.ruin,
                    problem: &self.problem,
                    rng: &mut state.rng,
                    num_jobs_to_remove,
                },
            );
        }

        state.transition(SearchState::Recreating);
        let recreate_strategy = self
            .recreate_weights
            .select_strategy(&mut state.rng)
            .unwrap_or(RecreateStrategy::CheapestInsertion);
        trace!(thread = state.thread, %recreate_strategy);
        recreate_strategy.recreate_solution(
            &mut working_solution,
            RecreateContext {
                rng: &mut state.rng,
                evaluator: &self.evaluator,
                problem: &self.problem,
                noise_generator: Some(&self.noise_generator)
                    .filter(|noise_generator| noise_generator.is_enabled()),
                thread_pool: &state.insertion_thread_pool,
            },
        );

        state.transition(SearchState::Evaluating);
        let score = self.evaluator.solution_score(&working_solution);

        let progress = self.progress(state);
        let accepted = self.acceptor.accept(
            &state.current.score,
            &score,
            AcceptSolutionContext {
                iteration: state.iteration,
                progress,
                rng: &mut state.rng,
            },
        );

        if accepted {
            state.transition(SearchState::Accepted);
            state.accepted += 1;
            state.current = AcceptedSolution::new(working_solution, score);
            self.publish(state.current.clone(), state.iteration);
        } else {
            state.transition(SearchState::Rejected);
            state.rejected += 1;
        }

        state.transition(SearchState::Idle);
    }

    fn publish(&self, accepted: AcceptedSolution, iteration: usize) {
        let position = self.pool.write().retain(&accepted);

        if position == Some(0) {
            debug!(
                iteration,
                score = %accepted.score,
                routes = accepted.solution.non_empty_routes_count(),
                unassigned = accepted.solution.unassigned_jobs().len(),
                "New best solution"
            );

            if let Some(callback) = &self.on_best_solution_handler {
                callback.lock()(&accepted);
            }
        }
    }

    fn sync_with_pool(&self, state: &mut WorkerState) {
        let pool = self.pool.read();
        if let Ok(best) = pool.best_of()
            && best.is_better_than(&state.current)
        {
            state.current = best.clone();
        }
    }
}
