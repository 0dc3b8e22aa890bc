use fxhash::FxHashMap;
use rayon::prelude::*;

use crate::{
    problem::job::JobIdx,
    solver::{
        cost_evaluator::CostEvaluator,
        insertion::{Insertion, for_each_route_insertion},
        score::Score,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

use super::{recreate_context::RecreateContext, recreate_solution::RecreateSolution};

/// Global cheapest insertion: every round evaluates each unassigned job at
/// every position and inserts the single cheapest candidate. Ties go to the
/// lowest job index.
#[derive(Default)]
pub struct CheapestInsertion;

type Candidate = (Insertion, Score);

fn best_insertion_in_routes(
    evaluator: &CostEvaluator,
    solution: &WorkingSolution,
    job_id: JobIdx,
    route_ids: impl Iterator<Item = RouteIdx>,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for route_id in route_ids {
        for_each_route_insertion(solution, route_id, job_id, |insertion| {
            let score = evaluator.insertion_score(solution, &insertion);
            if score.is_failure() {
                return;
            }

            if best
                .as_ref()
                .is_none_or(|(_, best_score)| score < *best_score)
            {
                best = Some((insertion, score));
            }
        });
    }

    best
}

fn keep_best(current: Option<Candidate>, challenger: Option<Candidate>) -> Option<Candidate> {
    match (current, challenger) {
        (Some(current), Some(challenger)) => {
            if challenger.1 < current.1 {
                Some(challenger)
            } else {
                Some(current)
            }
        }
        (current, challenger) => current.or(challenger),
    }
}

impl CheapestInsertion {
    pub fn insert_jobs(
        solution: &mut WorkingSolution,
        evaluator: &CostEvaluator,
        thread_pool: &rayon::ThreadPool,
    ) {
        // Best known candidate per job; `None` means no feasible position
        let mut candidates: FxHashMap<JobIdx, Option<Candidate>> = FxHashMap::default();
        let mut changed_routes: Option<Vec<RouteIdx>> = None;

        loop {
            let unassigned_jobs = solution.sorted_unassigned_jobs();
            if unassigned_jobs.is_empty() {
                break;
            }

            let snapshot = &*solution;
            let cached = &candidates;
            let changed = changed_routes.as_deref();

            let results = thread_pool.install(|| {
                unassigned_jobs
                    .par_iter()
                    .map(|&job_id| {
                        let candidate = match (changed, cached.get(&job_id)) {
                            // Only the modified routes can offer something new,
                            // unless the cached best was in one of them.
                            (Some(changed), Some(previous))
                                if previous.as_ref().is_none_or(|(insertion, _)| {
                                    !changed.contains(&insertion.route_id())
                                }) =>
                            {
                                keep_best(
                                    previous.clone(),
                                    best_insertion_in_routes(
                                        evaluator,
                                        snapshot,
                                        job_id,
                                        changed.iter().copied(),
                                    ),
                                )
                            }
                            _ => best_insertion_in_routes(
                                evaluator,
                                snapshot,
                                job_id,
                                snapshot.route_ids(),
                            ),
                        };

                        (job_id, candidate)
                    })
                    .collect::<Vec<_>>()
            });

            let mut best: Option<(JobIdx, Candidate)> = None;
            for (job_id, candidate) in &results {
                if let Some((insertion, score)) = candidate
                    && best
                        .as_ref()
                        .is_none_or(|(_, (_, best_score))| score < best_score)
                {
                    best = Some((*job_id, (insertion.clone(), *score)));
                }
            }

            candidates = results.into_iter().collect();

            let Some((job_id, (insertion, _))) = best else {
                break;
            };

            let routes_before = solution.routes().len();
            let route_id = insertion.route_id();
            solution.insert(&insertion);
            candidates.remove(&job_id);

            let mut changed = vec![route_id];
            changed.extend((routes_before..solution.routes().len()).map(RouteIdx::new));
            changed_routes = Some(changed);
        }
    }
}

impl RecreateSolution for CheapestInsertion {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        CheapestInsertion::insert_jobs(solution, context.evaluator, context.thread_pool);
    }
}
