//! Slack Induction by String Removals for Vehicle Routing Problems
//! Jan Christiaens, Greet Vanden Berghe

use std::iter;

use fxhash::FxHashSet;
use rand::seq::IndexedRandom;

use crate::solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

/// Removes strings of consecutive activities from the routes closest to a
/// random seed job, at most one string per route.
pub struct RuinString;

/// Probability to stop growing the preserved part of a split string.
const PRESERVED_STRING_BETA: f64 = 0.01;

impl RuinString {
    /// Start positions of the strings of `string_length` activities that
    /// contain `index`.
    fn compute_possible_string_start(
        string_length: usize,
        index: usize,
        route_length: usize,
    ) -> Vec<usize> {
        (0..string_length)
            .filter_map(|offset| index.checked_sub(offset))
            .filter(|&start| start + string_length <= route_length)
            .rev()
            .collect()
    }

    fn compute_preserved_length<R>(string_length: usize, route_length: usize, rng: &mut R) -> usize
    where
        R: rand::Rng,
    {
        if string_length >= route_length {
            return 0;
        }

        let mut preserved_length = 1;
        while string_length + preserved_length < route_length {
            if rng.random_bool(PRESERVED_STRING_BETA) {
                return preserved_length;
            }

            preserved_length += 1;
        }

        preserved_length
    }

    /// Positions removed by a string starting at `start` where the
    /// `preserved_length` activities after the first `start_of_preserved`
    /// ones are kept.
    fn split_string_positions(
        start: usize,
        string_length: usize,
        start_of_preserved: usize,
        preserved_length: usize,
    ) -> Vec<usize> {
        (0..string_length + preserved_length)
            .filter(|&offset| {
                offset < start_of_preserved || offset >= start_of_preserved + preserved_length
            })
            .map(|offset| start + offset)
            .collect()
    }

    fn string_positions<R>(
        string_length: usize,
        index: usize,
        route_length: usize,
        rng: &mut R,
    ) -> Vec<usize>
    where
        R: rand::Rng,
    {
        let preserved_length = if rng.random_bool(0.5) {
            Self::compute_preserved_length(string_length, route_length, rng)
        } else {
            0
        };

        let total_length = string_length + preserved_length;
        let Some(&start) =
            Self::compute_possible_string_start(total_length, index, route_length).choose(rng)
        else {
            return Vec::new();
        };

        if preserved_length == 0 {
            return (start..start + string_length).collect();
        }

        let start_of_preserved = rng.random_range(1..string_length.max(2));
        Self::split_string_positions(start, string_length, start_of_preserved, preserved_length)
    }
}

impl RuinSolution for RuinString {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>)
    where
        R: rand::Rng,
    {
        let RuinContext {
            params,
            problem,
            rng,
            num_jobs_to_remove,
        } = context;

        if num_jobs_to_remove == 0 {
            return;
        }

        let Some(seed_job) = solution.random_assigned_job(rng) else {
            return;
        };

        let max_string_length = params.max_string_length.max(1);
        let mut ruined_routes = FxHashSet::<RouteIdx>::default();
        let mut removed = 0;

        for job_id in iter::once(seed_job).chain(problem.nearest_jobs(seed_job)) {
            if removed >= num_jobs_to_remove {
                break;
            }

            let Some(route_id) = solution.route_of_job(job_id) else {
                continue;
            };

            if !ruined_routes.insert(route_id) {
                continue;
            }

            let route = solution.route(route_id);
            let Some(index) = problem
                .job(job_id)
                .activity_ids(job_id)
                .next()
                .and_then(|activity_id| route.activity_position(activity_id))
            else {
                continue;
            };

            let upper = max_string_length
                .min(route.len())
                .min(num_jobs_to_remove - removed)
                .max(1);
            let string_length = rng.random_range(1..=upper);
            let positions = Self::string_positions(string_length, index, route.len(), rng);

            removed += solution.remove_route_activities(route_id, positions).len();
        }
    }
}
