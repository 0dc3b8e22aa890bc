use crate::solver::solution::working_solution::WorkingSolution;

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

/// Removes a random assigned job and its nearest assigned neighbors.
pub struct RuinRadial;

impl RuinSolution for RuinRadial {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        RuinContext {
            rng,
            num_jobs_to_remove,
            problem,
            ..
        }: RuinContext<R>,
    ) where
        R: rand::Rng,
    {
        if num_jobs_to_remove == 0 {
            return;
        }

        let Some(seed_job) = solution.random_assigned_job(rng) else {
            return;
        };

        solution.remove_job(seed_job);

        let mut remaining_jobs_to_remove = num_jobs_to_remove - 1;
        for job_id in problem.nearest_jobs(seed_job) {
            if remaining_jobs_to_remove == 0 {
                break;
            }

            if solution.remove_job(job_id) {
                remaining_jobs_to_remove -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{SeedableRng, rngs::SmallRng};

    use crate::{
        problem::job::JobIdx,
        solver::{
            ruin::{
                ruin_context::RuinContext, ruin_params::RuinParams, ruin_radial::RuinRadial,
                ruin_solution::RuinSolution,
            },
            solution::route_id::RouteIdx,
        },
        test_utils::{self, TestRoute},
    };

    #[test]
    fn test_radial_ruin_basic() {
        let locations = test_utils::create_location_grid(4, 4);

        //
        //  Y-axis
        //  ^
        //  | (12) (13) (14) (15)
        //  | ( 8) ( 9) (10) (11)
        //  | ( 4) ( 5) ( 6) ( 7)
        //  | ( 0) ( 1) ( 2) ( 3)
        //  +--------------------> X-axis
        let services = test_utils::create_basic_services(vec![1, 6, 8, 10]);
        let vehicles = test_utils::create_basic_vehicles(vec![0]);
        let problem = Arc::new(test_utils::create_test_problem(
            locations, services, vehicles,
        ));

        let mut solution = test_utils::create_test_working_solution(
            Arc::clone(&problem),
            vec![TestRoute {
                vehicle_id: 0,
                service_ids: vec![0, 1, 2, 3],
            }],
        );

        let mut rng = SmallRng::seed_from_u64(9);

        RuinRadial.ruin_solution(
            &mut solution,
            RuinContext {
                params: &RuinParams::default(),
                problem: &problem,
                rng: &mut rng,
                num_jobs_to_remove: 2,
            },
        );

        // The seed goes together with its closest assigned neighbor
        let removed = solution.sorted_unassigned_jobs();
        let expected_pairs = [[0, 1], [1, 3], [2, 3]];
        assert!(
            expected_pairs
                .iter()
                .any(|pair| pair.map(JobIdx::new).to_vec() == removed)
        );
        assert_eq!(solution.route(RouteIdx::new(0)).len(), 2);
    }
}
