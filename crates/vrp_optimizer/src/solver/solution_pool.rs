use std::cmp::Ordering;

use crate::error::EmptyPoolError;

use super::accepted_solution::AcceptedSolution;

/// Bounded set of the best solutions seen so far, kept in ascending order.
/// Entries are deep copies, independent of any working solution.
#[derive(Clone)]
pub struct SolutionPool {
    capacity: usize,
    solutions: Vec<AcceptedSolution>,
}

impl SolutionPool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        SolutionPool {
            capacity,
            solutions: Vec::with_capacity(capacity + 1),
        }
    }

    /// Stores a copy of `accepted` after every entry that is not worse, so equal
    /// entries keep their insertion order. Returns the position of the new entry,
    /// or `None` when it was a duplicate or fell off the end of the pool.
    pub fn retain(&mut self, accepted: &AcceptedSolution) -> Option<usize> {
        let is_duplicate = self.solutions.iter().any(|retained| {
            retained.score == accepted.score && retained.solution.is_identical(&accepted.solution)
        });

        if is_duplicate {
            return None;
        }

        let position = self
            .solutions
            .partition_point(|retained| retained.compare(accepted) != Ordering::Greater);

        if position >= self.capacity {
            return None;
        }

        self.solutions.insert(position, accepted.clone());
        self.solutions.truncate(self.capacity);

        Some(position)
    }

    pub fn best_of(&self) -> Result<&AcceptedSolution, EmptyPoolError> {
        self.solutions.first().ok_or(EmptyPoolError)
    }

    pub fn solutions(&self) -> &[AcceptedSolution] {
        &self.solutions
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::fleet::FleetSize,
        solver::{score::Score, solution::working_solution::WorkingSolution},
        test_utils::{self, TestRoute},
    };

    use super::*;

    fn accepted(service_ids: Vec<usize>, soft_score: f64) -> AcceptedSolution {
        let problem = Arc::new(test_utils::create_test_problem(
            test_utils::create_location_grid(3, 3),
            test_utils::create_basic_services(vec![1, 2, 3, 4]),
            test_utils::create_basic_vehicles(vec![0]),
        ));
        let solution = if service_ids.is_empty() {
            WorkingSolution::new(problem, FleetSize::Finite)
        } else {
            test_utils::create_test_working_solution(
                problem,
                vec![TestRoute {
                    vehicle_id: 0,
                    service_ids,
                }],
            )
        };

        AcceptedSolution::new(solution, Score::soft(soft_score))
    }

    #[test]
    fn test_best_of_empty_pool_fails() {
        let pool = SolutionPool::new(3);
        assert_eq!(pool.best_of().err(), Some(EmptyPoolError));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_retain_keeps_ascending_order_and_evicts_worst() {
        let mut pool = SolutionPool::new(2);

        assert_eq!(pool.retain(&accepted(vec![0], 30.0)), Some(0));
        assert_eq!(pool.retain(&accepted(vec![1], 10.0)), Some(0));
        assert_eq!(pool.retain(&accepted(vec![2], 20.0)), Some(1));
        assert_eq!(pool.retain(&accepted(vec![3], 40.0)), None);

        let scores = pool
            .solutions()
            .iter()
            .map(|accepted| accepted.score.soft_score)
            .collect::<Vec<_>>();
        assert_eq!(scores, vec![10.0, 20.0]);
        assert_eq!(pool.best_of().unwrap().score, Score::soft(10.0));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut pool = SolutionPool::new(5);

        pool.retain(&accepted(vec![0], 10.0));
        pool.retain(&accepted(vec![1], 10.0));
        pool.retain(&accepted(vec![2], 10.0));

        let first_jobs = pool
            .solutions()
            .iter()
            .map(|accepted| accepted.solution.routes()[0].activity_ids()[0].job_id().get())
            .collect::<Vec<_>>();
        assert_eq!(first_jobs, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let mut pool = SolutionPool::new(5);

        assert_eq!(pool.retain(&accepted(vec![0, 1], 10.0)), Some(0));
        assert_eq!(pool.retain(&accepted(vec![0, 1], 10.0)), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_fewer_vehicles_wins_on_equal_score() {
        let mut pool = SolutionPool::new(5);

        pool.retain(&accepted(vec![0], 10.0));
        pool.retain(&accepted(vec![], 10.0));

        assert_eq!(pool.best_of().unwrap().solution.non_empty_routes_count(), 0);
    }
}
