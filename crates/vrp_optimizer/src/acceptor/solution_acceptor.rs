use serde::{Deserialize, Serialize};

use crate::solver::score::Score;

use super::{
    accept_solution::{AcceptSolution, AcceptSolutionContext},
    greedy_solution_acceptor::GreedySolutionAcceptor,
    schrimpf_acceptor::SchrimpfAcceptor,
    simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverAcceptorStrategy {
    Greedy,
    SimulatedAnnealing,
    #[default]
    Schrimpf,
}

pub enum SolutionAcceptor {
    Greedy(GreedySolutionAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
    Schrimpf(SchrimpfAcceptor),
}

impl SolutionAcceptor {
    pub fn new(strategy: SolverAcceptorStrategy, temperature: f64, schrimpf_alpha: f64) -> Self {
        match strategy {
            SolverAcceptorStrategy::Greedy => SolutionAcceptor::Greedy(GreedySolutionAcceptor),
            SolverAcceptorStrategy::SimulatedAnnealing => {
                SolutionAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor::new(temperature))
            }
            SolverAcceptorStrategy::Schrimpf => {
                SolutionAcceptor::Schrimpf(SchrimpfAcceptor::new(temperature, schrimpf_alpha))
            }
        }
    }
}

impl AcceptSolution for SolutionAcceptor {
    fn accept(&self, current: &Score, candidate: &Score, context: AcceptSolutionContext) -> bool {
        match self {
            SolutionAcceptor::Greedy(acceptor) => acceptor.accept(current, candidate, context),
            SolutionAcceptor::SimulatedAnnealing(acceptor) => {
                acceptor.accept(current, candidate, context)
            }
            SolutionAcceptor::Schrimpf(acceptor) => acceptor.accept(current, candidate, context),
        }
    }
}
