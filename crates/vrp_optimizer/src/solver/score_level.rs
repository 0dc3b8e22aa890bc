use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLevel {
    /// Feasibility: any positive amount makes a solution infeasible.
    Hard,
    /// Cost to minimize.
    Soft,
}
