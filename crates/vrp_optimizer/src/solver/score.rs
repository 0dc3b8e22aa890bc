use std::{
    cmp::Ordering,
    fmt, iter,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::score_level::ScoreLevel;

/// Hard/soft score pair. A positive hard score marks an infeasible solution
/// or insertion; the soft score is the cost. Scores compare hard first.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Score {
    pub hard_score: f64,
    pub soft_score: f64,
}

impl Score {
    pub const MAX: Score = Score {
        hard_score: f64::MAX,
        soft_score: f64::MAX,
    };

    pub const ZERO: Score = Score {
        hard_score: 0.0,
        soft_score: 0.0,
    };

    /// Returned for insertions that violate a hard constraint.
    pub const INFEASIBLE: Score = Score {
        hard_score: 1.0,
        soft_score: 0.0,
    };

    pub fn new(hard_score: f64, soft_score: f64) -> Self {
        Score {
            hard_score,
            soft_score,
        }
    }

    pub fn of(level: ScoreLevel, score: f64) -> Self {
        match level {
            ScoreLevel::Hard => Score::hard(score),
            ScoreLevel::Soft => Score::soft(score),
        }
    }

    pub fn hard(hard_score: f64) -> Self {
        Score {
            hard_score,
            soft_score: 0.0,
        }
    }

    pub fn soft(soft_score: f64) -> Self {
        Score {
            hard_score: 0.0,
            soft_score,
        }
    }

    pub fn zero() -> Self {
        Score::ZERO
    }

    pub fn is_failure(&self) -> bool {
        self.hard_score > 0.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}hard/{:.2}soft", self.hard_score, self.soft_score)
    }
}

/// Total order on both levels, with `-0.0` and `0.0` equal.
fn cmp_level(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_level(self.hard_score, other.hard_score)
            .then_with(|| cmp_level(self.soft_score, other.soft_score))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, |acc, score| acc + score)
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score + other.hard_score,
            soft_score: self.soft_score + other.soft_score,
        }
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, other: Score) {
        self.hard_score += other.hard_score;
        self.soft_score += other.soft_score;
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score - other.hard_score,
            soft_score: self.soft_score - other.soft_score,
        }
    }
}

impl SubAssign<Score> for Score {
    fn sub_assign(&mut self, other: Score) {
        self.hard_score -= other.hard_score;
        self.soft_score -= other.soft_score;
    }
}

/// Score contribution of every constraint, by constraint name.
#[derive(Default, Clone, Debug, Serialize)]
pub struct ScoreAnalysis {
    pub scores: FxHashMap<&'static str, Score>,
}
