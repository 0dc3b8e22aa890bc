use serde::{Deserialize, Serialize};

/// How declared vehicles may be used by a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleetSize {
    /// Each declared vehicle drives at most one route.
    Finite,
    /// Declared vehicles are templates; any number of copies may be opened.
    #[default]
    Infinite,
}

impl FleetSize {
    pub fn is_infinite(&self) -> bool {
        matches!(self, FleetSize::Infinite)
    }
}
