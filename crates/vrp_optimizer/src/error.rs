use thiserror::Error;

/// The problem model (or an initial assignment handed to the solver) is
/// structurally invalid. Always reported before the search starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidProblemError {
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("job '{job_id}' has {actual} capacity dimensions, expected {expected}")]
    CapacityDimensionMismatch {
        job_id: String,
        expected: usize,
        actual: usize,
    },
    #[error("vehicle type '{type_id}' has {actual} capacity dimensions, expected {expected}")]
    VehicleTypeDimensionMismatch {
        type_id: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate job id '{0}'")]
    DuplicateJobId(String),
    #[error("duplicate vehicle id '{0}'")]
    DuplicateVehicleId(String),
    #[error("'{owner}' references unknown location {location_id}")]
    UnknownLocation { owner: String, location_id: usize },
    #[error("'{owner}' has a time window ending before it starts")]
    InvalidTimeWindow { owner: String },
    #[error("unknown vehicle {0}")]
    UnknownVehicle(usize),
    #[error("unknown job {0}")]
    UnknownJob(usize),
    #[error("job {0} is assigned more than once")]
    JobAssignedTwice(usize),
    #[error("vehicle {0} is used by more than one route in a finite fleet")]
    VehicleUsedTwice(usize),
    #[error("route of vehicle {vehicle} is infeasible")]
    InfeasibleRoute { vehicle: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no solution has been retained yet")]
pub struct EmptyPoolError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error(transparent)]
    InvalidProblem(#[from] InvalidProblemError),
    #[error(transparent)]
    EmptyPool(#[from] EmptyPoolError),
    #[error("failed to start the insertion thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
