use crate::problem::{
    job::{ActivityId, Task},
    location::LocationIdx,
    time_window::TimeWindow,
    vehicle::Vehicle,
};

/// A visit as seen by an [`ActivityCosts`] policy.
#[derive(Debug, Clone, Copy)]
pub struct TourActivity<'a> {
    activity_id: ActivityId,
    task: &'a Task,
}

impl<'a> TourActivity<'a> {
    pub fn new(activity_id: ActivityId, task: &'a Task) -> Self {
        TourActivity { activity_id, task }
    }

    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.task.location_id()
    }

    /// Service duration declared on the job.
    pub fn operation_time(&self) -> f64 {
        self.task.service_duration()
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.task.time_window()
    }
}

/// Cost and duration of performing an activity, given when the vehicle
/// arrives and which vehicle it is. Implementations must be pure.
pub trait ActivityCosts: Send + Sync {
    fn cost(&self, activity: &TourActivity, arrival_time: f64, vehicle: &Vehicle) -> f64;

    fn duration(&self, activity: &TourActivity, arrival_time: f64, vehicle: &Vehicle) -> f64;
}

/// No activity cost; activities last their declared service duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultActivityCosts;

impl ActivityCosts for DefaultActivityCosts {
    fn cost(&self, _activity: &TourActivity, _arrival_time: f64, _vehicle: &Vehicle) -> f64 {
        0.0
    }

    fn duration(&self, activity: &TourActivity, _arrival_time: f64, _vehicle: &Vehicle) -> f64 {
        activity.operation_time()
    }
}
