use serde::{Deserialize, Serialize};

/// A window `[start, end]` in which an activity may begin. Either side may be
/// open. Arriving before `start` means waiting; arriving after `end` is
/// infeasible.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeWindow {
    start: Option<f64>,
    end: Option<f64>,
}

impl TimeWindow {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        TimeWindow { start, end }
    }

    pub fn between(start: f64, end: f64) -> Self {
        TimeWindow {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_valid(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    pub fn is_satisfied(&self, arrival: f64) -> bool {
        match self.end {
            Some(end) => arrival <= end,
            None => true,
        }
    }

    /// Time at which the activity can begin when arriving at `arrival`.
    pub fn service_start(&self, arrival: f64) -> f64 {
        match self.start {
            Some(start) => arrival.max(start),
            None => arrival,
        }
    }

    pub fn overtime(&self, arrival: f64) -> f64 {
        match self.end {
            Some(end) => (arrival - end).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_satisfied() {
        let time_window = TimeWindow::between(10.0, 20.0);

        assert!(time_window.is_satisfied(5.0));
        assert!(time_window.is_satisfied(20.0));
        assert!(!time_window.is_satisfied(20.5));
        assert!(TimeWindow::default().is_satisfied(f64::MAX));
    }

    #[test]
    fn test_service_start_waits_for_opening() {
        let time_window = TimeWindow::between(10.0, 20.0);

        assert_eq!(time_window.service_start(4.0), 10.0);
        assert_eq!(time_window.service_start(12.0), 12.0);
        assert_eq!(TimeWindow::new(None, Some(3.0)).service_start(1.0), 1.0);
    }

    #[test]
    fn test_overtime() {
        let time_window = TimeWindow::new(None, Some(20.0));

        assert_eq!(time_window.overtime(25.0), 5.0);
        assert_eq!(time_window.overtime(15.0), 0.0);
    }

    #[test]
    fn test_is_valid() {
        assert!(TimeWindow::between(1.0, 1.0).is_valid());
        assert!(!TimeWindow::between(2.0, 1.0).is_valid());
        assert!(TimeWindow::new(Some(5.0), None).is_valid());
    }
}
