// Lifecycle of the cached `time_logged` hours on a task.
//
// The mutation flow that owns the cache lives outside this crate. This helper states its
// arithmetic: create adds, update adds the delta, delete subtracts, never below zero.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeLoggedChange {
    Created { duration: f64 },
    Updated { old_duration: f64, new_duration: f64 },
    Deleted { duration: f64 },
}

impl TimeLoggedChange {
    pub fn apply(self, current: f64) -> f64 {
        let current = if current.is_finite() { current } else { 0.0 };
        let next = match self {
            TimeLoggedChange::Created { duration } => current + duration,
            TimeLoggedChange::Updated {
                old_duration,
                new_duration,
            } => current + (new_duration - old_duration),
            TimeLoggedChange::Deleted { duration } => current - duration,
        };
        if next.is_finite() { next.max(0.0) } else { current.max(0.0) }
    }
}
