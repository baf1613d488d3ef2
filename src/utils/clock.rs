use chrono::{DateTime, Local};

/// Represents an entity responsible for providing the current date across application. This
/// allows views to be resolved against a fixed "today" in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
