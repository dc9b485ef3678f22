use chrono::NaiveDateTime;
use std::cell::Cell;

/// Source of the current local time, so session handling can be tested
/// without waiting on the wall clock.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Clock pinned to a given instant; moves only when told to.
///
/// Backs `--as-of` and the session tests.
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.now.set(self.now.get() + chrono::Duration::minutes(minutes));
    }
}

#[cfg(test)]
impl FixedClock {
    pub fn at(s: &str) -> Self {
        Self::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
