use crate::discrete_system::Time;
use serde::{Deserialize, Serialize};

/// Simulated time, one tick per second.
///
/// Only the owner of the system moves it forward; everybody else receives
/// the current tick as a plain value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    time: Time,
}

impl Clock {
    pub fn new() -> Clock {
        Clock { time: 0 }
    }

    pub fn now(&self) -> Time {
        self.time
    }

    pub fn advance(&mut self) {
        self.time += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        assert_eq!(Clock::new().now(), 0);
        assert_eq!(Clock::default(), Clock::new());
    }

    #[test]
    fn clock_advances_by_one_tick() {
        let mut clock = Clock::new();

        clock.advance();
        clock.advance();
        clock.advance();

        assert_eq!(clock.now(), 3);
    }
}
