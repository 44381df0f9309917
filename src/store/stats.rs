use crate::config::QueueMode;
use crate::discrete_system::Time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStats {
    pub number: usize,
    pub waiting: usize,            // Still in line right now
    pub max_length: usize,         // Longest the line ever got
    pub customers_served: u32,     // Handed over to a counter
    pub customers_unserved: u32,   // Drained at the end of the run
    pub total_wait: u64,
    pub average_wait: f64,
    pub max_wait: Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterStats {
    pub number: usize,
    pub line: usize,
    pub customers_finished: u32,
    pub time_serving: u64,
    pub idle_ticks: u32,
    pub has_customer: bool,
    pub average_service_time: f64,
}

impl CounterStats {
    /// Share of `elapsed` the counter spent without a customer, in percent.
    pub fn idle_percent(&self, elapsed: Time) -> f64 {
        if elapsed == 0 {
            0.0
        } else {
            f64::from(self.idle_ticks) / f64::from(elapsed) * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub queue_mode: QueueMode,
    pub elapsed: Time,
    pub lines: Vec<LineStats>,
    pub counters: Vec<CounterStats>,
    pub total_customers_served: u32,
    pub average_wait_time: f64,
    pub average_service_time: f64,
    pub max_line_length: usize,
}
