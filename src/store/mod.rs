use crate::config::{QueueMode, RefillPolicy, StoreConfig};
use crate::discrete_system::component::Component;
use crate::discrete_system::effector::Effector;
use crate::discrete_system::sequence::Sequence;
use crate::discrete_system::Time;
use crate::store::counter::Counter;
use crate::store::customer::Customer;
use crate::store::line::Line;
use crate::store::stats::StoreStats;
use crate::store::topology::{LineTopology, Topology};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod counter;
pub mod customer;
pub mod line;
pub mod stats;
pub mod topology;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    CustomerArrived {
        customer: Sequence,
        line: usize,
    },
    ServiceStarted {
        customer: Sequence,
        counter: usize,
        line: usize,
        waited: Time,
    },
    ServiceFinished {
        customer: Sequence,
        counter: usize,
        service_time: Time,
        time_in_store: Time,
    },
    LineDrained {
        line: usize,
        customers: usize,
    },
}

/// `Store` owns the checkout area: the lines, the counters and the wiring
/// between them. Counters only know the index of their line, the lines
/// themselves live here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Store {
    topology: Topology,
    lines: Vec<Line>,
    counters: Vec<Counter>,
    elapsed: Time,
}

impl Store {
    pub fn new(config: &StoreConfig) -> Store {
        let topology = Topology::new(config.queue_mode, config.counters);

        let lines = (0..topology.line_count()).map(Line::new).collect();

        let counters = (0..config.counters)
            .map(|number| {
                Counter::new(
                    number,
                    topology.counter_binding(number),
                    config.service,
                    config.refill,
                )
            })
            .collect();

        Store {
            topology,
            lines,
            counters,
            elapsed: 0,
        }
    }

    pub fn with_counters(counters: usize, queue_mode: QueueMode, refill: RefillPolicy) -> Store {
        Store::new(&StoreConfig {
            counters,
            queue_mode,
            refill,
            ..StoreConfig::default()
        })
    }

    /// Puts the customer in a line and returns the index of that line.
    pub fn customer_arrival(&mut self, customer: Customer, now: Time) -> usize {
        let line = self.topology.route_arrival(&self.lines);

        debug!(
            "Customer #{} with {} items joins line {} (length {}) at {}",
            customer.sequence,
            customer.items,
            line,
            self.lines[line].len(),
            now
        );

        self.lines[line].enqueue(customer, now);

        line
    }

    /// Processes one tick for every counter, lowest index first, so when
    /// several idle counters share a line the lowest one gets its head.
    pub fn advance(&mut self, now: Time) -> Vec<Event> {
        let mut effector = Effector::new();

        for counter in self.counters.iter_mut() {
            let line = &mut self.lines[counter.line()];

            if counter.is_idle() && line.is_empty() {
                counter.record_idle();
            } else {
                counter.advance(line, now, &mut effector);
            }
        }

        self.elapsed = now + 1;

        effector.into_events()
    }

    /// Flushes counters and lines so the statistics are final. The clock is not
    /// moved and a second call finds nothing left to do.
    pub fn finalize_statistics(&mut self, now: Time) -> Vec<Event> {
        let mut effector = Effector::new();

        for counter in self.counters.iter_mut() {
            counter.cleanup(&mut effector);
        }

        for line in self.lines.iter_mut() {
            let customers = line.drain_remaining(now);

            if customers > 0 {
                effector.emit(Event::LineDrained {
                    line: line.number(),
                    customers,
                });
            }
        }

        effector.into_events()
    }

    pub fn total_customers_served(&self) -> u32 {
        self.counters.iter().map(Counter::customers_finished).sum()
    }

    pub fn average_service_time(&self) -> f64 {
        let customers = self.total_customers_served();
        if customers == 0 {
            return 0.0;
        }

        let time: u64 = self.counters.iter().map(Counter::time_serving).sum();

        time as f64 / f64::from(customers)
    }

    /// Average wait of everybody who made it from a line to a counter.
    pub fn average_wait_time(&self) -> f64 {
        let customers: u32 = self.lines.iter().map(Line::customers_served).sum();
        if customers == 0 {
            return 0.0;
        }

        let wait: u64 = self.lines.iter().map(Line::total_wait).sum();

        wait as f64 / f64::from(customers)
    }

    pub fn max_line_length(&self) -> usize {
        self.lines.iter().map(Line::max_length).max().unwrap_or(0)
    }

    pub fn queue_mode(&self) -> QueueMode {
        self.topology.queue_mode()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            queue_mode: self.queue_mode(),
            elapsed: self.elapsed,
            lines: self.lines.iter().map(Line::stats).collect(),
            counters: self.counters.iter().map(Counter::stats).collect(),
            total_customers_served: self.total_customers_served(),
            average_wait_time: self.average_wait_time(),
            average_service_time: self.average_service_time(),
            max_line_length: self.max_line_length(),
        }
    }
}

impl Component for Store {
    type Input = Customer;
    type Message = Event;

    fn admit(&mut self, now: Time, customer: Customer) -> Vec<Event> {
        let sequence = customer.sequence;
        let line = self.customer_arrival(customer, now);

        vec![Event::CustomerArrived {
            customer: sequence,
            line,
        }]
    }

    fn advance(&mut self, now: Time) -> Vec<Event> {
        Store::advance(self, now)
    }

    fn finish(&mut self, now: Time) -> Vec<Event> {
        self.finalize_statistics(now)
    }
}
