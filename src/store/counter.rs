use crate::config::{RefillPolicy, ServiceTimes};
use crate::discrete_system::effector::Effector;
use crate::discrete_system::Time;
use crate::store::customer::Customer;
use crate::store::line::Line;
use crate::store::stats::CounterStats;
use crate::store::Event;
use log::debug;
use serde::{Deserialize, Serialize};
use std::mem;

/// 1. Counter when
///     * `Idle`
///         * On `advance`
///             * If its line has somebody waiting
///                 1) Take the head of the line
///                 2) Transition to `Serving` with the finish tick
///                    `now + items * item_time + payment_time`
///             * Else count an idle tick
///     * `Serving`
///         * On `advance`
///             * If the finish tick was reached
///                 1) Book `finish - start` as service time, one customer finished
///                 2) Transition to `Idle`
///                 3) With `NextTick` refill the tick counts as idle, the line is
///                    looked at on the next advance. With `SameTick` the line is
///                    looked at right away.
///             * Else nothing changes
///     * `cleanup` completes the current customer at its finish tick without
///       waiting for the clock
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
enum State {
    Idle,
    Serving {
        customer: Customer,
        started: Time,
        finish_time: Time,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Counter {
    number: usize,
    line: usize,
    service: ServiceTimes,
    refill_policy: RefillPolicy,
    state: State,
    customers_finished: u32,
    time_serving: u64,
    idle_ticks: u32,
}

impl Counter {
    pub fn new(
        number: usize,
        line: usize,
        service: ServiceTimes,
        refill_policy: RefillPolicy,
    ) -> Counter {
        Counter {
            number,
            line,
            service,
            refill_policy,
            state: State::Idle,
            customers_finished: 0,
            time_serving: 0,
            idle_ticks: 0,
        }
    }

    pub fn advance(&mut self, line: &mut Line, now: Time, effector: &mut Effector<Event>) {
        match mem::replace(&mut self.state, State::Idle) {
            State::Idle => self.take_next(line, now, effector),
            State::Serving {
                customer,
                started,
                finish_time,
            } => {
                if now >= finish_time {
                    self.complete(customer, started, finish_time, effector);

                    match self.refill_policy {
                        RefillPolicy::NextTick => self.idle_ticks += 1,
                        RefillPolicy::SameTick => self.take_next(line, now, effector),
                    }
                } else {
                    self.state = State::Serving {
                        customer,
                        started,
                        finish_time,
                    };
                }
            }
        }
    }

    /// An idle counter whose line is known to be empty.
    pub fn record_idle(&mut self) {
        self.idle_ticks += 1;
    }

    pub fn cleanup(&mut self, effector: &mut Effector<Event>) -> bool {
        match mem::replace(&mut self.state, State::Idle) {
            State::Serving {
                customer,
                started,
                finish_time,
            } => {
                self.complete(customer, started, finish_time, effector);
                true
            }
            State::Idle => false,
        }
    }

    fn take_next(&mut self, line: &mut Line, now: Time, effector: &mut Effector<Event>) {
        match line.dequeue(now) {
            Some(mut customer) => {
                let finish_time = customer.start_service(now, &self.service);

                debug!(
                    "Counter {} took customer #{} ({} items) at {}, done at {}",
                    self.number, customer.sequence, customer.items, now, finish_time
                );

                effector.emit(Event::ServiceStarted {
                    customer: customer.sequence,
                    counter: self.number,
                    line: line.number(),
                    waited: customer.wait_so_far(now),
                });

                self.state = State::Serving {
                    customer,
                    started: now,
                    finish_time,
                };
            }
            None => self.idle_ticks += 1,
        }
    }

    fn complete(
        &mut self,
        mut customer: Customer,
        started: Time,
        finish_time: Time,
        effector: &mut Effector<Event>,
    ) {
        let service_time = finish_time - started;

        let time_in_store = customer.leave(finish_time);

        self.time_serving += u64::from(service_time);
        self.customers_finished += 1;

        debug!(
            "Counter {} finished customer #{} at {}",
            self.number, customer.sequence, finish_time
        );

        effector.emit(Event::ServiceFinished {
            customer: customer.sequence,
            counter: self.number,
            service_time,
            time_in_store,
        });
    }

    pub fn is_idle(&self) -> bool {
        match self.state {
            State::Idle => true,
            State::Serving { .. } => false,
        }
    }

    pub fn has_customer(&self) -> bool {
        !self.is_idle()
    }

    pub fn current_customer(&self) -> Option<&Customer> {
        match &self.state {
            State::Serving { customer, .. } => Some(customer),
            State::Idle => None,
        }
    }

    pub fn finish_time(&self) -> Option<Time> {
        match self.state {
            State::Serving { finish_time, .. } => Some(finish_time),
            State::Idle => None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn customers_finished(&self) -> u32 {
        self.customers_finished
    }

    pub fn time_serving(&self) -> u64 {
        self.time_serving
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn average_service_time(&self) -> f64 {
        if self.customers_finished == 0 {
            0.0
        } else {
            self.time_serving as f64 / f64::from(self.customers_finished)
        }
    }

    pub fn stats(&self) -> CounterStats {
        CounterStats {
            number: self.number,
            line: self.line,
            customers_finished: self.customers_finished,
            time_serving: self.time_serving,
            idle_ticks: self.idle_ticks,
            has_customer: self.has_customer(),
            average_service_time: self.average_service_time(),
        }
    }
}
