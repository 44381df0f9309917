use crate::discrete_system::Time;
use crate::store::customer::Customer;
use crate::store::stats::LineStats;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::collections::vec_deque::VecDeque;

/// 1. `Line` is a plain FIFO in front of one or more counters
///     * `enqueue` appends to the tail, there is no length limit
///     * `dequeue` takes the head and books its wait as served
///     * `drain_remaining` empties the line at the end of the run, the wait
///       of everybody still standing counts towards `max_wait` only
///
/// Waits are measured from the customer's arrival tick.
#[derive(Debug, Serialize, Deserialize)]
pub struct Line {
    number: usize,
    customers: VecDeque<Customer>,
    total_wait: u64,
    max_wait: Time,
    max_length: usize,
    customers_served: u32,
    customers_unserved: u32,
}

impl Line {
    pub fn new(number: usize) -> Line {
        Line {
            number,
            customers: VecDeque::new(),
            total_wait: 0,
            max_wait: 0,
            max_length: 0,
            customers_served: 0,
            customers_unserved: 0,
        }
    }

    pub fn enqueue(&mut self, customer: Customer, now: Time) {
        self.max_wait = max(self.max_wait, customer.wait_so_far(now));

        self.customers.push_back(customer);

        self.max_length = max(self.max_length, self.customers.len());
    }

    pub fn dequeue(&mut self, now: Time) -> Option<Customer> {
        let customer = self.customers.pop_front()?;
        let wait = customer.wait_so_far(now);

        self.total_wait += u64::from(wait);
        self.max_wait = max(self.max_wait, wait);
        self.customers_served += 1;

        Some(customer)
    }

    pub fn drain_remaining(&mut self, now: Time) -> usize {
        let removed = self.customers.len();

        for customer in self.customers.drain(..) {
            self.max_wait = max(self.max_wait, customer.wait_so_far(now));
        }

        if removed > 0 {
            debug!(
                "Line {} drained {} customer(s) still waiting at {}",
                self.number, removed, now
            );
        }

        self.customers_unserved += removed as u32;

        removed
    }

    pub fn average_wait(&self) -> f64 {
        if self.customers_served == 0 {
            0.0
        } else {
            self.total_wait as f64 / f64::from(self.customers_served)
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn total_wait(&self) -> u64 {
        self.total_wait
    }

    pub fn max_wait(&self) -> Time {
        self.max_wait
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn customers_served(&self) -> u32 {
        self.customers_served
    }

    pub fn stats(&self) -> LineStats {
        LineStats {
            number: self.number,
            waiting: self.customers.len(),
            max_length: self.max_length,
            customers_served: self.customers_served,
            customers_unserved: self.customers_unserved,
            total_wait: self.total_wait,
            average_wait: self.average_wait(),
            max_wait: self.max_wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(sequence: u32, arrival_time: Time) -> Customer {
        Customer::new(sequence, arrival_time, 1)
    }

    #[test]
    fn dequeue_is_fifo() {
        let mut line = Line::new(0);
        line.enqueue(customer(1, 0), 0);
        line.enqueue(customer(2, 0), 0);
        line.enqueue(customer(3, 1), 1);

        let order: Vec<_> = (0..3)
            .filter_map(|_| line.dequeue(5))
            .map(|c| c.sequence)
            .collect();

        assert_eq!(order, vec![1, 2, 3]);
        assert!(line.is_empty());
    }

    #[test]
    fn empty_dequeue_yields_nothing_and_books_nothing() {
        let mut line = Line::new(0);

        assert!(line.dequeue(10).is_none());
        assert_eq!(line.customers_served(), 0);
        assert_eq!(line.average_wait(), 0.0);
    }

    #[test]
    fn dequeue_books_wait_since_arrival() {
        let mut line = Line::new(0);
        line.enqueue(customer(1, 2), 2);
        line.enqueue(customer(2, 4), 4);

        line.dequeue(10);
        line.dequeue(12);

        assert_eq!(line.customers_served(), 2);
        assert_eq!(line.total_wait(), 8 + 8);
        assert_eq!(line.average_wait(), 8.0);
        assert_eq!(line.max_wait(), 8);
    }

    #[test]
    fn max_length_survives_draining() {
        let mut line = Line::new(0);
        for sequence in 1..=4 {
            line.enqueue(customer(sequence, 0), 0);
        }
        line.dequeue(1);
        line.enqueue(customer(5, 1), 1);

        assert_eq!(line.max_length(), 4);

        assert_eq!(line.drain_remaining(2), 4);
        assert_eq!(line.max_length(), 4);
        assert!(line.is_empty());
    }

    #[test]
    fn drain_updates_max_wait_without_serving() {
        let mut line = Line::new(0);
        line.enqueue(customer(1, 0), 0);
        line.enqueue(customer(2, 30), 30);
        line.dequeue(5);

        let removed = line.drain_remaining(100);

        assert_eq!(removed, 1);
        assert_eq!(line.customers_served(), 1);
        assert_eq!(line.max_wait(), 70);
        assert_eq!(line.average_wait(), 5.0);
        assert_eq!(line.stats().customers_unserved, 1);
    }

    #[test]
    fn drain_twice_changes_nothing() {
        let mut line = Line::new(0);
        line.enqueue(customer(1, 0), 0);

        line.drain_remaining(50);
        let first = line.stats();
        line.drain_remaining(50);

        assert_eq!(line.stats(), first);
    }
}
