use crate::config::ServiceTimes;
use crate::discrete_system::sequence::Sequence;
use crate::discrete_system::Time;
use serde::{Deserialize, Serialize};

/// A shopper heading for the checkout.
///
/// The arrival record never changes; the timestamps fill in as the customer
/// reaches a counter and leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub sequence: Sequence,
    pub arrival_time: Time,
    pub items: u32,
    service_start: Option<Time>,
    exit_time: Option<Time>,
}

impl Customer {
    pub fn new(sequence: Sequence, arrival_time: Time, items: u32) -> Customer {
        Customer {
            sequence,
            arrival_time,
            items,
            service_start: None,
            exit_time: None,
        }
    }

    /// Waiting is measured from arrival, not from joining a particular line.
    pub fn wait_so_far(&self, now: Time) -> Time {
        now.saturating_sub(self.arrival_time)
    }

    /// Starts the checkout at `now` and returns the tick it completes on.
    pub fn start_service(&mut self, now: Time, service: &ServiceTimes) -> Time {
        self.service_start = Some(now);

        now.saturating_add(service.duration_for(self.items))
    }

    /// Returns the time spent in the store, from arrival to `now`.
    pub fn leave(&mut self, now: Time) -> Time {
        self.exit_time = Some(now);

        self.wait_so_far(now)
    }

    pub fn total_wait(&self) -> Option<Time> {
        self.service_start.map(|start| self.wait_so_far(start))
    }

    pub fn service_start(&self) -> Option<Time> {
        self.service_start
    }

    pub fn exit_time(&self) -> Option<Time> {
        self.exit_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_time_counts_from_service_start() {
        let service = ServiceTimes::default();
        let mut customer = Customer::new(1, 10, 3);

        assert_eq!(customer.total_wait(), None);

        let finish_time = customer.start_service(25, &service);

        assert_eq!(finish_time, 25 + 3 * 7 + 40);
        assert_eq!(customer.service_start(), Some(25));
        assert_eq!(customer.total_wait(), Some(15));
    }

    #[test]
    fn empty_basket_still_pays() {
        let service = ServiceTimes::default();
        let mut customer = Customer::new(1, 0, 0);

        assert_eq!(customer.start_service(0, &service), 40);
    }

    #[test]
    fn finish_time_saturates_for_huge_baskets() {
        let service = ServiceTimes::default();
        let mut customer = Customer::new(1, 0, 700_000_000);

        assert_eq!(customer.start_service(5, &service), Time::MAX);
    }

    #[test]
    fn leaving_records_exit_and_time_in_store() {
        let service = ServiceTimes::default();
        let mut customer = Customer::new(1, 10, 1);
        let finish_time = customer.start_service(12, &service);

        assert_eq!(customer.exit_time(), None);
        assert_eq!(customer.leave(finish_time), 49);
        assert_eq!(customer.exit_time(), Some(59));
    }

    #[test]
    fn wait_never_negative() {
        let customer = Customer::new(1, 10, 0);

        assert_eq!(customer.wait_so_far(4), 0);
        assert_eq!(customer.wait_so_far(14), 4);
    }
}
