use crate::discrete_system::clock::Clock;
use crate::discrete_system::component::Component;
use log::{info, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub mod clock;
pub mod component;
pub mod effector;
pub mod sequence;

pub type Time = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<M> {
    pub time: Time,
    pub message: M,
}

#[derive(Debug)]
struct Scheduled<I> {
    time: Time,
    input: I,
}

/// `DiscreteSystem` drives one component in lockstep: each tick it feeds the
/// inputs scheduled for that tick, advances the component once and moves the
/// clock forward by one.
pub struct DiscreteSystem<C: Component> {
    pub clock: Clock,
    pub component: C,
    duration: Time,
    pending: VecDeque<Scheduled<C::Input>>,
}

impl<C: Component> DiscreteSystem<C> {
    pub fn new(component: C, duration: Time) -> DiscreteSystem<C> {
        DiscreteSystem {
            clock: Clock::new(),
            component,
            duration,
            pending: VecDeque::new(),
        }
    }

    /// Inputs with the same tick keep the order they were scheduled in.
    pub fn schedule(&mut self, time: Time, input: C::Input) {
        let scheduled = Scheduled { time, input };

        match self.pending.back() {
            Some(last) if last.time > time => {
                let index = self.pending.partition_point(|s| s.time <= time);
                self.pending.insert(index, scheduled);
            }
            _ => self.pending.push_back(scheduled),
        }
    }

    pub fn tick(&mut self) -> Vec<Event<C::Message>> {
        let mut events = Vec::new();

        if !self.has_ticks_left() {
            return events;
        }

        let now = self.clock.now();

        trace!("=== Tick {} ===", now);

        while self.pending.front().map_or(false, |s| s.time <= now) {
            if let Some(scheduled) = self.pending.pop_front() {
                let messages = self.component.admit(now, scheduled.input);
                events.extend(stamp(now, messages));
            }
        }

        let messages = self.component.advance(now);
        events.extend(stamp(now, messages));

        self.clock.advance();

        events
    }

    pub fn finish(&mut self) -> Vec<Event<C::Message>> {
        let now = self.clock.now();

        if !self.pending.is_empty() {
            warn!(
                "{} scheduled arrival(s) fall after the end of the simulation at {}",
                self.pending.len(),
                now
            );
        }

        stamp(now, self.component.finish(now)).collect()
    }

    pub fn run(&mut self) -> Vec<Event<C::Message>> {
        info!("Running simulation for {} ticks", self.duration);

        let mut events = Vec::new();

        while self.has_ticks_left() {
            events.extend(self.tick());
        }

        events.extend(self.finish());

        info!("Simulation finished at {}", self.clock.now());

        events
    }

    pub fn has_ticks_left(&self) -> bool {
        self.clock.now() < self.duration
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn stamp<M>(time: Time, messages: Vec<M>) -> impl Iterator<Item = Event<M>> {
    messages
        .into_iter()
        .map(move |message| Event { time, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what it sees so the tick ordering can be checked.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(Time, &'static str)>,
        finished: u32,
    }

    impl Component for Recorder {
        type Input = &'static str;
        type Message = &'static str;

        fn admit(&mut self, now: Time, input: &'static str) -> Vec<&'static str> {
            self.seen.push((now, input));
            vec![input]
        }

        fn advance(&mut self, now: Time) -> Vec<&'static str> {
            self.seen.push((now, "advance"));
            Vec::new()
        }

        fn finish(&mut self, _now: Time) -> Vec<&'static str> {
            self.finished += 1;
            Vec::new()
        }
    }

    #[test]
    fn inputs_are_admitted_before_advance() {
        let mut system = DiscreteSystem::new(Recorder::default(), 2);
        system.schedule(1, "a");

        system.run();

        assert_eq!(
            system.component.seen,
            vec![(0, "advance"), (1, "a"), (1, "advance")]
        );
        assert_eq!(system.clock.now(), 2);
        assert_eq!(system.component.finished, 1);
    }

    #[test]
    fn schedule_keeps_time_order_and_is_stable() {
        let mut system = DiscreteSystem::new(Recorder::default(), 3);
        system.schedule(2, "late");
        system.schedule(0, "first");
        system.schedule(0, "second");
        system.schedule(2, "later");

        let events = system.run();
        let messages: Vec<_> = events.iter().map(|e| (e.time, e.message)).collect();

        assert_eq!(
            messages,
            vec![(0, "first"), (0, "second"), (2, "late"), (2, "later")]
        );
    }

    #[test]
    fn tick_does_nothing_after_duration() {
        let mut system = DiscreteSystem::new(Recorder::default(), 1);

        system.tick();
        assert!(!system.has_ticks_left());

        system.tick();
        assert_eq!(system.clock.now(), 1);
        assert_eq!(system.component.seen.len(), 1);
    }

    #[test]
    fn arrivals_past_duration_stay_pending() {
        let mut system = DiscreteSystem::new(Recorder::default(), 2);
        system.schedule(5, "never");

        system.run();

        assert_eq!(system.pending_count(), 1);
    }
}
