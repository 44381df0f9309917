use crate::config::QueueMode;
use crate::store::line::Line;
use serde::{Deserialize, Serialize};

/// How lines and counters are wired together. Chosen once when the store is
/// built and never changed during a run.
pub trait LineTopology {
    fn line_count(&self) -> usize;
    /// Index of the line a newly arrived customer joins.
    fn route_arrival(&self, lines: &[Line]) -> usize;
    /// Index of the line the given counter pulls customers from.
    fn counter_binding(&self, counter: usize) -> usize;
}

/// Every counter serves the one common line.
#[derive(Debug, Serialize, Deserialize)]
pub struct SharedLine;

impl LineTopology for SharedLine {
    fn line_count(&self) -> usize {
        1
    }

    fn route_arrival(&self, _lines: &[Line]) -> usize {
        0
    }

    fn counter_binding(&self, _counter: usize) -> usize {
        0
    }
}

/// Every counter has its own line, arrivals pick the shortest one.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinePerCounter {
    counters: usize,
}

impl LinePerCounter {
    pub fn new(counters: usize) -> LinePerCounter {
        LinePerCounter { counters }
    }
}

impl LineTopology for LinePerCounter {
    fn line_count(&self) -> usize {
        self.counters
    }

    /// Greedy: only the number of people waiting counts, not how far along the
    /// counter is with its current customer. Ties go to the lowest index.
    fn route_arrival(&self, lines: &[Line]) -> usize {
        lines
            .iter()
            .enumerate()
            .min_by_key(|(_, line)| line.len())
            .map_or(0, |(index, _)| index)
    }

    fn counter_binding(&self, counter: usize) -> usize {
        counter
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Topology {
    Shared(SharedLine),
    PerCounter(LinePerCounter),
}

impl Topology {
    pub fn new(queue_mode: QueueMode, counters: usize) -> Topology {
        match queue_mode {
            QueueMode::Shared => SharedLine.into(),
            QueueMode::PerCounter => LinePerCounter::new(counters).into(),
        }
    }

    pub fn queue_mode(&self) -> QueueMode {
        match self {
            Topology::Shared(_) => QueueMode::Shared,
            Topology::PerCounter(_) => QueueMode::PerCounter,
        }
    }
}

impl From<SharedLine> for Topology {
    fn from(topology: SharedLine) -> Topology {
        Topology::Shared(topology)
    }
}

impl From<LinePerCounter> for Topology {
    fn from(topology: LinePerCounter) -> Topology {
        Topology::PerCounter(topology)
    }
}

impl LineTopology for Topology {
    fn line_count(&self) -> usize {
        match self {
            Topology::Shared(topology) => topology.line_count(),
            Topology::PerCounter(topology) => topology.line_count(),
        }
    }

    fn route_arrival(&self, lines: &[Line]) -> usize {
        match self {
            Topology::Shared(topology) => topology.route_arrival(lines),
            Topology::PerCounter(topology) => topology.route_arrival(lines),
        }
    }

    fn counter_binding(&self, counter: usize) -> usize {
        match self {
            Topology::Shared(topology) => topology.counter_binding(counter),
            Topology::PerCounter(topology) => topology.counter_binding(counter),
        }
    }
}
