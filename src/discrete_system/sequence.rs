use serde::{Deserialize, Serialize};

pub type Sequence = u32;

/// Hands out customer sequence numbers. The generator is owned by whoever
/// creates customers, so two runs never share numbering.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SequenceGenerator {
    curr: Sequence,
}

impl SequenceGenerator {
    pub fn new() -> SequenceGenerator {
        SequenceGenerator { curr: 1 }
    }

    pub fn next(&mut self) -> Sequence {
        let sequence = self.curr;

        self.curr += 1;

        sequence
    }
}

impl Default for SequenceGenerator {
    fn default() -> SequenceGenerator {
        SequenceGenerator::new()
    }
}
