use crate::discrete_system::Time;

/// Something the discrete system can drive tick by tick.
///
/// Within one tick every input due at that tick is admitted first, then the
/// component is advanced once.
pub trait Component {
    type Input;
    type Message;

    fn admit(&mut self, now: Time, input: Self::Input) -> Vec<Self::Message>;
    fn advance(&mut self, now: Time) -> Vec<Self::Message>;
    /// Flushes whatever is still in progress without time passing. Calling it
    /// again must not change anything.
    fn finish(&mut self, now: Time) -> Vec<Self::Message>;
}
