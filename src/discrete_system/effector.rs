/// Collects the messages a component emits while handling one operation.
pub struct Effector<M> {
    pub events: Vec<M>,
}

impl<M> Effector<M> {
    pub fn new() -> Effector<M> {
        Effector { events: Vec::new() }
    }

    pub fn emit(&mut self, message: M) {
        self.events.push(message);
    }

    pub fn into_events(self) -> Vec<M> {
        self.events
    }
}

impl<M> Default for Effector<M> {
    fn default() -> Effector<M> {
        Effector::new()
    }
}
