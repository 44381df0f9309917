use crate::config::{validate_config, SimulationConfig};
use crate::discrete_system::sequence::SequenceGenerator;
use crate::discrete_system::DiscreteSystem;
use crate::store::customer::Customer;
use crate::store::Store;
use failure::Error;

pub mod config;
pub mod discrete_system;
pub mod input;
pub mod store;

pub type Simulation = DiscreteSystem<Store>;

/// Validates the configuration, builds the store and schedules one customer
/// per arrival, numbered in arrival order.
pub fn bootstrap_simulation(config: SimulationConfig) -> Result<Simulation, Error> {
    validate_config(&config)?;

    let mut system = DiscreteSystem::new(Store::new(&config.store), config.duration);
    let mut sequence = SequenceGenerator::new();

    for arrival in config.arrivals.iter() {
        system.schedule(
            arrival.time,
            Customer::new(sequence.next(), arrival.time, arrival.items),
        );
    }

    Ok(system)
}
