use crate::discrete_system::Time;
use failure::{Error, Fail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueueMode {
    Shared,     // One line feeding every counter
    PerCounter, // A dedicated line in front of each counter
}

impl QueueMode {
    /// `single` selects the shared line, every other word means one line per counter.
    pub fn from_word(word: &str) -> QueueMode {
        if word.trim().eq_ignore_ascii_case("single") {
            QueueMode::Shared
        } else {
            QueueMode::PerCounter
        }
    }
}

impl Default for QueueMode {
    fn default() -> QueueMode {
        QueueMode::Shared
    }
}

/// When a counter that just finished a customer may take the next one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefillPolicy {
    NextTick,
    SameTick,
}

impl Default for RefillPolicy {
    fn default() -> RefillPolicy {
        RefillPolicy::NextTick
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimes {
    pub item_time: Time,    // Scanning one item
    pub payment_time: Time, // Paying, regardless of the basket
}

impl ServiceTimes {
    pub fn duration_for(&self, items: u32) -> Time {
        items
            .saturating_mul(self.item_time)
            .saturating_add(self.payment_time)
    }

    /// `None` when the basket takes longer than a `Time` can hold.
    pub fn checked_duration_for(&self, items: u32) -> Option<Time> {
        items
            .checked_mul(self.item_time)?
            .checked_add(self.payment_time)
    }
}

impl Default for ServiceTimes {
    fn default() -> ServiceTimes {
        ServiceTimes {
            item_time: 7,
            payment_time: 40,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    pub counters: usize,
    pub queue_mode: QueueMode,
    #[serde(default)]
    pub refill: RefillPolicy,
    #[serde(default)]
    pub service: ServiceTimes,
}

impl Default for StoreConfig {
    fn default() -> StoreConfig {
        StoreConfig {
            counters: 1,
            queue_mode: QueueMode::default(),
            refill: RefillPolicy::default(),
            service: ServiceTimes::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalConfig {
    pub time: Time,
    pub items: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SimulationConfig {
    pub name: String,
    pub duration: Time,
    pub store: StoreConfig,
    #[serde(default)]
    pub arrivals: Vec<ArrivalConfig>,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            name: String::from("Empty store"),
            duration: 60 * 60,
            store: StoreConfig::default(),
            arrivals: Vec::new(),
        }
    }
}

#[derive(Debug, Fail)]
#[fail(display = "validation failed because of \"{}\"", error)]
pub struct ValidationError {
    error: String,
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), Error> {
    if config.store.counters == 0 {
        return Err(ValidationError {
            error: format!("Simulation \"{}\" has no counters", config.name),
        }
        .into());
    }

    if config.duration == 0 {
        return Err(ValidationError {
            error: format!("Simulation \"{}\" has zero duration", config.name),
        }
        .into());
    }

    if config.store.service.payment_time == 0 {
        return Err(ValidationError {
            error: String::from("Payment time has to take at least one tick"),
        }
        .into());
    }

    for (index, arrival) in config.arrivals.iter().enumerate() {
        let latest_finish = config
            .store
            .service
            .checked_duration_for(arrival.items)
            .and_then(|duration| config.duration.checked_add(duration));

        if latest_finish.is_none() {
            return Err(ValidationError {
                error: format!(
                    "Arrival #{} at {} has {} items, checking them out takes too long",
                    index + 1,
                    arrival.time,
                    arrival.items
                ),
            }
            .into());
        }
    }

    for (index, pair) in config.arrivals.windows(2).enumerate() {
        if pair[1].time < pair[0].time {
            return Err(ValidationError {
                error: format!(
                    "Arrival #{} at {} comes before the previous arrival at {}",
                    index + 2,
                    pair[1].time,
                    pair[0].time
                ),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(arrivals: Vec<(Time, u32)>) -> SimulationConfig {
        SimulationConfig {
            arrivals: arrivals
                .into_iter()
                .map(|(time, items)| ArrivalConfig { time, items })
                .collect(),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn default_service_times_match_checkout_model() {
        let service = ServiceTimes::default();

        assert_eq!(service.duration_for(0), 40);
        assert_eq!(service.duration_for(1), 47);
        assert_eq!(service.duration_for(10), 110);
    }

    #[test]
    fn oversized_duration_saturates() {
        let service = ServiceTimes::default();

        assert_eq!(service.checked_duration_for(700_000_000), None);
        assert_eq!(service.duration_for(700_000_000), Time::MAX);
        assert_eq!(service.checked_duration_for(2), Some(54));
    }

    #[test]
    fn queue_mode_from_word() {
        assert_eq!(QueueMode::from_word("single"), QueueMode::Shared);
        assert_eq!(QueueMode::from_word("SINGLE\n"), QueueMode::Shared);
        assert_eq!(QueueMode::from_word("multiple"), QueueMode::PerCounter);
        assert_eq!(QueueMode::from_word("anything"), QueueMode::PerCounter);
    }

    #[test]
    fn valid_config_passes() {
        let config = config_with(vec![(0, 1), (0, 3), (5, 0)]);

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_counters_rejected() {
        let mut config = config_with(vec![]);
        config.store.counters = 0;

        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("no counters"));
    }

    #[test]
    fn zero_duration_rejected() {
        let mut config = config_with(vec![]);
        config.duration = 0;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn free_payment_rejected() {
        let mut config = config_with(vec![]);
        config.store.service.payment_time = 0;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn decreasing_arrivals_rejected() {
        let config = config_with(vec![(3, 1), (2, 1)]);

        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("Arrival #2"));
    }

    #[test]
    fn basket_too_large_to_check_out_rejected() {
        let config = config_with(vec![(0, 1), (0, 700_000_000)]);

        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("Arrival #2 at 0 has 700000000 items"));
    }

    #[test]
    fn basket_finishing_past_time_limit_rejected() {
        let mut config = config_with(vec![(0, 1)]);
        config.duration = Time::MAX - 10;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn json_config_uses_defaults_for_optional_fields() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{
                "name": "Saturday",
                "duration": 120,
                "store": { "counters": 3, "queue_mode": "per_counter" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.store.queue_mode, QueueMode::PerCounter);
        assert_eq!(config.store.refill, RefillPolicy::NextTick);
        assert_eq!(config.store.service, ServiceTimes::default());
        assert!(config.arrivals.is_empty());
    }
}
