use crate::config::{ArrivalConfig, QueueMode, SimulationConfig, StoreConfig};
use crate::discrete_system::Time;
use failure::{Error, Fail};
use std::fs::{self, File};
use std::path::Path;

#[derive(Debug, Fail)]
#[fail(display = "invalid simulation data on line {}: {}", line, error)]
pub struct InputError {
    line: usize,
    error: String,
}

/// Reads the run description from `path`. JSON files carry the whole
/// configuration, everything else is treated as a scenario data file.
pub fn load_config<P: AsRef<Path>>(
    path: P,
    queue_mode: QueueMode,
) -> Result<SimulationConfig, Error> {
    let path = path.as_ref();

    if path.extension().map_or(false, |ext| ext == "json") {
        let file = File::open(path)?;

        let config = serde_json::from_reader(file)?;

        return Ok(config);
    }

    let text = fs::read_to_string(path)?;

    parse_scenario(&text, queue_mode)
}

/// Scenario data file:
///
/// ```text
/// Saturday rush
/// 10 3
/// 0 12
/// 4 3
/// ```
///
/// The first line names the run, then come the length of the run in minutes,
/// the number of counters and `(tick, items)` pairs, all separated by
/// whitespace.
pub fn parse_scenario(text: &str, queue_mode: QueueMode) -> Result<SimulationConfig, Error> {
    let last_line = text.lines().count();
    let mut lines = text.lines();

    let name = lines.next().map(str::trim).unwrap_or_default().to_string();

    let mut tokens = lines.enumerate().flat_map(|(index, line)| {
        line.split_whitespace()
            .map(move |token| (index + 2, token))
    });

    let minutes = next_number(
        &mut tokens,
        last_line,
        "length of the simulation in minutes",
    )?;
    let counters = next_number(&mut tokens, last_line, "number of counters")?;

    let mut arrivals = Vec::new();

    while let Some((line, token)) = tokens.next() {
        let time = parse_number(line, token, "arrival time")?;
        let items = next_number(&mut tokens, last_line, "number of items")?;

        arrivals.push(ArrivalConfig { time, items });
    }

    Ok(SimulationConfig {
        name,
        duration: minutes.checked_mul(60).ok_or_else(|| InputError {
            line: 2,
            error: format!("{} minutes is too long a simulation", minutes),
        })?,
        store: StoreConfig {
            counters: counters as usize,
            queue_mode,
            ..StoreConfig::default()
        },
        arrivals,
    })
}

fn next_number<'a, I>(tokens: &mut I, last_line: usize, what: &str) -> Result<Time, Error>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    match tokens.next() {
        Some((line, token)) => parse_number(line, token, what),
        None => Err(InputError {
            line: last_line,
            error: format!("missing {} at the end of the file", what),
        }
        .into()),
    }
}

fn parse_number(line: usize, token: &str, what: &str) -> Result<Time, Error> {
    token.parse::<Time>().map_err(|_| {
        InputError {
            line,
            error: format!("expected {} but found \"{}\"", what, token),
        }
        .into()
    })
}
