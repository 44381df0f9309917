use checkout_sim::config::QueueMode;
use checkout_sim::discrete_system::Event;
use checkout_sim::input::load_config;
use checkout_sim::store::{self, stats::StoreStats};
use checkout_sim::{bootstrap_simulation, Simulation};
use colored::Colorize;
use failure::Error;
use std::env;
use std::io::{self, BufRead, Write};
use std::process;

#[derive(Default)]
struct Options {
    path: Option<String>,
    queue_mode: Option<QueueMode>,
    console: bool,
    json: bool,
}

fn parse_args<I: Iterator<Item = String>>(args: I) -> Options {
    let mut options = Options::default();

    for arg in args {
        match arg.as_str() {
            "-console" | "--console" => options.console = true,
            "-json" | "--json" => options.json = true,
            _ if options.path.is_none() => options.path = Some(arg),
            _ if options.queue_mode.is_none() => {
                options.queue_mode = Some(QueueMode::from_word(&arg))
            }
            _ => eprintln!("Ignoring extra argument \"{}\"", arg),
        }
    }

    options
}

fn prompt(question: &str) -> Result<String, Error> {
    println!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(answer.trim().to_string())
}

fn print_event(event: &Event<store::Event>) {
    print!("In {} - ", event.time);

    match event.message {
        store::Event::CustomerArrived { customer, line } => {
            print!("Customer(#{}) joined Line({})", customer, line)
        }
        store::Event::ServiceStarted {
            customer,
            counter,
            line,
            waited,
        } => print!(
            "Counter({}) took Customer(#{}) from Line({}) after {}s",
            counter, customer, line, waited
        ),
        store::Event::ServiceFinished {
            customer,
            counter,
            service_time,
            time_in_store,
        } => print!(
            "Counter({}) checked out Customer(#{}) in {}s, {}s in the store",
            counter, customer, service_time, time_in_store
        ),
        store::Event::LineDrained { line, customers } => {
            print!("Line({}) closed with {} customer(s) waiting", line, customers)
        }
    }

    println!();
}

fn print_stats(name: &str, stats: &StoreStats) {
    println!();
    println!("{} {}", "Stats for the simulation:".bold(), name);
    println!(
        "Simulation type: {}",
        match stats.queue_mode {
            QueueMode::Shared => "Single line",
            QueueMode::PerCounter => "Multiple lines",
        }
    );
    println!("{}", "-".repeat(56));

    for line in stats.lines.iter() {
        println!("{}", format!("Line {}", line.number).cyan().bold());
        println!("\tCustomers in line at end of simulation: {}", line.waiting);
        println!("\tCustomers never served: {}", line.customers_unserved);
        println!("\tMax line length: {}", line.max_length);
        println!("\tTotal time spent waiting: {}", line.total_wait);
        println!("\tAverage wait time per customer: {:.2}", line.average_wait);
        println!("\tMax wait time for any customer: {}", line.max_wait);
    }

    for counter in stats.counters.iter() {
        println!(
            "{}",
            format!("Counter {} (Line {})", counter.number, counter.line)
                .green()
                .bold()
        );
        println!("\tTotal customers checked out: {}", counter.customers_finished);
        println!("\tTotal time spent checking out: {}", counter.time_serving);
        println!(
            "\tIdle time: {} ({:.2}%)",
            counter.idle_ticks,
            counter.idle_percent(stats.elapsed)
        );
        println!("\tHas customer: {}", counter.has_customer);
    }

    println!("{}", "Overall stats".yellow().bold());
    println!("\tTotal customers checked out: {}", stats.total_customers_served);
    println!("\tAverage wait time per customer: {:.2}", stats.average_wait_time);
    println!("\tAverage check out time per customer: {:.2}", stats.average_service_time);
    println!("\tMax line length: {}", stats.max_line_length);
}

fn run_simulation(system: &mut Simulation, console: bool) {
    while system.has_ticks_left() {
        let events = system.tick();

        if console {
            events.iter().for_each(print_event);
        }
    }

    let events = system.finish();

    if console {
        events.iter().for_each(print_event);
    }
}

fn run(options: Options) -> Result<(), Error> {
    let path = match options.path {
        Some(path) => path,
        None => prompt("What is the file with the simulation data?")?,
    };

    let queue_mode = match options.queue_mode {
        Some(queue_mode) => queue_mode,
        None if path.ends_with(".json") => QueueMode::default(),
        None => QueueMode::from_word(&prompt(
            "What is the simulation type (single or multiple)?",
        )?),
    };

    let config = load_config(&path, queue_mode)?;
    let name = config.name.clone();

    let mut system = bootstrap_simulation(config)?;

    run_simulation(&mut system, options.console);

    let stats = system.component.stats();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&name, &stats);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = parse_args(env::args().skip(1));

    if let Err(error) = run(options) {
        eprintln!("{} {}", "error:".red().bold(), error);
        process::exit(1);
    }
}
