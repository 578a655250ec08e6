use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stormlens::cli::{Cli, Command, Domain, OutputFormat};
use stormlens::query::{DateRange, EventQueries, HailQueries, TornadoQueries, WindQueries};
use stormlens::storage::{CsvReader, Record, StormStore, TableStore};

/// What a query hands back, ready for printing.
enum Output {
    Count(usize),
    Percent(f64),
    Breakdown(Vec<(String, usize)>),
    Records(Vec<Record>),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "stormlens=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    let mut store = load_store(&cli)?;
    let output = run_command(&store, &cli.command)?;
    store.close();

    match cli.format {
        OutputFormat::Table => print_table(&output),
        OutputFormat::Json => print_json(&output)?,
    }

    Ok(())
}

fn load_store(cli: &Cli) -> Result<TableStore, Box<dyn std::error::Error>> {
    if !cli.delimiter.is_ascii() {
        return Err(format!("Delimiter must be a single ASCII character: {}", cli.delimiter).into());
    }
    let mut store = TableStore::with_reader(CsvReader::new().with_delimiter(cli.delimiter as u8));

    let sources: [(Domain, Option<&Path>); 3] = [
        (Domain::Wind, cli.wind.as_deref()),
        (Domain::Tornado, cli.tornado.as_deref()),
        (Domain::Hail, cli.hail.as_deref()),
    ];
    for (domain, path) in sources {
        if let Some(path) = path {
            store.load(path, domain.table_name())?;
        }
    }

    Ok(store)
}

fn run_command(store: &TableStore, command: &Command) -> Result<Output, Box<dyn std::error::Error>> {
    let wind = WindQueries::new(store);
    let tornado = TornadoQueries::new(store);
    let hail = HailQueries::new(store);

    let domain = |d: Domain| -> &dyn EventQueries {
        match d {
            Domain::Wind => &wind,
            Domain::Tornado => &tornado,
            Domain::Hail => &hail,
        }
    };

    let output = match command {
        Command::WindGusts { min_knots, start, end } => {
            Output::Count(wind.count_wind_gusts(*min_knots, &DateRange::parse(start, end)?))
        }
        Command::WindPercentile { gust_knots } => {
            Output::Percent(wind.get_percentile_rank(*gust_knots))
        }
        Command::HailSize { min_inches, start, end } => {
            Output::Count(hail.count_hail_above_size(*min_inches, &DateRange::parse(start, end)?))
        }
        Command::TornadoExact { scale, start, end } => Output::Count(
            tornado.count_ef_tornadoes_exact(scale, &DateRange::parse(start, end)?),
        ),
        Command::TornadoAtLeast { scale, start, end } => Output::Count(
            tornado.count_ef_tornadoes_at_least(scale, &DateRange::parse(start, end)?),
        ),
        Command::TornadoLength { limit } => Output::Records(tornado.top_tornado_length(*limit)),
        Command::Monthly { domain: d } => Output::Breakdown(domain(*d).monthly_breakdown()),
        Command::Yearly { domain: d } => Output::Breakdown(domain(*d).yearly_breakdown()),
        Command::TopDamage { domain: d, start, end, limit } => {
            let range = match (start, end) {
                (Some(start), Some(end)) => Some(DateRange::parse(start, end)?),
                _ => None,
            };
            Output::Records(domain(*d).top_property_damage(range.as_ref(), *limit))
        }
        Command::TimeRange { domain: d, start_time, end_time } => {
            Output::Percent(domain(*d).percent_of_events_in_time_range(start_time, end_time))
        }
    };

    Ok(output)
}

fn print_table(output: &Output) {
    match output {
        Output::Count(n) => println!("{}", n),
        Output::Percent(p) => println!("{:.2}%", p),
        Output::Breakdown(pairs) => {
            if pairs.is_empty() {
                println!("(0 rows)");
                return;
            }
            let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, count) in pairs {
                println!("{:width$} | {}", label, count, width = width);
            }
            println!("({} rows)", pairs.len());
        }
        Output::Records(records) => print_records(records),
    }
}

fn print_records(records: &[Record]) {
    let Some(first) = records.first() else {
        println!("(0 rows)");
        return;
    };

    // Column widths
    let widths: Vec<usize> = first
        .fields
        .iter()
        .enumerate()
        .map(|(i, (name, _))| {
            let max_value_width = records
                .iter()
                .map(|r| r.fields.get(i).map(|(_, v)| v.to_string().len()).unwrap_or(0))
                .max()
                .unwrap_or(0);
            name.len().max(max_value_width)
        })
        .collect();

    let header: Vec<String> = first
        .fields
        .iter()
        .enumerate()
        .map(|(i, (name, _))| format!("{:width$}", name, width = widths[i]))
        .collect();
    println!("{}", header.join(" | "));

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("-+-"));

    for record in records {
        let values: Vec<String> = record
            .fields
            .iter()
            .enumerate()
            .map(|(i, (_, v))| format!("{:width$}", v.to_string(), width = widths[i]))
            .collect();
        println!("{}", values.join(" | "));
    }

    println!("({} rows)", records.len());
}

fn print_json(output: &Output) -> Result<(), serde_json::Error> {
    let json = match output {
        Output::Count(n) => serde_json::to_string(n)?,
        Output::Percent(p) => serde_json::to_string(p)?,
        Output::Breakdown(pairs) => serde_json::to_string(pairs)?,
        Output::Records(records) => serde_json::to_string(records)?,
    };
    println!("{}", json);
    Ok(())
}
