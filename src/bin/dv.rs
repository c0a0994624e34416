use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;

use dv_map::calculator::{BodyEstimate, DeltaVCalculator};
use dv_map::{export, load_registry, logging, time, units};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Delta-v map estimates from the home body"
)]
struct Cli {
    /// Dataset file (YAML, or TOML by extension); defaults to the stock Kerbol system
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delta-v to a single body (case-insensitive)
    To {
        body: String,

        /// Print the departure, transit and target legs
        #[arg(long, default_value_t = false)]
        breakdown: bool,

        /// Report km/s instead of m/s
        #[arg(long, default_value_t = false)]
        km_s: bool,
    },
    /// Delta-v to every body, cheapest first
    Table {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Output path (`-` for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
    /// Bodies reachable within a delta-v budget in m/s
    Reachable { budget: f64 },
    /// Format mission-elapsed seconds on the Kerbin calendar
    Clock { seconds: f64 },
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Text,
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Clock { seconds } = cli.command {
        println!("{}", time::format_elapsed(seconds));
        return Ok(());
    }

    let registry = load_registry(cli.dataset.as_deref()).with_context(|| match &cli.dataset {
        Some(path) => format!("loading dataset {}", path.display()),
        None => "loading embedded dataset".to_string(),
    })?;
    info!(
        "home '{}', {} other bodies",
        registry.home().name(),
        registry.len()
    );
    let calc = DeltaVCalculator::new(&registry);

    match cli.command {
        Command::To {
            body,
            breakdown,
            km_s,
        } => {
            let name = body.trim().to_lowercase();
            let legs = calc.breakdown(&name)?;
            let show = |v: f64| {
                if km_s {
                    format!("{:.3} km/s", units::ms_to_kms(v))
                } else {
                    format!("{:.0} m/s", v)
                }
            };
            println!("{name}: Δv = {}", show(legs.total()));
            if breakdown {
                println!("  departure : {}", show(legs.departure_m_s));
                println!("  transit   : {}", show(legs.transit_m_s));
                println!("  target    : {}", show(legs.target_m_s));
            }
        }
        Command::Table { format, output } => {
            let rows = calc.table()?;
            let mut writer = export::writer_for_path(&output)
                .with_context(|| format!("opening {}", output.display()))?;
            match format {
                Format::Text => print_rows(&mut *writer, &rows)?,
                Format::Csv => export::csv::write_table(&mut *writer, &rows)?,
                Format::Json => {
                    export::json::write_table(&mut *writer, registry.home().name(), &rows)?
                }
            }
        }
        Command::Reachable { budget } => {
            let rows = calc.reachable_within(budget)?;
            if rows.is_empty() {
                println!("No body reachable within {budget:.0} m/s");
            } else {
                print_rows(&mut std::io::stdout().lock(), &rows)?;
            }
        }
        Command::Clock { .. } => {}
    }

    Ok(())
}

fn print_rows(writer: &mut dyn std::io::Write, rows: &[BodyEstimate<'_>]) -> std::io::Result<()> {
    for row in rows {
        writeln!(
            writer,
            "{:<10} {:<12} {:<8} {:>8.0} m/s",
            row.name,
            row.category.label(),
            row.parent().unwrap_or("-"),
            row.delta_v_m_s()
        )?;
    }
    writer.flush()
}
