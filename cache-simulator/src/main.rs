use cache_simulator::generator::{self, TraceConfig, TraceGenerator};
use cache_simulator::input::TraceReader;
use cache_simulator::models::{AccessPattern, SimulationConfig};
use cache_simulator::runner::SimulationRunner;
use cache_simulator::stats::SimulationStats;
use clap::{Parser, Subcommand};
use policy_cache::config::DEFAULT_CAPACITY;
use policy_cache::{CacheConfig, PolicyKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cache replacement policy simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an address trace through the selected policies
    Simulate {
        /// Cache capacity (number of entries); negative values are rejected
        #[arg(short, long, default_value_t = DEFAULT_CAPACITY as i64, allow_negative_numbers = true)]
        capacity: i64,

        /// Policies to simulate (cyclic, lru, mru, lfu). All when omitted
        #[arg(short, long, value_name = "POLICIES", num_args = 1.., value_delimiter = ',')]
        policies: Option<Vec<PolicyKind>>,

        /// Directory of trace files to replay instead of a generated trace
        #[arg(short, long, value_name = "DIR", conflicts_with = "pattern")]
        input_dir: Option<PathBuf>,

        /// Shape of the generated trace
        #[arg(long, value_enum, default_value_t = AccessPattern::Hotset)]
        pattern: AccessPattern,

        /// Number of generated requests
        #[arg(long, default_value_t = 10_000)]
        requests: usize,

        /// Words in the simulated memory. Defaults to 64 for generated traces
        /// and to the largest address + 1 for trace files
        #[arg(long)]
        addresses: Option<usize>,

        /// Seed for the trace generator
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Write a generated address trace to a file
    Generate {
        /// Shape of the trace
        #[arg(long, value_enum, default_value_t = AccessPattern::Hotset)]
        pattern: AccessPattern,

        /// Number of requests
        #[arg(long, default_value_t = 10_000)]
        requests: usize,

        /// Addresses are drawn from 0..addresses
        #[arg(long, default_value_t = 64)]
        addresses: usize,

        /// Seed for the generator
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file
        #[arg(short, long, default_value = "generated.trace")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Generate {
            pattern,
            requests,
            addresses,
            seed,
            output,
        } => {
            let config = TraceConfig {
                pattern,
                requests,
                addresses,
                seed,
            };
            let trace = TraceGenerator::new(config.clone()).generate();
            generator::write_trace(&output, &config, &trace)?;
            tracing::info!(path = %output.display(), requests = trace.len(), "wrote trace");
            Ok(())
        }

        Commands::Simulate {
            capacity,
            policies,
            input_dir,
            pattern,
            requests,
            addresses,
            seed,
            output_csv,
        } => {
            let capacity = CacheConfig::try_from(capacity)?.capacity;
            let policies = match policies {
                Some(selected) if !selected.is_empty() => selected,
                _ => PolicyKind::all().to_vec(),
            };

            let (trace, addresses) = match input_dir {
                Some(dir) => {
                    let trace = TraceReader::new(&dir).read_all()?;
                    if trace.is_empty() {
                        tracing::warn!(dir = %dir.display(), "no addresses found in trace files");
                    }
                    let needed = trace.iter().max().map_or(0, |max| max + 1);
                    (trace, addresses.unwrap_or(needed))
                }
                None => {
                    let addresses = addresses.unwrap_or(64);
                    let config = TraceConfig {
                        pattern,
                        requests,
                        addresses,
                        seed,
                    };
                    (TraceGenerator::new(config).generate(), addresses)
                }
            };

            println!("Cache Simulation");
            println!("================");
            println!("Cache capacity: {capacity} entries");
            println!("Memory: {addresses} words");
            println!(
                "Policies: {:?}",
                policies.iter().map(|p| p.name()).collect::<Vec<_>>()
            );

            let runner = SimulationRunner::new(SimulationConfig {
                capacity,
                policies,
                addresses,
            });
            let result = runner.run(&trace)?;
            println!("\nSimulation completed in {:.2?}", result.duration);

            let stats = SimulationStats::from_result(&result);
            stats.print_summary();

            if let Some(csv_path) = output_csv {
                match stats.export_csv(&csv_path) {
                    Ok(()) => println!("\nResults exported to: {}", csv_path.display()),
                    Err(e) => eprintln!("Failed to export CSV: {e}"),
                }
            }
            Ok(())
        }
    }
}
