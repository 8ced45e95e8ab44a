//! momentum-nn command line driver.
//!
//! Run with:
//!   cargo run --release -- generate-xor --count 2000 --out xor.dat
//!   cargo run --release -- train xor.dat --save xor.json
//!   cargo run --release -- predict xor.json 1 0

use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use momentum_nn::data::{random_xor, write_samples};
use momentum_nn::format::format_labeled;
use momentum_nn::train::PassStats;
use momentum_nn::{train_from_source, NetConfig, Network, SampleSource, TextSampleSource, TrainConfig};

#[derive(Parser)]
#[command(name = "momentum-nn")]
#[command(about = "Train a tanh feed-forward network with back-propagation and momentum", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Default log filter; RUST_LOG overrides it
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network on a training-data file
    Train {
        /// File starting with a `Topology:` line followed by `i:` / `o:` pairs
        file: String,

        /// JSON file with eta, alpha and smoothing_factor
        #[arg(short, long)]
        config: Option<String>,

        /// Seed for the initial weights (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the trained network to this JSON file
        #[arg(long)]
        save: Option<String>,

        /// Stop after this many trained samples
        #[arg(long)]
        max_passes: Option<usize>,

        /// Log the recent average error every N samples
        #[arg(long, default_value = "1000")]
        report_every: usize,

        /// Do not print a line per trained sample
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write random XOR training samples
    GenerateXor {
        /// Number of samples
        #[arg(short = 'n', long, default_value = "2000")]
        count: usize,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Run a saved network on one input vector
    Predict {
        /// Network written by `train --save`
        model: String,

        #[arg(allow_hyphen_values = true, required = true)]
        inputs: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Commands::Train { file, config, seed, save, max_passes, report_every, quiet } => {
            train(&file, config.as_deref(), seed, save.as_deref(), max_passes, report_every, quiet)
        }
        Commands::GenerateXor { count, seed, out } => generate_xor(count, seed, out.as_deref()),
        Commands::Predict { model, inputs } => predict(&model, &inputs),
    }
}

fn train(
    file: &str,
    config_path: Option<&str>,
    seed: Option<u64>,
    save: Option<&str>,
    max_passes: Option<usize>,
    report_every: usize,
    quiet: bool,
) -> Result<()> {
    let mut source = TextSampleSource::open(file).with_context(|| format!("cannot open {file}"))?;
    let topology = source.read_topology()?;

    let net_config = match config_path {
        Some(path) => NetConfig::load_json(path).with_context(|| format!("cannot load config {path}"))?,
        None => NetConfig::default(),
    };
    let mut network = match seed {
        Some(seed) => Network::seeded(&topology, net_config, seed)?,
        None => Network::random(&topology, net_config)?,
    };
    info!("training {:?} from {} with {:?}", topology, file, net_config);

    let mut train_config = TrainConfig::new(report_every);
    train_config.max_passes = max_passes;

    // Per-sample lines are printed from a separate thread fed by the
    // progress channel.
    let printer = if quiet {
        None
    } else {
        let (tx, rx) = mpsc::channel::<PassStats>();
        train_config.progress_tx = Some(tx);
        Some(thread::spawn(move || {
            for stats in rx {
                print_pass(&stats);
            }
        }))
    };

    let summary = train_from_source(&mut network, &mut source, &train_config)?;
    drop(train_config);
    if let Some(handle) = printer {
        join_printer(handle)?;
    }

    println!();
    println!("Done training: {} passes, {} skipped.", summary.passes, summary.skipped);
    println!("Recent average error: {:.6}", summary.recent_avg_error);

    print_truth_table(&mut network)?;

    if let Some(path) = save {
        network.save_json(path).with_context(|| format!("cannot save network to {path}"))?;
        println!("Saved network to {path}");
    }
    Ok(())
}

fn join_printer(handle: JoinHandle<()>) -> Result<()> {
    handle.join().map_err(|_| anyhow!("progress printer panicked"))
}

fn print_pass(stats: &PassStats) {
    println!();
    println!("Pass #{}:", stats.pass);
    println!("{}", format_labeled("   Inputs:", &stats.inputs));
    println!("{}", format_labeled("  Outputs:", &stats.outputs));
    println!("{}", format_labeled("  Targets:", &stats.targets));
    println!("  Recent average error: {:.6}", stats.recent_avg_error);
}

/// Prints the output for every 0/1 input combination of small networks.
fn print_truth_table(network: &mut Network) -> Result<()> {
    let n_inputs = network.topology()[0];
    if n_inputs > 4 {
        return Ok(());
    }

    println!("\n-------------------------------------\n");
    for combo in 0..(1usize << n_inputs) {
        let inputs: Vec<f64> = (0..n_inputs)
            .map(|bit| if (combo >> (n_inputs - 1 - bit)) & 1 == 1 { 1.0 } else { 0.0 })
            .collect();
        network.forward(&inputs)?;
        println!("{}  ::  {}", format_labeled("IN:", &inputs), format_labeled("OUT:", &network.results()));
    }
    println!("\n-------------------------------------\n");
    Ok(())
}

fn generate_xor(count: usize, seed: Option<u64>, out: Option<&str>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let (inputs, targets) = random_xor(count, &mut rng);
    let topology = [2, 4, 1];

    match out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
            write_samples(BufWriter::new(file), &topology, &inputs, &targets)?;
            info!("wrote {count} XOR samples to {path}");
        }
        None => write_samples(io::stdout().lock(), &topology, &inputs, &targets)?,
    }
    Ok(())
}

fn predict(model: &str, inputs: &[f64]) -> Result<()> {
    let mut network = Network::load_json(model).with_context(|| format!("cannot load network {model}"))?;
    network.forward(inputs)?;
    println!("{}  ::  {}", format_labeled("IN:", inputs), format_labeled("OUT:", &network.results()));
    Ok(())
}
