//! Catena Graph CLI
//!
//! Evaluate, size and benchmark the memory-hard graph variants.
//!
//! # Commands
//!
//! - `hash` - Evaluate a variant on an input and print the hex digest
//! - `variants` - List the registered graph variants
//! - `memory` - Print the buffer size a variant needs at a given garlic
//! - `benchmark` - Run concurrent evaluations and report throughput

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use catena_graph::algorithm::{digest_input, Blake3Fast, Graph, GraphHasher, Registry};
use catena_graph::benchmark::{self, BenchConfig};

#[derive(Parser)]
#[command(name = "catena-graph")]
#[command(version)]
#[command(about = "Memory-hard graph evaluation for Catena-style password scramblers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a graph variant and print the digest
    #[command(group(ArgGroup::new("source").required(true).args(["input", "message"])))]
    Hash {
        /// Variant short code or full name
        #[arg(long, default_value = "GR3-Phi")]
        variant: String,

        /// Time cost (default: variant default)
        #[arg(long)]
        lambda: Option<u8>,

        /// Memory cost exponent (default: variant default)
        #[arg(long)]
        garlic: Option<u8>,

        /// 64-byte input as hex
        #[arg(long)]
        input: Option<String>,

        /// Text message, hashed with SHA-512 to form the input
        #[arg(long)]
        message: Option<String>,

        /// Salt as hex
        #[arg(long, default_value = "")]
        salt: String,
    },

    /// List the available graph variants
    Variants {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the memory requirement for a garlic
    Memory {
        #[arg(long, default_value = "GR3-Phi")]
        variant: String,

        #[arg(long)]
        garlic: u8,

        /// Fast-hash block length in bytes
        #[arg(long, default_value_t = catena_graph::algorithm::DEFAULT_FAST_BLOCK_LEN)]
        block_len: usize,
    },

    /// Run performance benchmark
    Benchmark {
        #[arg(long, default_value = "GR3-Phi")]
        variant: String,

        /// Number of hashes to compute
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        #[arg(long)]
        lambda: Option<u8>,

        /// Memory cost exponent (default: 14)
        #[arg(long, default_value = "14")]
        garlic: u8,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct VariantRow {
    short_code: &'static str,
    name: &'static str,
    description: &'static str,
    default_lambda: u8,
    default_garlic: u8,
    min_garlic: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Hash {
            variant,
            lambda,
            garlic,
            input,
            message,
            salt,
        } => cmd_hash(&variant, lambda, garlic, input, message, &salt),
        Commands::Variants { json } => cmd_variants(json),
        Commands::Memory {
            variant,
            garlic,
            block_len,
        } => cmd_memory(&variant, garlic, block_len),
        Commands::Benchmark {
            variant,
            count,
            threads,
            lambda,
            garlic,
            json,
        } => cmd_benchmark(&variant, count, threads, lambda, garlic, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn lookup(variant: &str) -> anyhow::Result<Graph> {
    Registry::with_defaults()
        .create(variant)
        .context("Run 'catena-graph variants' to list known graphs")
}

fn cmd_hash(
    variant: &str,
    lambda: Option<u8>,
    garlic: Option<u8>,
    input: Option<String>,
    message: Option<String>,
    salt: &str,
) -> anyhow::Result<()> {
    let graph = lookup(variant)?;
    let lambda = lambda.unwrap_or(graph.default_lambda());
    let garlic = garlic.unwrap_or(graph.default_garlic());

    let x = match (input, message) {
        (Some(hex_input), _) => hex::decode(hex_input.trim()).context("Invalid hex input")?,
        (None, Some(text)) => digest_input(text.as_bytes()).to_vec(),
        (None, None) => anyhow::bail!("Either --input or --message is required"),
    };
    let salt = hex::decode(salt.trim()).context("Invalid hex salt")?;

    let digest = GraphHasher::new(graph)
        .hash(&x, lambda, garlic, &salt)
        .with_context(|| format!("{} failed (lambda {}, garlic {})", graph, lambda, garlic))?;

    println!("{}", hex::encode(digest));
    Ok(())
}

fn cmd_variants(json: bool) -> anyhow::Result<()> {
    let rows: Vec<VariantRow> = Registry::with_defaults()
        .iter()
        .map(|graph| VariantRow {
            short_code: graph.short_code(),
            name: graph.name(),
            description: graph.description(),
            default_lambda: graph.default_lambda(),
            default_garlic: graph.default_garlic(),
            min_garlic: graph.min_garlic(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        println!("{:<8} {}", row.short_code, row.name);
        println!("         {}", row.description);
        println!(
            "         lambda {}, garlic {} (min {})",
            row.default_lambda, row.default_garlic, row.min_garlic
        );
    }
    Ok(())
}

fn cmd_memory(variant: &str, garlic: u8, block_len: usize) -> anyhow::Result<()> {
    let graph = lookup(variant)?;
    let fast = Blake3Fast::new(block_len)?;
    let bytes = graph.memory_requirement(garlic, &fast)?;

    println!("{} at garlic {}: {} bytes ({} KB)", graph, garlic, bytes, bytes / 1024);
    Ok(())
}

fn cmd_benchmark(
    variant: &str,
    count: u32,
    threads: Option<usize>,
    lambda: Option<u8>,
    garlic: u8,
    json: bool,
) -> anyhow::Result<()> {
    let graph = lookup(variant)?;
    let config = BenchConfig {
        graph,
        count,
        threads: threads.unwrap_or_else(num_cpus::get),
        lambda: lambda.unwrap_or(graph.default_lambda()),
        garlic,
    };

    if !json {
        println!(
            "Running benchmark with {} hashes on {} threads...",
            config.count, config.threads
        );
    }

    let report = benchmark::run(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\nResults:");
    println!("  Total hashes: {}", report.total_hashes);
    println!("  Time elapsed: {:.2}s", report.elapsed_secs);
    println!("  Hashrate: {:.2} H/s", report.hashrate);

    println!("\nGraph parameters:");
    println!("  Variant: {}", report.variant);
    println!("  Lambda: {}", report.lambda);
    println!("  Garlic: {}", report.garlic);
    println!("  Memory per thread: {} KB", report.memory_per_thread / 1024);

    Ok(())
}
