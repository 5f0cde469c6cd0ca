//! Concurrent throughput measurement
//!
//! Every worker thread owns its own `GraphHasher`, so buffers and primitive
//! state are never shared between evaluations.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::algorithm::{digest_input, Graph, GraphError, GraphHasher};

#[derive(Error, Debug)]
pub enum BenchError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to draw random input: {0}")]
    Entropy(String),

    #[error("Benchmark thread panicked")]
    ThreadPanicked,

    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub graph: Graph,
    pub count: u32,
    pub threads: usize,
    pub lambda: u8,
    pub garlic: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub variant: &'static str,
    pub lambda: u8,
    pub garlic: u8,
    pub threads: usize,
    pub total_hashes: u64,
    pub elapsed_secs: f64,
    pub hashrate: f64,
    pub memory_per_thread: usize,
}

/// Split `count` evaluations across `threads` workers and time them
pub fn run(config: &BenchConfig) -> Result<BenchReport, BenchError> {
    if config.threads == 0 {
        return Err(BenchError::InvalidConfig("threads must be at least 1"));
    }

    // Surface parameter errors once, before spawning anything
    let mut sizing = GraphHasher::new(config.graph);
    sizing.hash(&[0u8; 64], config.lambda, config.garlic, &[])?;
    let memory_per_thread = sizing.allocated();
    drop(sizing);

    let mut seed = [0u8; 32];
    getrandom::getrandom(&mut seed).map_err(|e| BenchError::Entropy(e.to_string()))?;

    tracing::info!(
        variant = config.graph.short_code(),
        threads = config.threads,
        count = config.count,
        "starting benchmark"
    );

    let total_hashes = Arc::new(AtomicU64::new(0));
    let start = Instant::now();

    let mut handles = Vec::with_capacity(config.threads);
    for thread_id in 0..config.threads {
        let total_hashes = Arc::clone(&total_hashes);
        let config = config.clone();

        // Interleaved work: thread_id, thread_id + N, thread_id + 2N, ...
        let handle = std::thread::spawn(move || -> Result<(), GraphError> {
            let mut hasher = GraphHasher::new(config.graph);
            let count = u64::from(config.count);
            let stride = config.threads as u64;
            let mut i = thread_id as u64;
            while i < count {
                let mut message = seed.to_vec();
                message.extend_from_slice(&i.to_le_bytes());
                let x = digest_input(&message);

                hasher.hash(&x, config.lambda, config.garlic, &[])?;
                total_hashes.fetch_add(1, Ordering::Relaxed);
                i += stride;
            }
            Ok(())
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().map_err(|_| BenchError::ThreadPanicked)??;
    }

    let elapsed = start.elapsed().as_secs_f64();
    let total = total_hashes.load(Ordering::Relaxed);
    let hashrate = if elapsed > 0.0 {
        total as f64 / elapsed
    } else {
        0.0
    };

    Ok(BenchReport {
        variant: config.graph.short_code(),
        lambda: config.lambda,
        garlic: config.garlic,
        threads: config.threads,
        total_hashes: total,
        elapsed_secs: elapsed,
        hashrate,
        memory_per_thread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_counts_every_hash() {
        let config = BenchConfig {
            graph: Graph::Gr3Phi,
            count: 7,
            threads: 3,
            lambda: 1,
            garlic: 4,
        };
        let report = run(&config).unwrap();

        assert_eq!(report.total_hashes, 7);
        assert_eq!(report.variant, "GR3-Phi");
        assert_eq!(report.memory_per_thread, 2 * 16 * 64);
    }

    #[test]
    fn test_benchmark_more_threads_than_hashes() {
        let config = BenchConfig {
            graph: Graph::Brg,
            count: 2,
            threads: 5,
            lambda: 1,
            garlic: 3,
        };
        let report = run(&config).unwrap();
        assert_eq!(report.total_hashes, 2);
    }

    #[test]
    fn test_benchmark_rejects_bad_parameters() {
        let config = BenchConfig {
            graph: Graph::Gr3Phi,
            count: 1,
            threads: 1,
            lambda: 0,
            garlic: 4,
        };
        assert!(matches!(
            run(&config),
            Err(BenchError::Graph(GraphError::InvalidParameter(_)))
        ));

        let config = BenchConfig {
            threads: 0,
            lambda: 1,
            ..config
        };
        assert!(matches!(run(&config), Err(BenchError::InvalidConfig(_))));
    }

    #[test]
    fn test_report_serializes() {
        let report = BenchReport {
            variant: "BRG",
            lambda: 1,
            garlic: 4,
            threads: 1,
            total_hashes: 2,
            elapsed_secs: 0.5,
            hashrate: 4.0,
            memory_per_thread: 2048,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "BRG");
        assert_eq!(json["total_hashes"], 2);
    }
}
