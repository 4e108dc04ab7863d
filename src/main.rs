mod bench;
mod config;
mod ext;
mod format;
mod run;
mod stats;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use self::{
  bench::Bench,
  config::{Config, LanguageSpec},
};

/// Times interpreters of several languages on equivalent benchmark programs.
#[derive(Parser, Debug)]
struct Args {
  /// Language to measure, as NAME,COMMAND,EXTENSION. Repeat to measure several;
  /// replaces the built-in hobby/lua/python set.
  #[arg(short, long = "language")]
  languages: Vec<LanguageSpec>,
  /// Benchmark base file name. Repeat to run several; replaces the default `fib`.
  #[arg(short, long = "benchmark")]
  benchmarks: Vec<String>,
  /// Timed invocations per language and benchmark.
  #[arg(short, long)]
  repetitions: Option<usize>,
  /// Directory holding `<benchmark><extension>` source files.
  #[arg(long)]
  benchmark_dir: Option<PathBuf>,
  /// Abort the run if a single invocation takes longer than this many seconds.
  #[arg(long, value_parser = config::parse_timeout)]
  timeout: Option<Duration>,
  /// Discard interpreter output.
  #[arg(short, long)]
  quiet: bool,
}

impl Args {
  fn into_config(self) -> Config {
    let mut config = Config::default();

    if !self.languages.is_empty() {
      config.languages = self.languages;
    }
    if !self.benchmarks.is_empty() {
      config.benchmarks = self.benchmarks;
    }
    if let Some(repetitions) = self.repetitions {
      config.repetitions = repetitions;
    }
    if let Some(benchmark_dir) = self.benchmark_dir {
      config.benchmark_dir = benchmark_dir;
    }
    config.timeout = self.timeout;
    config.quiet = self.quiet;

    config
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let config = Args::parse().into_config();
  let bench = Bench::new(&config).context("Bench::new")?;

  for benchmark in &config.benchmarks {
    let results = bench.run_benchmark(benchmark).with_context(|| format!("benchmark {benchmark}"))?;

    print!("{}", format::format_results(&results).context("format")?);
  }

  Ok(())
}
