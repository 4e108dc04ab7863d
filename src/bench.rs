use anyhow::{Context, Result};

use crate::{
  config::{Config, LanguageSpec},
  format,
  run::{self, RunOptions},
  stats::{BenchmarkResults, Timings},
};

/// Runs every configured benchmark under every configured language, one
/// interpreter invocation at a time.
pub struct Bench<'a> {
  config: &'a Config,
}

impl<'a> Bench<'a> {
  pub fn new(config: &'a Config) -> Result<Self> {
    config.validate().context("config")?;

    Ok(Self { config })
  }

  /// Measures all languages on `benchmark` and returns their averages. Any
  /// failed invocation aborts the whole benchmark, so no partial results are
  /// returned.
  pub fn run_benchmark(&self, benchmark: &str) -> Result<BenchmarkResults> {
    let mut results = BenchmarkResults::new(benchmark);

    for language in &self.config.languages {
      let timings = self
        .run_script(language, benchmark)
        .with_context(|| format!("{} {benchmark}", language.name))?;

      let mean = timings.mean_secs().context("no runs measured")?;
      results.insert(&language.name, mean);
    }

    Ok(results)
  }

  /// Invokes `language` on its `benchmark` source exactly `repetitions` times.
  pub fn run_script(&self, language: &LanguageSpec, benchmark: &str) -> Result<Timings> {
    let source = language.source_path(&self.config.benchmark_dir, benchmark);

    println!("{}", format::format_language_header(&language.name));
    tracing::info!(language = %language.name, ?source, "running benchmark");

    if !source.is_file() {
      anyhow::bail!("benchmark source {source:?} does not exist");
    }

    let mut timings = Timings::default();

    for repetition in 0..self.config.repetitions {
      let elapsed = run::measure(&language.command, &source, self.run_options())
        .with_context(|| format!("repetition {repetition}"))?;

      tracing::debug!(language = %language.name, repetition, ?elapsed, "measured");
      timings.push(elapsed);
    }

    Ok(timings)
  }

  fn run_options(&self) -> RunOptions {
    RunOptions {
      timeout: self.config.timeout,
      quiet: self.config.quiet,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{fs, path::Path};

  use tempfile::TempDir;

  use super::*;

  /// Appends the script's own path to `runs.log` beside it on every invocation.
  const COUNTING_SCRIPT: &str = "echo \"$0\" >> \"$(dirname \"$0\")/runs.log\"\n";

  fn config(dir: &Path, languages: Vec<LanguageSpec>, repetitions: usize) -> Config {
    Config {
      languages,
      benchmarks: vec!["count".to_string()],
      repetitions,
      benchmark_dir: dir.to_path_buf(),
      timeout: None,
      quiet: true,
    }
  }

  fn runs(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("runs.log"))
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  #[test]
  fn invokes_each_language_exactly_repetitions_times() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();
    fs::write(dir.path().join("count.posix"), COUNTING_SCRIPT).unwrap();

    let config = config(
      dir.path(),
      vec![
        LanguageSpec::new("sh", "sh", ".sh"),
        LanguageSpec::new("posix", "sh", ".posix"),
      ],
      10,
    );
    let bench = Bench::new(&config).unwrap();

    let results = bench.run_benchmark("count").unwrap();

    let runs = runs(dir.path());
    assert_eq!(runs.len(), 20);
    assert!(runs[..10].iter().all(|run| run.ends_with("count.sh")));
    assert!(runs[10..].iter().all(|run| run.ends_with("count.posix")));

    let names: Vec<_> = results.averages.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["sh", "posix"]);
    assert!(results.averages.iter().all(|(_, mean)| *mean > 0.0));
  }

  #[test]
  fn run_script_records_one_timing_per_repetition() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();

    let config = config(dir.path(), vec![LanguageSpec::new("sh", "sh", ".sh")], 3);
    let bench = Bench::new(&config).unwrap();

    let timings = bench.run_script(&config.languages[0], "count").unwrap();

    assert_eq!(timings.runs.len(), 3);
    assert_eq!(runs(dir.path()).len(), 3);
  }

  #[test]
  fn single_repetition_average_is_the_measurement() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();

    let config = config(dir.path(), vec![LanguageSpec::new("sh", "sh", ".sh")], 1);
    let bench = Bench::new(&config).unwrap();

    let timings = bench.run_script(&config.languages[0], "count").unwrap();

    assert_eq!(timings.mean_secs(), Some(timings.runs[0].as_secs_f64()));
  }

  #[test]
  fn missing_source_aborts_benchmark() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();

    let config = config(
      dir.path(),
      vec![
        LanguageSpec::new("sh", "sh", ".sh"),
        LanguageSpec::new("missing", "sh", ".missing"),
      ],
      2,
    );
    let bench = Bench::new(&config).unwrap();

    let err = bench.run_benchmark("count").unwrap_err();

    assert!(format!("{err:#}").contains("count.missing"));
    assert_eq!(runs(dir.path()).len(), 2);
  }

  #[test]
  fn missing_interpreter_aborts_benchmark() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();

    let config = config(
      dir.path(),
      vec![LanguageSpec::new("ghost", "lang-bench-no-such-interpreter", ".sh")],
      2,
    );
    let bench = Bench::new(&config).unwrap();

    assert!(bench.run_benchmark("count").is_err());
    assert!(runs(dir.path()).is_empty());
  }

  #[test]
  fn failing_interpreter_aborts_benchmark() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), "exit 2\n").unwrap();

    let config = config(dir.path(), vec![LanguageSpec::new("sh", "sh", ".sh")], 2);
    let bench = Bench::new(&config).unwrap();

    let err = bench.run_benchmark("count").unwrap_err();

    assert!(format!("{err:#}").contains("repetition 0"));
  }

  #[test]
  fn each_benchmark_starts_with_fresh_results() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("count.sh"), COUNTING_SCRIPT).unwrap();

    let config = config(dir.path(), vec![LanguageSpec::new("sh", "sh", ".sh")], 1);
    let bench = Bench::new(&config).unwrap();

    let first = bench.run_benchmark("count").unwrap();
    let second = bench.run_benchmark("count").unwrap();

    assert_eq!(first.averages.len(), 1);
    assert_eq!(second.averages.len(), 1);
  }

  #[test]
  fn rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), vec![LanguageSpec::new("sh", "sh", ".sh")], 0);

    assert!(Bench::new(&config).is_err());
  }
}
