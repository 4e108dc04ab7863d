use std::time::Duration;

/// Wall-clock durations of every repetition for one language and benchmark, in
/// the order they were measured.
#[derive(Debug, Default)]
pub struct Timings {
  pub runs: Vec<Duration>,
}

impl Timings {
  pub fn push(&mut self, run: Duration) {
    self.runs.push(run);
  }

  /// Arithmetic mean over all runs in seconds, cold start included. `None`
  /// when nothing was measured.
  pub fn mean_secs(&self) -> Option<f64> {
    if self.runs.is_empty() {
      return None;
    }

    let sum: f64 = self.runs.iter().map(Duration::as_secs_f64).sum();

    Some(sum / self.runs.len() as f64)
  }
}

/// Mean time per language for a single benchmark, in configured language
/// order.
#[derive(Debug)]
pub struct BenchmarkResults {
  pub benchmark: String,
  pub averages: Vec<(String, f64)>,
}

impl BenchmarkResults {
  pub fn new(benchmark: &str) -> Self {
    Self {
      benchmark: benchmark.to_string(),
      averages: Vec::new(),
    }
  }

  pub fn insert(&mut self, language: &str, mean_secs: f64) {
    self.averages.push((language.to_string(), mean_secs));
  }

  pub fn get(&self, language: &str) -> Option<f64> {
    self
      .averages
      .iter()
      .find(|(name, _)| name == language)
      .map(|(_, mean)| *mean)
  }
}
