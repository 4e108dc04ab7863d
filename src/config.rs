use std::{
  collections::HashSet,
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use anyhow::{Context, Result};

/// Number of timed invocations per (language, benchmark) pair.
pub const ITERATE_COUNT: usize = 10;

pub const BENCHMARK_DIR: &str = "benchmark/";

/// How to invoke a language's interpreter, and which file suffix its benchmark
/// sources use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSpec {
  pub name: String,
  pub command: String,
  pub extension: String,
}

impl LanguageSpec {
  pub fn new(name: &str, command: &str, extension: &str) -> Self {
    Self {
      name: name.to_string(),
      command: command.to_string(),
      extension: extension.to_string(),
    }
  }

  /// The source file of `benchmark` for this language, `dir/<benchmark><extension>`.
  pub fn source_path<P: AsRef<Path>>(&self, dir: P, benchmark: &str) -> PathBuf {
    dir.as_ref().join(format!("{benchmark}{}", self.extension))
  }
}

/// Parses the command-line form `NAME,COMMAND,EXTENSION`.
impl FromStr for LanguageSpec {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    let fields: Vec<&str> = s.splitn(3, ',').map(str::trim).collect();

    let [name, command, extension] = fields[..] else {
      anyhow::bail!("expected NAME,COMMAND,EXTENSION, got {s:?}");
    };

    for (what, field) in [("name", name), ("command", command), ("extension", extension)] {
      if field.is_empty() {
        anyhow::bail!("empty {what} in {s:?}");
      }
    }

    Ok(Self::new(name, command, extension))
  }
}

pub struct Config {
  /// Languages to measure, in reporting order.
  pub languages: Vec<LanguageSpec>,
  /// Benchmark base file names.
  pub benchmarks: Vec<String>,
  /// Timed invocations per language and benchmark.
  pub repetitions: usize,
  pub benchmark_dir: PathBuf,
  /// Upper bound on a single invocation. `None` waits forever.
  pub timeout: Option<Duration>,
  /// Discard interpreter stdout/stderr instead of inheriting them.
  pub quiet: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      languages: vec![
        LanguageSpec::new("hobby", "./bin/hl_release", ".hl"),
        LanguageSpec::new("lua", "lua", ".lua"),
        LanguageSpec::new("python", "python3", ".py"),
      ],
      benchmarks: vec!["fib".to_string()],
      repetitions: ITERATE_COUNT,
      benchmark_dir: PathBuf::from(BENCHMARK_DIR),
      timeout: None,
      quiet: false,
    }
  }
}

impl Config {
  pub fn validate(&self) -> Result<()> {
    if self.repetitions == 0 {
      anyhow::bail!("repetitions must be greater than zero");
    }

    if self.languages.is_empty() {
      anyhow::bail!("no languages configured");
    }

    if self.benchmarks.is_empty() {
      anyhow::bail!("no benchmarks configured");
    }

    if let Some(benchmark) = self.benchmarks.iter().find(|b| b.trim().is_empty()) {
      anyhow::bail!("invalid benchmark name {benchmark:?}");
    }

    let mut seen = HashSet::new();
    for language in &self.languages {
      if !seen.insert(language.name.as_str()) {
        anyhow::bail!("language {:?} configured more than once", language.name);
      }
    }

    if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
      anyhow::bail!("timeout must be greater than zero");
    }

    Ok(())
  }
}

pub fn parse_timeout(s: &str) -> Result<Duration> {
  let secs: f64 = s.parse().with_context(|| format!("invalid timeout {s:?}"))?;

  Duration::try_from_secs_f64(secs).with_context(|| format!("invalid timeout {s:?}"))
}
