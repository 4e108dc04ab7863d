use std::fmt::Write;

use anyhow::Result;

use crate::stats::BenchmarkResults;

pub const SEPARATOR: &str = "---";

/// Progress header printed before a language's repetitions.
pub fn format_language_header(language: &str) -> String {
  format!("{SEPARATOR}\n{}:", language.to_uppercase())
}

/// Rounds seconds to whole milliseconds, ties to even.
pub fn millis(secs: f64) -> i64 {
  (secs * 1000.0).round_ties_even() as i64
}

/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest, so `"hobby"` becomes `"Hobby"` and `"lua-jit"` becomes `"Lua-Jit"`.
pub fn title_case(s: &str) -> String {
  let mut title = String::with_capacity(s.len());
  let mut in_word = false;

  for c in s.chars() {
    if c.is_alphabetic() {
      if in_word {
        title.extend(c.to_lowercase());
      } else {
        title.extend(c.to_uppercase());
      }
      in_word = true;
    } else {
      title.push(c);
      in_word = false;
    }
  }

  title
}

pub fn format_results(results: &BenchmarkResults) -> Result<String> {
  let mut block = String::new();

  writeln!(block, "{} RESULTS", results.benchmark.to_uppercase())?;

  for (language, mean_secs) in &results.averages {
    writeln!(block, "{} average:\t{}ms", title_case(language), millis(*mean_secs))?;
  }

  Ok(block)
}
