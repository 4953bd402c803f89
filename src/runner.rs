// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::config::Config;
use crate::config::Destination;
use crate::error::PpindentError;
use crate::error::ReformatError;
use crate::files::read_source;
use crate::files::write_atomic;
use crate::reformat::reformat_str;
use std::path::PathBuf;

/// What a run did with the reformatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The result was written to this path.
  Written(PathBuf),
  /// In-place run over an already formatted file; nothing was touched.
  Unchanged,
  /// The result went to stdout.
  Printed,
  /// `--check` passed.
  Formatted,
  /// `--check` failed at this 1-based line.
  NeedsFormatting { first_line: usize },
}

/// Reads the input, reformats it and delivers the result per `config.destination`.
///
/// Nothing is written if the input is malformed, or if it has unclosed
/// blocks and `strict` is set.
pub fn run(config: &Config) -> Result<Outcome, PpindentError> {
  let path = &config.input;
  let span = tracing::info_span!("reformat", file = %path.display());
  let _enter = span.enter();

  let source = read_source(path)?;
  let malformed = |source: ReformatError| PpindentError::Reformat {
    path: path.clone(),
    source,
  };

  let reformatted = reformat_str(&source, &config.style.options()).map_err(malformed)?;
  tracing::debug!(
    lines = reformatted.lines.len(),
    directives = reformatted.directives,
    max_depth = reformatted.max_depth,
    "Reformatted {}",
    path.display()
  );

  for block in &reformatted.unclosed {
    tracing::warn!(
      "{}:{}: conditional block ({}) is never closed",
      path.display(),
      block.line,
      block.provenance
    );
  }
  if config.style.strict {
    reformatted.ensure_balanced().map_err(malformed)?;
  }

  let text = reformatted.to_text();

  let outcome = match &config.destination {
    Destination::Check if text == source => Outcome::Formatted,
    Destination::Check => {
      // Compare with line endings so `\r\n` input counts as a difference.
      let first_line = source
        .split_inclusive('\n')
        .zip(text.split_inclusive('\n'))
        .position(|(before, after)| before != after)
        .map_or(reformatted.lines.len(), |at| at + 1);
      Outcome::NeedsFormatting { first_line }
    }
    Destination::Stdout => {
      print!("{text}");
      Outcome::Printed
    }
    Destination::InPlace if text == source => Outcome::Unchanged,
    Destination::InPlace => {
      write_atomic(path, &text)?;
      Outcome::Written(path.clone())
    }
    Destination::File(out) => {
      write_atomic(out, &text)?;
      Outcome::Written(out.clone())
    }
  };

  Ok(outcome)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Style;
  use std::fs;
  use tempfile::tempdir;

  fn config(input: PathBuf, destination: Destination) -> Config {
    Config {
      input,
      destination,
      style: Style::default(),
    }
  }

  #[test]
  fn test_in_place_then_unchanged() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "#ifdef A\n#define B\n#endif\n").unwrap();

    let config = config(input.clone(), Destination::InPlace);
    assert_eq!(run(&config).unwrap(), Outcome::Written(input.clone()));
    assert_eq!(
      fs::read_to_string(&input).unwrap(),
      "#ifdef A\n# define B\n#endif  /* defined(A) */\n"
    );
    assert_eq!(run(&config).unwrap(), Outcome::Unchanged);
  }

  #[test]
  fn test_output_file_leaves_input_alone() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    let output = temp.path().join("b.h");
    fs::write(&input, "#if X\n#endif\n").unwrap();

    let outcome = run(&config(input.clone(), Destination::File(output.clone()))).unwrap();
    assert_eq!(outcome, Outcome::Written(output.clone()));
    assert_eq!(fs::read_to_string(&input).unwrap(), "#if X\n#endif\n");
    assert_eq!(fs::read_to_string(&output).unwrap(), "#if X\n#endif  /* X */\n");
  }

  #[test]
  fn test_check_reports_first_difference() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "int x;\n#if X\n#endif\n").unwrap();

    let outcome = run(&config(input.clone(), Destination::Check)).unwrap();
    assert_eq!(outcome, Outcome::NeedsFormatting { first_line: 3 });
    assert_eq!(fs::read_to_string(&input).unwrap(), "int x;\n#if X\n#endif\n");

    fs::write(&input, "int x;\n#if X\n#endif  /* X */\n").unwrap();
    assert_eq!(run(&config(input, Destination::Check)).unwrap(), Outcome::Formatted);
  }

  #[test]
  fn test_check_flags_missing_trailing_newline() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "int x;").unwrap();

    let outcome = run(&config(input, Destination::Check)).unwrap();
    assert_eq!(outcome, Outcome::NeedsFormatting { first_line: 1 });
  }

  #[test]
  fn test_check_flags_crlf_on_first_line() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "#if X\r\nint a;\r\nint b;\r\n#endif  /* X */\r\n").unwrap();

    let outcome = run(&config(input, Destination::Check)).unwrap();
    assert_eq!(outcome, Outcome::NeedsFormatting { first_line: 1 });
  }

  #[test]
  fn test_malformed_input_is_not_written() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "#if X\n#endif\n#endif\n").unwrap();

    let err = run(&config(input.clone(), Destination::InPlace)).unwrap_err();
    assert!(matches!(
      err,
      PpindentError::Reformat {
        source: ReformatError::Unmatched { line: 3, .. },
        ..
      }
    ));
    assert_eq!(fs::read_to_string(&input).unwrap(), "#if X\n#endif\n#endif\n");
  }

  #[test]
  fn test_strict_rejects_unclosed_blocks() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("a.h");
    fs::write(&input, "#if X\n#if Y\n").unwrap();

    let mut strict = config(input.clone(), Destination::InPlace);
    strict.style.strict = true;
    let err = run(&strict).unwrap_err();
    assert!(matches!(
      err,
      PpindentError::Reformat {
        source: ReformatError::Unclosed { count: 2, line: 1, .. },
        ..
      }
    ));
    assert_eq!(fs::read_to_string(&input).unwrap(), "#if X\n#if Y\n");

    let lenient = config(input.clone(), Destination::InPlace);
    assert_eq!(run(&lenient).unwrap(), Outcome::Written(input.clone()));
    assert_eq!(fs::read_to_string(&input).unwrap(), "#if X\n# if Y\n");
  }
}
