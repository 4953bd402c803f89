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
use crate::error::ReformatError;

/// Comment openers that mark a directive as already annotated by its author.
pub const COMMENT_MARKERS: [&str; 2] = ["//", "/*"];

/// Classification of a directive's command word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// `#if COND`, or any other command word starting with `if`.
  Open { condition: String },
  /// `#ifdef NAME`
  OpenDef { name: String },
  /// `#ifndef NAME`
  OpenNDef { name: String },
  /// `#endif`
  Close,
  /// `#else`
  ElseBranch,
  /// `#elif COND`, `#elifdef NAME` or `#elifndef NAME`.
  ElifBranch { provenance: String },
  /// Everything else (`#include`, `#define`, `#pragma`, a bare marker...).
  Other,
}

impl Command {
  /// The text recorded on the stack when this command opens a block.
  ///
  /// Returns `None` for commands that do not open one.
  pub fn provenance(&self) -> Option<String> {
    match self {
      Command::Open { condition } => Some(condition.clone()),
      Command::OpenDef { name } => Some(format!("defined({name})")),
      Command::OpenNDef { name } => Some(format!("!defined({name})")),
      Command::ElifBranch { provenance } => Some(provenance.clone()),
      Command::Close | Command::ElseBranch | Command::Other => None,
    }
  }
}

/// A line whose first non-whitespace character is the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
  pub command: Command,
  /// Trimmed text after the marker, command word included.
  pub content: String,
}

impl Directive {
  /// Parses `text` as a directive.
  ///
  /// Returns `Ok(None)` for ordinary lines. `line` is the 1-based line
  /// number, used only for error reporting.
  pub fn parse(line: usize, text: &str, marker: char) -> Result<Option<Self>, ReformatError> {
    let Some(rest) = text.trim().strip_prefix(marker) else {
      return Ok(None);
    };
    let content = rest.trim().to_string();

    let (word, args) = match content.split_once(char::is_whitespace) {
      Some((word, args)) => (word, args),
      None => (content.as_str(), ""),
    };
    let args = strip_comment(args);

    let missing_name = || ReformatError::MissingName {
      line,
      command: word.to_string(),
    };
    let first_arg = || args.split_whitespace().next().map(str::to_string);

    let command = match word {
      "ifdef" => Command::OpenDef {
        name: first_arg().ok_or_else(missing_name)?,
      },
      "ifndef" => Command::OpenNDef {
        name: first_arg().ok_or_else(missing_name)?,
      },
      "endif" => Command::Close,
      "else" => Command::ElseBranch,
      "elif" => Command::ElifBranch {
        provenance: normalize(args),
      },
      "elifdef" => Command::ElifBranch {
        provenance: format!("defined({})", first_arg().ok_or_else(missing_name)?),
      },
      "elifndef" => Command::ElifBranch {
        provenance: format!("!defined({})", first_arg().ok_or_else(missing_name)?),
      },
      w if w.starts_with("if") => Command::Open {
        condition: normalize(args),
      },
      _ => Command::Other,
    };

    Ok(Some(Directive { command, content }))
  }

  /// True when the author already put a comment on this line.
  pub fn has_comment(&self) -> bool {
    COMMENT_MARKERS.iter().any(|m| self.content.contains(m))
  }
}

/// Cuts `text` at the first comment opener.
fn strip_comment(text: &str) -> &str {
  COMMENT_MARKERS
    .iter()
    .filter_map(|m| text.find(m))
    .min()
    .map_or(text, |at| &text[..at])
}

/// Collapses runs of whitespace to single spaces.
fn normalize(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(text: &str) -> Option<Directive> {
    Directive::parse(1, text, '#').unwrap()
  }

  #[test]
  fn test_ordinary_lines_are_not_directives() {
    assert_eq!(parse("int x = 0;"), None);
    assert_eq!(parse(""), None);
    assert_eq!(parse("   "), None);
    assert_eq!(parse("  x # y"), None);
  }

  #[test]
  fn test_classifies_vocabulary() {
    assert_eq!(
      parse("#if A && B").unwrap().command,
      Command::Open {
        condition: "A && B".into()
      }
    );
    assert_eq!(
      parse("  #  ifdef FOO").unwrap().command,
      Command::OpenDef { name: "FOO".into() }
    );
    assert_eq!(
      parse("#ifndef BAR").unwrap().command,
      Command::OpenNDef { name: "BAR".into() }
    );
    assert_eq!(parse("#endif").unwrap().command, Command::Close);
    assert_eq!(parse("#else").unwrap().command, Command::ElseBranch);
    assert_eq!(
      parse("#elif C").unwrap().command,
      Command::ElifBranch {
        provenance: "C".into()
      }
    );
    assert_eq!(parse("#include <x.h>").unwrap().command, Command::Other);
    assert_eq!(parse("#").unwrap().command, Command::Other);
  }

  #[test]
  fn test_any_if_prefix_opens() {
    assert_eq!(
      parse("#iffy X").unwrap().command,
      Command::Open {
        condition: "X".into()
      }
    );
  }

  #[test]
  fn test_command_word_is_case_sensitive() {
    assert_eq!(parse("#ENDIF").unwrap().command, Command::Other);
    assert_eq!(parse("#If A").unwrap().command, Command::Other);
  }

  #[test]
  fn test_content_keeps_inner_whitespace() {
    let d = parse("   #   if  A   ||  B   ").unwrap();
    assert_eq!(d.content, "if  A   ||  B");
    assert_eq!(d.command.provenance().unwrap(), "A || B");
  }

  #[test]
  fn test_provenance_strings() {
    assert_eq!(
      parse("#ifdef FOO").unwrap().command.provenance().unwrap(),
      "defined(FOO)"
    );
    assert_eq!(
      parse("#ifndef BAR").unwrap().command.provenance().unwrap(),
      "!defined(BAR)"
    );
    assert_eq!(
      parse("#elifdef BAZ").unwrap().command.provenance().unwrap(),
      "defined(BAZ)"
    );
    assert_eq!(
      parse("#elifndef QUX").unwrap().command.provenance().unwrap(),
      "!defined(QUX)"
    );
    assert_eq!(parse("#endif").unwrap().command.provenance(), None);
  }

  #[test]
  fn test_trailing_comment_is_not_provenance() {
    let d = parse("#if A /* why */").unwrap();
    assert!(d.has_comment());
    assert_eq!(d.command.provenance().unwrap(), "A");

    let d = parse("#ifdef FOO// note").unwrap();
    assert_eq!(d.command.provenance().unwrap(), "defined(FOO)");
  }

  #[test]
  fn test_missing_macro_name() {
    let err = Directive::parse(7, "#ifdef", '#').unwrap_err();
    assert!(matches!(
      err,
      ReformatError::MissingName { line: 7, ref command } if command == "ifdef"
    ));
    assert!(Directive::parse(1, "#ifndef // nothing", '#').is_err());
  }

  #[test]
  fn test_custom_marker() {
    let d = Directive::parse(1, "%if A", '%').unwrap().unwrap();
    assert_eq!(d.content, "if A");
    assert_eq!(Directive::parse(1, "#if A", '%').unwrap(), None);
  }
}
