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

//! Single-pass re-indentation of preprocessor conditionals.
//!
//! Every directive line is rewritten as the marker, `depth * indent_width`
//! spaces, then the directive text. `#else` and `#endif` also get a
//! `/* ... */` annotation naming the condition of the block they belong to,
//! unless the author already commented the line.
//!
//! Openers are written at the current depth and push afterwards. Closers
//! pop first, so an `#endif` lines up with its `#if`.

use crate::directive::Command;
use crate::directive::Directive;
use crate::error::ReformatError;
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// Largest accepted `indent_width`.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Where the indentation goes relative to the marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IndentPlacement {
  /// `#  if X`
  #[default]
  AfterMarker,
  /// `  #if X`
  BeforeMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReformatOptions {
  pub marker: char,
  pub indent_width: usize,
  pub placement: IndentPlacement,
}

impl Default for ReformatOptions {
  fn default() -> Self {
    Self {
      marker: '#',
      indent_width: 1,
      placement: IndentPlacement::AfterMarker,
    }
  }
}

impl ReformatOptions {
  fn render(&self, depth: usize, content: &str, annotation: Option<&str>) -> String {
    let indent = " ".repeat(depth * self.indent_width);
    let annotation = annotation.map_or(String::new(), |a| format!("  /* {a} */"));
    match self.placement {
      IndentPlacement::AfterMarker => format!("{}{indent}{content}{annotation}", self.marker),
      IndentPlacement::BeforeMarker => format!("{indent}{}{content}{annotation}", self.marker),
    }
  }
}

/// A conditional block that has been opened but not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
  /// 1-based line of the directive that opened the block.
  pub line: usize,
  pub provenance: String,
}

/// Result of a reformatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
  pub lines: Vec<String>,
  pub directives: usize,
  pub max_depth: usize,
  /// Blocks still open at end of input, outermost first.
  pub unclosed: Vec<OpenBlock>,
}

impl Reformatted {
  pub fn is_balanced(&self) -> bool {
    self.unclosed.is_empty()
  }

  /// Fails with [`ReformatError::Unclosed`] if any block was left open.
  pub fn ensure_balanced(&self) -> Result<(), ReformatError> {
    match self.unclosed.first() {
      None => Ok(()),
      Some(outermost) => Err(ReformatError::Unclosed {
        count: self.unclosed.len(),
        line: outermost.line,
        provenance: outermost.provenance.clone(),
      }),
    }
  }

  /// Joins the lines back into text, each terminated by `\n`.
  pub fn to_text(&self) -> String {
    let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
    for line in &self.lines {
      text.push_str(line);
      text.push('\n');
    }
    text
  }
}

/// Rewrites every directive line of `lines` in place.
///
/// Fails with [`ReformatError::IndentWidth`] if `options.indent_width`
/// exceeds [`MAX_INDENT_WIDTH`].
///
/// Fails fast on `#else`, `#elif` or `#endif` without an open block, and on
/// an `#ifdef`-style directive without a macro name. Blocks left open at the
/// end are reported in [`Reformatted::unclosed`], not as an error.
pub fn reformat(
  mut lines: Vec<String>,
  options: &ReformatOptions,
) -> Result<Reformatted, ReformatError> {
  if options.indent_width > MAX_INDENT_WIDTH {
    return Err(ReformatError::IndentWidth {
      width: options.indent_width,
      max: MAX_INDENT_WIDTH,
    });
  }

  let mut stack: Vec<OpenBlock> = Vec::new();
  let mut directives = 0;
  let mut max_depth = 0;

  for (index, line) in lines.iter_mut().enumerate() {
    let line_no = index + 1;
    let Some(directive) = Directive::parse(line_no, line, options.marker)? else {
      continue;
    };
    directives += 1;

    let unmatched = || ReformatError::Unmatched {
      line: line_no,
      command: directive.content.clone(),
    };

    let (depth, annotation) = match &directive.command {
      Command::Close => {
        let block = stack.pop().ok_or_else(unmatched)?;
        (stack.len(), Some(block.provenance))
      }
      Command::ElifBranch { .. } => {
        stack.pop().ok_or_else(unmatched)?;
        (stack.len(), None)
      }
      Command::ElseBranch => {
        let block = stack.last().ok_or_else(unmatched)?;
        (stack.len() - 1, Some(block.provenance.clone()))
      }
      Command::Open { .. } | Command::OpenDef { .. } | Command::OpenNDef { .. } | Command::Other => {
        (stack.len(), None)
      }
    };

    let annotation = annotation.filter(|a| !a.is_empty() && !directive.has_comment());
    *line = options.render(depth, &directive.content, annotation.as_deref());

    if let Some(provenance) = directive.command.provenance() {
      stack.push(OpenBlock {
        line: line_no,
        provenance,
      });
      max_depth = max_depth.max(stack.len());
    }
  }

  if !stack.is_empty() {
    tracing::debug!(open = stack.len(), "Input ended with open conditional blocks");
  }

  Ok(Reformatted {
    lines,
    directives,
    max_depth,
    unclosed: stack,
  })
}

/// Splits `text` into lines and reformats them.
pub fn reformat_str(text: &str, options: &ReformatOptions) -> Result<Reformatted, ReformatError> {
  reformat(text.lines().map(str::to_string).collect(), options)
}
