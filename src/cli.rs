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
use crate::reformat::IndentPlacement;
use crate::reformat::MAX_INDENT_WIDTH;
use clap::Args;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  version,
  about = "Re-indents preprocessor conditionals and annotates their closing directives"
)]
pub struct Cli {
  /// The source file to reformat.
  pub input: PathBuf,

  /// Write the result here instead of rewriting INPUT in place.
  #[arg(short, long, conflicts_with_all = ["stdout", "check"])]
  pub output: Option<PathBuf>,

  /// Print the result to stdout instead of writing a file.
  #[arg(long, conflicts_with = "check")]
  pub stdout: bool,

  /// Exit with a non-zero status if INPUT is not already formatted. Writes nothing.
  #[arg(long)]
  pub check: bool,

  /// TOML or JSON file with style settings.
  #[arg(short, long, env = "PPINDENT_CONFIG")]
  pub config: Option<PathBuf>,

  #[command(flatten)]
  pub style: StyleArgs,
}

/// Style overrides. Unset flags leave the config file and environment in charge.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct StyleArgs {
  /// Character that starts a directive line.
  #[arg(long)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub marker: Option<String>,

  /// Spaces per nesting level.
  #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_INDENT_WIDTH as u64))]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub indent_width: Option<usize>,

  /// Put the indentation after the marker (`#  if`) or before it (`  #if`).
  #[arg(long, value_enum)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub indent_placement: Option<IndentPlacement>,

  /// Fail instead of warning when conditional blocks are left open at end of input.
  #[arg(long)]
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub strict: bool,
}
