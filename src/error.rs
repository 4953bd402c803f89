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
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the ppindent library.
#[derive(Error, Debug)]
pub enum PpindentError {
  #[error("Malformed input in {path}")]
  Reformat {
    path: PathBuf,
    #[source]
    source: ReformatError,
  },

  #[error("Configuration error")]
  Config(#[from] ConfigError),

  #[error("File error")]
  File(#[from] FileError),
}

/// Errors raised while tracking directive nesting (src/reformat.rs).
#[derive(Error, Debug)]
pub enum ReformatError {
  #[error("line {line}: `#{command}` has no matching opening directive")]
  Unmatched { line: usize, command: String },

  #[error("Indent width {width} exceeds the maximum of {max}")]
  IndentWidth { width: usize, max: usize },

  #[error("line {line}: `#{command}` is missing its macro name")]
  MissingName { line: usize, command: String },

  #[error("{count} conditional block(s) left open at end of input; outermost opened on line {line} ({provenance})")]
  Unclosed {
    count: usize,
    line: usize,
    provenance: String,
  },
}

/// Errors related to configuration resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file: {path}")]
  ReadConfig {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to load configuration: {0}")]
  Extract(#[from] figment::Error),

  #[error("Marker must be a single character other than whitespace, '/' or '*', got {0:?}")]
  InvalidMarker(String),

  #[error("indent_width must be at most {max}, got {width}")]
  IndentWidth { width: usize, max: usize },
}

/// Errors related to reading the input and committing the output (src/files.rs).
#[derive(Error, Debug)]
pub enum FileError {
  #[error("Failed to read input file: {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to create temporary file in {dir}")]
  CreateTemp {
    dir: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to write temporary file for {path}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to replace {path}")]
  Persist {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
