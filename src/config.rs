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
use crate::cli::Cli;
use crate::cli::StyleArgs;
use crate::error::ConfigError;
use crate::reformat::IndentPlacement;
use crate::reformat::MAX_INDENT_WIDTH;
use crate::reformat::ReformatOptions;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Json;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Prefix of the environment variables that override style settings.
pub const ENV_PREFIX: &str = "PPINDENT_";

/// How the rewritten directives look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
  pub marker: char,
  pub indent_width: usize,
  pub indent_placement: IndentPlacement,
  pub strict: bool,
}

impl Default for Style {
  fn default() -> Self {
    let ReformatOptions {
      marker,
      indent_width,
      placement,
    } = ReformatOptions::default();
    Self {
      marker,
      indent_width,
      indent_placement: placement,
      strict: false,
    }
  }
}

impl Style {
  pub fn options(&self) -> ReformatOptions {
    ReformatOptions {
      marker: self.marker,
      indent_width: self.indent_width,
      placement: self.indent_placement,
    }
  }

  /// Resolves the style from defaults, an optional config file, the
  /// environment and CLI flags, later sources taking precedence.
  pub fn resolve(config_file: Option<&Path>, overrides: &StyleArgs) -> Result<Self, ConfigError> {
    if let Some(marker) = &overrides.marker {
      if marker.chars().count() != 1 {
        return Err(ConfigError::InvalidMarker(marker.clone()));
      }
    }

    let mut figment = Figment::from(Serialized::defaults(Style::default()));

    if let Some(path) = config_file {
      let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source,
      })?;
      figment = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => figment.merge(Json::string(&contents)),
        _ => figment.merge(Toml::string(&contents)),
      };
      tracing::debug!("Loaded style settings from {}", path.display());
    }

    let style: Style = figment
      .merge(Env::prefixed(ENV_PREFIX).only(&["marker", "indent_width", "indent_placement", "strict"]))
      .merge(Serialized::defaults(overrides))
      .extract()?;

    // `/` and `*` would turn comment lines into directives.
    if style.marker.is_whitespace() || matches!(style.marker, '/' | '*') {
      return Err(ConfigError::InvalidMarker(style.marker.to_string()));
    }
    if style.indent_width > MAX_INDENT_WIDTH {
      return Err(ConfigError::IndentWidth {
        width: style.indent_width,
        max: MAX_INDENT_WIDTH,
      });
    }

    Ok(style)
  }
}

/// Where the reformatted text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
  /// Rewrite the input file.
  InPlace,
  /// Write to another file.
  File(PathBuf),
  Stdout,
  /// Compare only; write nothing.
  Check,
}

/// Fully validated and resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
  pub input: PathBuf,
  pub destination: Destination,
  pub style: Style,
}

impl TryFrom<Cli> for Config {
  type Error = ConfigError;

  fn try_from(
    Cli {
      input,
      output,
      stdout,
      check,
      config,
      style,
    }: Cli,
  ) -> Result<Self, Self::Error> {
    let style = Style::resolve(config.as_deref(), &style)?;

    let destination = match (output, stdout, check) {
      (Some(path), _, _) => Destination::File(path),
      (None, true, _) => Destination::Stdout,
      (None, false, true) => Destination::Check,
      (None, false, false) => Destination::InPlace,
    };

    Ok(Config {
      input,
      destination,
      style,
    })
  }
}
