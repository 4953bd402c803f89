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
use anyhow::Result;
use clap::Parser;
use ppindent::cli::Cli;
use ppindent::config::Config;
use ppindent::logging::setup_tracing;
use ppindent::runner::Outcome;
use ppindent::runner::run;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
  let _log_guard = setup_tracing()?;

  let cli = Cli::parse();
  let main_span = tracing::info_span!("ppindent");
  let _enter = main_span.enter();

  let config = Config::try_from(cli)?;
  let input = config.input.display().to_string();

  match run(&config)? {
    Outcome::Written(path) => tracing::info!("Wrote {}", path.display()),
    Outcome::Unchanged => tracing::info!("{input} is already formatted"),
    Outcome::Printed => {}
    Outcome::Formatted => tracing::info!("{input} is formatted"),
    Outcome::NeedsFormatting { first_line } => {
      tracing::error!("{input}:{first_line}: needs reformatting");
      return Ok(ExitCode::FAILURE);
    }
  }

  Ok(ExitCode::SUCCESS)
}
