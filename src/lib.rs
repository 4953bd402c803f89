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

//! # ppindent
//!
//! `ppindent` re-indents preprocessor conditionals so that nesting is visible
//! at a glance, and annotates every `#else` and `#endif` with the condition of
//! the block it belongs to:
//!
//! ```text
//! #ifdef FOO                     #ifdef FOO
//! #if BAR                        # if BAR
//! #define BAZ          -->       #  define BAZ
//! #endif                         # endif  /* BAR */
//! #endif                         #endif  /* defined(FOO) */
//! ```
//!
//! This crate contains the library logic for the `ppindent` CLI; the
//! [`reformat`] module can be used on its own.
//!
//! ## Core Modules
//!
//! * [`directive`]: Classifies a single line into a [`directive::Command`].
//! * [`reformat`]: The single-pass nesting tracker, [`reformat::reformat`].
//! * [`files`]: Reading the input and replacing the output atomically.
//! * [`config`]: Layers defaults, config file, environment and CLI flags into a `Config`.
//! * [`runner`]: Ties the above together for one invocation.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod files;
pub mod logging;
pub mod reformat;
pub mod runner;
