// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for the `calparse-ical` parser.

mod calendar_formatter;
mod cli;
mod config;
mod table;

pub use crate::cli::{Cli, run};
pub use crate::config::{APP_NAME, Config, parse_config};
