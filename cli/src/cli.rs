// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use calparse_ical::IcsParser;
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use crate::calendar_formatter::CalendarFormatter;
use crate::config::{APP_NAME, parse_config};

const STDIN_PATH: &str = "-";

/// Run the calparse command-line interface.
pub async fn run() -> ExitCode {
    init_tracing();
    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Error policy given on the command line, overriding the config file
    pub halt_on_parse_errors: Option<bool>,

    /// The iCalendar file to parse, `-` for standard input
    pub input: PathBuf,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Parse an iCalendar file and summarize its timezone and events.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/calparse/config.toml on Linux and \
MacOS, %APPDATA%/calparse/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--strict "Abort on the first parse error").conflicts_with("lenient"))
            .arg(arg!(--lenient "Skip lines that cannot be parsed and report them"))
            .arg(
                arg!(<FILE> "The iCalendar file to parse, or - for standard input")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let halt_on_parse_errors = match (matches.get_flag("strict"), matches.get_flag("lenient")) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let input = matches
            .get_one::<PathBuf>("FILE")
            .cloned()
            .ok_or("Missing input file")?;

        Ok(Cli {
            config: matches.get_one("config").cloned(),
            halt_on_parse_errors,
            input,
        })
    }

    /// Run the command, printing the summary to standard output
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();
        self.run_with_output(&mut stdout).await
    }

    /// Run the command, writing the summary to `out`
    pub async fn run_with_output(self, out: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        tracing::debug!("Parsing configuration...");
        let mut config = parse_config(self.config).await?;
        if let Some(halt) = self.halt_on_parse_errors {
            config.parser.halt_on_parse_errors = halt;
        }

        let src = read_input(&self.input).await?;

        tracing::debug!(input = %self.input.display(), "Parsing calendar...");
        let report = IcsParser::new(config.parser).parse_report(&src)?;

        CalendarFormatter::new().write_to(out, &report)?;
        Ok(())
    }
}

async fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path.as_os_str() == STDIN_PATH {
        let mut src = String::new();
        tokio::io::stdin()
            .read_to_string(&mut src)
            .await
            .map_err(|e| format!("Failed to read standard input: {e}"))?;
        return Ok(src);
    }

    let src = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Ok(src)
}
