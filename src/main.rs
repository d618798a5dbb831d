/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use crate::config::filesystem::get_config;
use crate::rates::currency::Currency;
use crate::rates::provider::{
	HttpRateSource, OfflineSource, RateSource, DEFAULT_BASE_URL,
	DEFAULT_TIMEOUT,
};
use crate::reports::card_reporter::{CardReporter, DEFAULT_COLUMNS};
use crate::reports::rate_reporter::RateReporter;
use crate::session::command::CommandParser;
use crate::session::conversion::ConversionRequest;
use crate::session::conversion_session::ConversionSession;
use crate::session::repl::Repl;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use std::io;
use std::io::{IsTerminal, Write};
use std::time::Duration;

mod config;
mod rates;
mod reports;
mod session;
mod util;

const DEFAULT_SOURCE: Currency = Currency::Ves;
const DEFAULT_AMOUNT: f64 = 100.0;

#[derive(Parser)]
#[command(
	name = "cambio",
	version = "1.0",
	about = "Multi-currency conversion calculator"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Currency to convert from (default: VES)
	#[arg(short, long)]
	source: Option<String>,

	/// Amount to convert (default: 100.00)
	#[arg(short, long)]
	amount: Option<f64>,

	/// Overrides a rate once loaded, as CODE=VALUE; may be repeated
	#[arg(long = "set", value_name = "CODE=VALUE")]
	set: Vec<String>,

	/// Never contact the rate source; use the offline rates
	#[arg(long)]
	offline: bool,

	/// Seconds to wait for the rate source (default: 5)
	#[arg(long)]
	timeout: Option<u64>,

	/// Cards per row when showing equivalents (default: 3)
	#[arg(long)]
	columns: Option<usize>,

	/// Custom config file location (default: ~/.config/cambio/config.toml)
	#[arg(long)]
	config: Option<String>,
}

impl Cli {
	/// More than this and rows stop fitting on a terminal anyway
	const MAX_COLUMNS: usize = 8;

	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(amount) = self.amount {
			ConversionRequest::new(DEFAULT_SOURCE, amount)?;
		}

		if let Some(columns) = self.columns {
			if columns == 0 || columns > Cli::MAX_COLUMNS {
				bail!("Columns must be between 1 and {}", Cli::MAX_COLUMNS);
			}
		}

		if self.timeout == Some(0) {
			bail!("Timeout must be at least one second");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Session, // interactive calculator
	Convert, // print equivalents once
	Rates,   // print the rate table
}

/// Flags layered over config, layered over defaults.
struct Options {
	source: Currency,
	amount: f64,
	columns: usize,

	offline: bool,
	base_url: String,
	timeout: Duration,
}

impl Options {
	fn resolve(args: &Cli, config: Config) -> Result<Self, Error> {
		let source_config = config.source.unwrap_or_default();
		let session_config = config.session.unwrap_or_default();

		let code = args.source.as_ref().or(session_config.currency.as_ref());
		let source = match code {
			Some(code) => code.parse::<Currency>()?,
			None => DEFAULT_SOURCE,
		};

		let amount = args
			.amount
			.or(session_config.amount)
			.unwrap_or(DEFAULT_AMOUNT);
		// config values don't go through Cli::validate
		ConversionRequest::new(source, amount)?;

		let columns = args
			.columns
			.or(session_config.columns)
			.unwrap_or(DEFAULT_COLUMNS);
		if columns == 0 {
			bail!("Columns must be at least 1");
		}

		let timeout = match args.timeout.or(source_config.timeout_secs) {
			Some(secs) => Duration::from_secs(secs),
			None => DEFAULT_TIMEOUT,
		};

		Ok(Self {
			source,
			amount,
			columns,
			offline: args.offline || source_config.offline.unwrap_or(false),
			base_url: source_config
				.base_url
				.unwrap_or(DEFAULT_BASE_URL.to_owned()),
			timeout,
		})
	}

	fn rate_source(&self) -> Result<Box<dyn RateSource>, Error> {
		if self.offline {
			return Ok(Box::new(OfflineSource));
		}

		Ok(Box::new(HttpRateSource::new(&self.base_url, self.timeout)?))
	}
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();

	let args = Cli::parse();
	args.validate()?;

	let config = get_config(args.config.as_ref())?;
	let options = Options::resolve(&args, config)?;

	let mut session = ConversionSession::new(options.rate_source()?);

	let parser = CommandParser::new()?;
	for assignment in &args.set {
		let (currency, rate) = parser.parse_assignment(assignment)?;
		session.set_rate(currency, rate)?;
	}

	let mut out = io::stdout().lock();

	match args.command {
		Directive::Session => {
			let stdin = io::stdin();
			// no prompt noise when input is piped in
			let prompt = stdin.is_terminal();

			let mut repl = Repl::new(
				&mut session,
				options.source,
				options.amount,
				options.columns,
			)?;
			repl.run(stdin.lock(), &mut out, prompt)?;
		},
		Directive::Convert => {
			let request = ConversionRequest::new(options.source, options.amount)?;
			let result = session.convert(&request)?;
			let reporter = CardReporter::new(options.columns);
			write!(out, "{}", reporter.render(&result))?;
		},
		Directive::Rates => {
			let reporter = RateReporter::new(session.initialize());
			write!(out, "{}", reporter.render())?;
		},
	}

	out.flush()?;
	Ok(())
}
