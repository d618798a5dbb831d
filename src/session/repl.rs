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
use crate::rates::currency::Currency;
use crate::reports::card_reporter::CardReporter;
use crate::reports::rate_reporter::RateReporter;
use crate::session::command::{Command, CommandParser, HELP};
use crate::session::conversion::ConversionRequest;
use crate::session::conversion_session::ConversionSession;
use anyhow::Error;
use std::io::{BufRead, Write};

/// How much + and - move the amount by.
const AMOUNT_STEP: f64 = 10.0;

/// Line-oriented front end over a ConversionSession. Recomputes and prints
/// the equivalents after anything that could change them.
pub struct Repl<'a> {
	session: &'a mut ConversionSession,
	parser: CommandParser,
	cards: CardReporter,

	source: Currency,
	amount: f64,
}

impl<'a> Repl<'a> {
	pub fn new(
		session: &'a mut ConversionSession,
		source: Currency,
		amount: f64,
		columns: usize,
	) -> Result<Self, Error> {
		Ok(Self {
			session,
			parser: CommandParser::new()?,
			cards: CardReporter::new(columns),
			source,
			amount,
		})
	}

	/// Runs until `quit` or end of input. Command errors are reported and
	/// the session carries on; only I/O errors end it early.
	pub fn run<R: BufRead, W: Write>(
		&mut self,
		input: R,
		out: &mut W,
		prompt: bool,
	) -> Result<(), Error> {
		self.show_rates(out)?;
		self.show_equivalents(out)?;

		let mut lines = input.lines();
		loop {
			if prompt {
				write!(out, "\n> ")?;
				out.flush()?;
			}

			let Some(line) = lines.next() else {
				break;
			};

			let keep_going = match self.parser.parse(&line?) {
				Ok(None) => true,
				Ok(Some(command)) => self.apply(command, out)?,
				Err(e) => {
					writeln!(out, "\nerror: {}", e)?;
					true
				},
			};

			if !keep_going {
				break;
			}
		}

		Ok(())
	}

	fn apply<W: Write>(
		&mut self,
		command: Command,
		out: &mut W,
	) -> Result<bool, Error> {
		match command {
			Command::SetRate(currency, rate) => {
				match self.session.set_rate(currency, rate) {
					Ok(()) => {
						writeln!(out, "\n{} set to {}", currency, rate)?;
						self.show_equivalents(out)?;
					},
					Err(e) => writeln!(out, "\nerror: {}", e)?,
				}
			},
			Command::From(currency) => {
				self.source = currency;
				self.show_equivalents(out)?;
			},
			Command::Amount(amount) => {
				match ConversionRequest::new(self.source, amount) {
					Ok(request) => {
						self.amount = request.amount;
						self.show_equivalents(out)?;
					},
					Err(e) => writeln!(out, "\nerror: {}", e)?,
				}
			},
			Command::StepUp => {
				self.amount += AMOUNT_STEP;
				self.show_equivalents(out)?;
			},
			Command::StepDown => {
				self.amount = (self.amount - AMOUNT_STEP).max(0.0);
				self.show_equivalents(out)?;
			},
			Command::Rates => self.show_rates(out)?,
			Command::Refresh => {
				self.session.refresh();
				if let Some(state) = self.session.load_state() {
					writeln!(out, "\nRates refreshed ({})", state.origin)?;
				}
				self.show_rates(out)?;
				self.show_equivalents(out)?;
			},
			Command::Status => self.show_status(out)?,
			Command::Help => writeln!(out, "\n{}", HELP)?,
			Command::Quit => return Ok(false),
		}

		Ok(true)
	}

	pub fn show_rates<W: Write>(&mut self, out: &mut W) -> Result<(), Error> {
		let table = self.session.initialize();
		write!(out, "\n{}", RateReporter::new(table).render())?;
		Ok(())
	}

	pub fn show_equivalents<W: Write>(
		&mut self,
		out: &mut W,
	) -> Result<(), Error> {
		let result = ConversionRequest::new(self.source, self.amount)
			.and_then(|request| self.session.convert(&request));

		match result {
			Ok(result) => write!(out, "\n{}", self.cards.render(&result))?,
			Err(e) => writeln!(out, "\nerror: {}", e)?,
		}

		Ok(())
	}

	fn show_status<W: Write>(&mut self, out: &mut W) -> Result<(), Error> {
		match self.session.load_state() {
			Some(state) => writeln!(
				out,
				"\nRates are {}, loaded {}",
				state.origin,
				state.loaded_at.format("%Y-%m-%d %H:%M:%S")
			)?,
			None => writeln!(out, "\nRates not loaded yet")?,
		}
		writeln!(out, "Converting {} {}", self.amount, self.source)?;

		Ok(())
	}
}
