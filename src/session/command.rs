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
use crate::util::amount::parse_number;
use anyhow::{bail, Error};
use regex::Regex;

/// One line of input to an interactive session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
	SetRate(Currency, f64),
	From(Currency),
	Amount(f64),
	StepUp,
	StepDown,
	Rates,
	Refresh,
	Status,
	Help,
	Quit,
}

pub const HELP: &str = "\
Commands:
  set CODE VALUE   overwrite a rate (also: CODE=VALUE)
  from CODE        convert from this currency
  amount N         convert this amount
  + / -            step the amount up or down by 10
  rates            show the rate table
  refresh          reload rates from the source, dropping edits
  status           show where the rates came from
  help             show this message
  quit             end the session";

pub struct CommandParser {
	assignment: Regex,
}

impl CommandParser {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			assignment: Regex::new(r"^([A-Za-z]+)\s*=\s*(\S+)$")?,
		})
	}

	/// Parses a `CODE=VALUE` rate assignment, as taken by both `--set` and
	/// the session prompt.
	pub fn parse_assignment(&self, s: &str) -> Result<(Currency, f64), Error> {
		let Some(caps) = self.assignment.captures(s.trim()) else {
			bail!("expected CODE=VALUE, got: {}", s.trim());
		};

		let currency: Currency = caps[1].parse()?;
		let rate = parse_number(&caps[2])?;
		Ok((currency, rate))
	}

	/// Returns None for lines with nothing on them but whitespace or a
	/// comment.
	pub fn parse(&self, line: &str) -> Result<Option<Command>, Error> {
		// Chop comments out
		let l = line.split('#').next().unwrap_or_default().trim();
		if l.is_empty() {
			return Ok(None);
		}

		if self.assignment.is_match(l) {
			let (currency, rate) = self.parse_assignment(l)?;
			return Ok(Some(Command::SetRate(currency, rate)));
		}

		let words: Vec<&str> = l.split_whitespace().collect();
		let command = match (words[0].to_lowercase().as_str(), &words[1..]) {
			("set", [code, value]) => {
				Command::SetRate(code.parse()?, parse_number(value)?)
			},
			("from", [code]) => Command::From(code.parse()?),
			("amount", [value]) => Command::Amount(parse_number(value)?),
			("+", []) => Command::StepUp,
			("-", []) => Command::StepDown,
			("rates", []) => Command::Rates,
			("refresh", []) => Command::Refresh,
			("status", []) => Command::Status,
			("help" | "?", []) => Command::Help,
			("quit" | "exit", []) => Command::Quit,
			("set" | "from" | "amount", _) => {
				bail!("wrong number of arguments for {}", words[0])
			},
			_ => bail!("unknown command: {} (try help)", l),
		};

		Ok(Some(command))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(line: &str) -> Result<Option<Command>, Error> {
		CommandParser::new().unwrap().parse(line)
	}

	#[test]
	fn test_set_forms() {
		assert_eq!(
			parse("set VES 75").unwrap(),
			Some(Command::SetRate(Currency::Ves, 75.0))
		);
		assert_eq!(
			parse("cop = 4,050.5").unwrap(),
			Some(Command::SetRate(Currency::Cop, 4050.5))
		);
		assert_eq!(
			parse("BRL=0").unwrap(),
			Some(Command::SetRate(Currency::Brl, 0.0))
		);
	}

	#[test]
	fn test_simple_commands() {
		assert_eq!(
			parse("from usdt").unwrap(),
			Some(Command::From(Currency::Usdt))
		);
		assert_eq!(parse("amount 250").unwrap(), Some(Command::Amount(250.0)));
		assert_eq!(parse(" + ").unwrap(), Some(Command::StepUp));
		assert_eq!(parse("-").unwrap(), Some(Command::StepDown));
		assert_eq!(parse("REFRESH").unwrap(), Some(Command::Refresh));
		assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
	}

	#[test]
	fn test_blank_and_comments() {
		assert_eq!(parse("").unwrap(), None);
		assert_eq!(parse("   # just a note").unwrap(), None);
		assert_eq!(parse("rates # show them").unwrap(), Some(Command::Rates));
	}

	#[test]
	fn test_errors() {
		assert!(parse("set VES").is_err());
		assert!(parse("set EUR 1").is_err());
		assert!(parse("amount lots").is_err());
		assert!(parse("VES=abc").is_err());
		assert!(parse("convert").is_err());
	}

	#[test]
	fn test_parse_assignment() {
		let parser = CommandParser::new().unwrap();
		assert_eq!(
			parser.parse_assignment("usdt=1.02").unwrap(),
			(Currency::Usdt, 1.02)
		);
		assert!(parser.parse_assignment("usdt").is_err());
	}
}
