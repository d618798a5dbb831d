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
use crate::session::conversion::ConversionError;
use std::fmt;
use std::str::FromStr;

/// The currencies the calculator tracks. Declaration order is the order
/// rates are listed and equivalents are reported in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Currency {
	Usd,
	Usdt,
	Ves,
	Cop,
	Brl,
}

impl Currency {
	pub const ALL: [Currency; 5] = [
		Currency::Usd,
		Currency::Usdt,
		Currency::Ves,
		Currency::Cop,
		Currency::Brl,
	];

	/// Every rate is expressed as units of a currency per one of these.
	pub const PIVOT: Currency = Currency::Usd;

	pub fn code(&self) -> &'static str {
		match self {
			Currency::Usd => "USD",
			Currency::Usdt => "USDT",
			Currency::Ves => "VES",
			Currency::Cop => "COP",
			Currency::Brl => "BRL",
		}
	}

	pub fn is_pivot(&self) -> bool {
		*self == Currency::PIVOT
	}
}

impl FromStr for Currency {
	type Err = ConversionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let code = s.trim();
		Currency::ALL
			.into_iter()
			.find(|c| c.code().eq_ignore_ascii_case(code))
			.ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_is_case_insensitive() {
		assert_eq!("ves".parse::<Currency>().unwrap(), Currency::Ves);
		assert_eq!(" UsDt ".parse::<Currency>().unwrap(), Currency::Usdt);
	}

	#[test]
	fn test_parse_unknown() {
		assert_eq!(
			"EUR".parse::<Currency>(),
			Err(ConversionError::UnknownCurrency("EUR".to_string()))
		);
	}

	#[test]
	fn test_order_follows_declaration() {
		let mut sorted = Currency::ALL;
		sorted.sort();
		assert_eq!(sorted, Currency::ALL);
		assert!(Currency::ALL[0].is_pivot());
	}
}
