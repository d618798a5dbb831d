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
use crate::reports::table::Table;
use crate::session::conversion::ConversionResult;
use crate::util::amount::format_amount;
use log::warn;

pub const DEFAULT_COLUMNS: usize = 3;

/// Lays the equivalents of a conversion out as labelled cards, wrapping onto
/// as many rows as it takes. A card whose value can't be rendered is left
/// out; the rest still show.
pub struct CardReporter {
	columns: usize,
}

impl CardReporter {
	pub fn new(columns: usize) -> Self {
		Self {
			columns: columns.max(1),
		}
	}

	pub fn render(&self, result: &ConversionResult) -> String {
		let cards: Vec<(String, String)> = result
			.equivalents
			.iter()
			.filter_map(|e| match format_amount(e.value) {
				Some(value) => Some((e.currency.to_string(), value)),
				None => {
					warn!("Omitting {}: value is {}", e.currency, e.value);
					None
				},
			})
			.collect();

		let amount = format_amount(result.amount)
			.unwrap_or_else(|| result.amount.to_string());
		let mut out = format!("{} {} =\n\n", amount, result.source);

		if cards.is_empty() {
			out.push_str("(nothing to show)\n");
			return out;
		}

		let mut table = Table::new(self.columns);
		table.right_align((0..self.columns).collect());

		for row in cards.chunks(self.columns) {
			table.add_header(row.iter().map(|(label, _)| label.as_str()).collect());
			table.add_partial_separator((0..row.len()).collect());
			table.add_row(row.iter().map(|(_, value)| value.as_str()).collect());
		}

		out.push_str(&table.render());
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rates::currency::Currency;
	use crate::session::conversion::Equivalent;

	fn result_of(values: &[(Currency, f64)]) -> ConversionResult {
		ConversionResult {
			source: Currency::Ves,
			amount: 6000.0,
			equivalents: values
				.iter()
				.map(|(currency, value)| Equivalent {
					currency: *currency,
					value: *value,
				})
				.collect(),
		}
	}

	#[test]
	fn test_wraps_into_rows() {
		let result = result_of(&[
			(Currency::Usd, 100.0),
			(Currency::Usdt, 100.0),
			(Currency::Cop, 400000.0),
			(Currency::Brl, 550.0),
		]);

		let expected = "6,000.00 VES =\n\n \
			USD   |  USDT  |    COP\n\
			------   ------   ----------\n\
			100.00   100.00   400,000.00\n \
			BRL\n\
			------\n\
			550.00\n";
		assert_eq!(CardReporter::new(3).render(&result), expected);
	}

	#[test]
	fn test_single_column() {
		let result = result_of(&[(Currency::Usd, 1.5), (Currency::Brl, 8.25)]);
		assert_eq!(
			CardReporter::new(1).render(&result),
			"6,000.00 VES =\n\nUSD\n----\n1.50\nBRL\n----\n8.25\n"
		);
	}

	#[test]
	fn test_non_finite_cards_are_omitted() {
		let result = result_of(&[
			(Currency::Usd, 100.0),
			(Currency::Cop, f64::INFINITY),
			(Currency::Brl, 550.0),
		]);
		let rendered = CardReporter::new(3).render(&result);

		assert!(!rendered.contains("COP"));
		assert!(rendered.contains("550.00"));
	}

	#[test]
	fn test_nothing_renderable() {
		let result = result_of(&[(Currency::Usd, f64::NAN)]);
		assert!(CardReporter::new(3)
			.render(&result)
			.ends_with("(nothing to show)\n"));
	}
}
