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
use crate::session::conversion::ConversionError;
use std::collections::{BTreeMap, HashMap};

/// Per-field defaults for currencies missing from an otherwise good response.
const PARTIAL_DEFAULTS: [(Currency, f64); 3] = [
	(Currency::Ves, 60.0),
	(Currency::Cop, 4000.0),
	(Currency::Brl, 5.50),
];

/// Used wholesale when no rates could be fetched at all. Deliberately not the
/// same numbers as PARTIAL_DEFAULTS.
const OFFLINE_RATES: [(Currency, f64); 4] = [
	(Currency::Usdt, 1.0),
	(Currency::Ves, 60.0),
	(Currency::Cop, 4100.0),
	(Currency::Brl, 5.80),
];

/// Units of each currency per one unit of the pivot currency.
///
/// The pivot's own entry is always exactly 1 and cannot be overwritten; every
/// other entry takes whatever the user gives it, zero and negatives included.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
	rates: BTreeMap<Currency, f64>,
}

impl RateTable {
	fn with_rates(rates: &[(Currency, f64)]) -> Self {
		let mut table = BTreeMap::new();
		table.insert(Currency::PIVOT, 1.0);
		for (currency, rate) in rates {
			if !currency.is_pivot() {
				table.insert(*currency, *rate);
			}
		}

		Self { rates: table }
	}

	/// The table used when the rate source is unreachable.
	pub fn offline() -> Self {
		Self::with_rates(&OFFLINE_RATES)
	}

	/// Builds a table from a remote code -> rate mapping. USDT is pegged to
	/// the pivot rather than read from the remote.
	pub fn from_remote(remote: &HashMap<String, f64>) -> Self {
		let mut rates = vec![(Currency::Usdt, 1.0)];
		for (currency, default) in PARTIAL_DEFAULTS {
			let rate = remote.get(currency.code()).copied().unwrap_or(default);
			rates.push((currency, rate));
		}

		Self::with_rates(&rates)
	}

	pub fn get(&self, currency: Currency) -> Option<f64> {
		self.rates.get(&currency).copied()
	}

	/// Overwrites a single rate. The pivot is read-only.
	pub fn set(
		&mut self,
		currency: Currency,
		rate: f64,
	) -> Result<(), ConversionError> {
		if currency.is_pivot() {
			return Err(ConversionError::PivotIsReadOnly);
		}

		self.rates.insert(currency, rate);
		Ok(())
	}

	/// Entries in table order.
	pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
		self.rates.iter().map(|(c, r)| (*c, *r))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_offline_table() {
		let table = RateTable::offline();
		let rates: Vec<(Currency, f64)> = table.iter().collect();
		assert_eq!(
			rates,
			vec![
				(Currency::Usd, 1.0),
				(Currency::Usdt, 1.0),
				(Currency::Ves, 60.0),
				(Currency::Cop, 4100.0),
				(Currency::Brl, 5.80),
			]
		);
	}

	#[test]
	fn test_from_remote_uses_remote_values() {
		let remote = HashMap::from([
			("VES".to_string(), 36.5),
			("COP".to_string(), 3950.25),
			("BRL".to_string(), 5.1),
			("EUR".to_string(), 0.92),
		]);
		let table = RateTable::from_remote(&remote);

		assert_eq!(table.iter().count(), 5);
		assert_eq!(table.get(Currency::Ves), Some(36.5));
		assert_eq!(table.get(Currency::Cop), Some(3950.25));
		assert_eq!(table.get(Currency::Brl), Some(5.1));
	}

	#[test]
	fn test_from_remote_partial_defaults() {
		let remote = HashMap::from([("VES".to_string(), 40.0)]);
		let table = RateTable::from_remote(&remote);

		assert_eq!(table.get(Currency::Ves), Some(40.0));
		// distinct from the offline table's 4100
		assert_eq!(table.get(Currency::Cop), Some(4000.0));
		assert_eq!(table.get(Currency::Brl), Some(5.50));
	}

	#[test]
	fn test_remote_cannot_move_pegged_rates() {
		let remote = HashMap::from([
			("USD".to_string(), 2.0),
			("USDT".to_string(), 0.99),
		]);
		let table = RateTable::from_remote(&remote);

		assert_eq!(table.get(Currency::Usd), Some(1.0));
		assert_eq!(table.get(Currency::Usdt), Some(1.0));
	}

	#[test]
	fn test_set_rejects_pivot() {
		let mut table = RateTable::offline();
		assert_eq!(
			table.set(Currency::Usd, 2.0),
			Err(ConversionError::PivotIsReadOnly)
		);
		assert_eq!(table.get(Currency::Usd), Some(1.0));
	}

	#[test]
	fn test_set_accepts_degenerate_values() {
		let mut table = RateTable::offline();
		assert!(table.set(Currency::Ves, 0.0).is_ok());
		assert!(table.set(Currency::Cop, -1.0).is_ok());
		assert_eq!(table.get(Currency::Ves), Some(0.0));
		assert_eq!(table.get(Currency::Cop), Some(-1.0));
	}
}
