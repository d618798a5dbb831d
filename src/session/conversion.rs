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
use crate::rates::rate_table::RateTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
	#[error("unknown currency: {0}")]
	UnknownCurrency(String),

	#[error("{0} is not in the rate table")]
	InvalidSourceCurrency(Currency),

	#[error("{} is the pivot currency and cannot be edited", Currency::PIVOT)]
	PivotIsReadOnly,

	#[error("amount must be zero or greater, got {0}")]
	NegativeAmount(f64),

	#[error("amount must be a finite number, got {0}")]
	InvalidAmount(f64),

	#[error("{amount} {currency} is too large to convert")]
	AmountOutOfRange { currency: Currency, amount: f64 },

	#[error("cannot convert from {currency} at a rate of {rate}")]
	DegenerateRate { currency: Currency, rate: f64 },
}

/// What the user asked to convert. Not stored anywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionRequest {
	pub source: Currency,
	pub amount: f64,
}

impl ConversionRequest {
	pub fn new(source: Currency, amount: f64) -> Result<Self, ConversionError> {
		if !amount.is_finite() {
			return Err(ConversionError::InvalidAmount(amount));
		}
		if amount < 0.0 {
			return Err(ConversionError::NegativeAmount(amount));
		}

		Ok(Self { source, amount })
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Equivalent {
	pub currency: Currency,
	pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
	pub source: Currency,
	pub amount: f64,

	/// One per table entry other than the source, in table order.
	pub equivalents: Vec<Equivalent>,
}

/// Converts through the pivot: the amount is first expressed in pivot units,
/// then multiplied out by every other rate.
///
/// A zero or non-finite source rate is an error, as is an amount so large
/// that it overflows once expressed in pivot units. Bad target rates are not;
/// their values come back non-finite and it is up to the caller to decide how
/// to show them.
pub fn convert(
	table: &RateTable,
	request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
	let origin_rate = table
		.get(request.source)
		.ok_or(ConversionError::InvalidSourceCurrency(request.source))?;

	if origin_rate == 0.0 || !origin_rate.is_finite() {
		return Err(ConversionError::DegenerateRate {
			currency: request.source,
			rate: origin_rate,
		});
	}

	let amount_in_pivot = request.amount / origin_rate;
	if !amount_in_pivot.is_finite() {
		return Err(ConversionError::AmountOutOfRange {
			currency: request.source,
			amount: request.amount,
		});
	}

	let equivalents = table
		.iter()
		.filter(|(currency, _)| *currency != request.source)
		.map(|(currency, rate)| Equivalent {
			currency,
			value: amount_in_pivot * rate,
		})
		.collect();

	Ok(ConversionResult {
		source: request.source,
		amount: request.amount,
		equivalents,
	})
}
