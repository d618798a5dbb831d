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
use anyhow::{bail, Error};

/// Renders a value with two decimal places and comma thousands separators,
/// e.g. 1234567.891 -> "1,234,567.89". Non-finite values have no rendering.
pub fn format_amount(value: f64) -> Option<String> {
	if !value.is_finite() {
		return None;
	}

	let fixed = format!("{:.2}", value.abs());
	let (int_part, frac_part) =
		fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

	let mut int_str = int_part.to_string();
	let mut i = int_str.len() as isize - 3;
	while i > 0 {
		int_str.insert(i as usize, ',');
		i -= 3;
	}

	// -0.001 rounds to "0.00"; don't print it as negative
	let is_negative = value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');

	if is_negative {
		Some(format!("-{}.{}", int_str, frac_part))
	} else {
		Some(format!("{}.{}", int_str, frac_part))
	}
}

/// Parses a user-entered number. Accepts comma thousands separators; rejects
/// anything non-finite.
pub fn parse_number(input: &str) -> Result<f64, Error> {
	let cleaned: String = input.trim().chars().filter(|&c| c != ',').collect();
	let value: f64 = match cleaned.parse() {
		Ok(v) => v,
		Err(_) => bail!("not a number: {}", input.trim()),
	};

	if !value.is_finite() {
		bail!("not a finite number: {}", input.trim());
	}

	Ok(value)
}
