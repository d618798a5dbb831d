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
use crate::reports::table::Table;

pub struct RateReporter<'a> {
	table: &'a RateTable,
}

impl<'a> RateReporter<'a> {
	pub fn new(table: &'a RateTable) -> Self {
		Self { table }
	}

	pub fn render(&self) -> String {
		let per_pivot = format!("Per {}", Currency::PIVOT);

		let mut table = Table::new(3);
		table.right_align(vec![1]);
		table.add_header(vec!["Code", per_pivot.as_str(), "Mode"]);
		table.add_separator();

		for (currency, rate) in self.table.iter() {
			// rates are shown exactly as stored, not rounded
			let rate = rate.to_string();
			table.add_row(vec![
				currency.code(),
				rate.as_str(),
				if currency.is_pivot() {
					"pivot"
				} else {
					"editable"
				},
			]);
		}

		table.render()
	}
}
