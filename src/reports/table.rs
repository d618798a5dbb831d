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

/// Plain-text table used by every report. Rows may have fewer cells than the
/// table has columns; the missing cells are simply not drawn.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
	PartialSeparator(Vec<bool>), // indicates columns by index
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows
			.push(Row::Data(row.into_iter().map(|s| s.to_string()).collect()));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Adds a partial separator row for selected columns.
	pub fn add_partial_separator(&mut self, indices: Vec<usize>) {
		let mut cols = vec![false; self.column_count];
		for i in indices {
			cols[i] = true;
		}
		self.rows.push(Row::PartialSeparator(cols));
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	/// Renders every row, one line each, without trailing whitespace.
	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			if let Row::Data(data_row) | Row::Header(data_row) = row {
				for (i, value) in data_row.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(header_row) => {
					self.centered_row(&max_widths, header_row, " | ")
				},
				Row::Data(data_row) => {
					self.data_row(&max_widths, data_row, "   ")
				},
				Row::Separator => self.separator(&max_widths),
				Row::PartialSeparator(data_sep) => {
					self.partial_separator(&max_widths, data_sep)
				},
			};
			out.push_str(line.trim_end());
			out.push('\n');
		}

		out
	}

	fn data_row(
		&self,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) -> String {
		let cells: Vec<String> = data_row
			.iter()
			.enumerate()
			.map(|(i, value)| {
				if self.right_align[i] {
					format!("{:>width$}", value, width = max_widths[i])
				} else {
					format!("{:<width$}", value, width = max_widths[i])
				}
			})
			.collect();

		cells.join(separator)
	}

	fn centered_row(
		&self,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) -> String {
		let cells: Vec<String> = data_row
			.iter()
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect();

		cells.join(separator)
	}

	fn separator(&self, max_widths: &[usize]) -> String {
		let total_width: usize =
			max_widths.iter().sum::<usize>() + (3 * (self.column_count - 1));
		"-".repeat(total_width)
	}

	fn partial_separator(
		&self,
		max_widths: &[usize],
		data_sep: &[bool],
	) -> String {
		let cells: Vec<String> = data_sep
			.iter()
			.enumerate()
			.map(|(i, draw)| {
				if *draw {
					"-".repeat(max_widths[i])
				} else {
					" ".repeat(max_widths[i])
				}
			})
			.collect();

		// Spacing between columns
		cells.join("   ")
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = value.chars().count();
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_aligns_columns() {
		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_header(vec!["Code", "Rate"]);
		table.add_separator();
		table.add_row(vec!["VES", "60"]);
		table.add_row(vec!["COP", "4100"]);

		assert_eq!(
			table.render(),
			"Code | Rate\n-----------\nVES      60\nCOP    4100\n"
		);
	}

	#[test]
	fn test_short_rows_and_partial_separators() {
		let mut table = Table::new(3);
		table.add_header(vec!["A", "B", "C"]);
		table.add_partial_separator(vec![0, 1, 2]);
		table.add_header(vec!["D"]);
		table.add_partial_separator(vec![0]);

		assert_eq!(table.render(), "A | B | C\n-   -   -\nD\n-\n");
	}

	#[test]
	fn test_center_align_pads_right_first() {
		assert_eq!(Table::center_align("USD", 6), " USD  ");
		assert_eq!(Table::center_align("USDT", 2), "USDT");
	}
}
