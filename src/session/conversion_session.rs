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
use crate::rates::provider::RateSource;
use crate::rates::rate_table::RateTable;
use crate::session::conversion::{
	convert, ConversionError, ConversionRequest, ConversionResult,
};
use chrono::{DateTime, Local};
use log::{info, warn};
use std::fmt;

/// Where the current table came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateOrigin {
	Live,
	Offline,
}

impl fmt::Display for RateOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RateOrigin::Live => write!(f, "live"),
			RateOrigin::Offline => write!(f, "offline"),
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct LoadState {
	pub origin: RateOrigin,
	pub loaded_at: DateTime<Local>,
}

/// Owns the rate table for the lifetime of one user's session. The table is
/// fetched lazily on first use, edited in place afterwards, and only ever
/// replaced wholesale by refresh().
pub struct ConversionSession {
	source: Box<dyn RateSource>,
	table: Option<RateTable>,
	load_state: Option<LoadState>,
}

impl ConversionSession {
	pub fn new(source: Box<dyn RateSource>) -> Self {
		Self {
			source,
			table: None,
			load_state: None,
		}
	}

	/// Fetches the table if this session has none yet; otherwise just
	/// returns the existing one.
	pub fn initialize(&mut self) -> &RateTable {
		self.table_mut()
	}

	/// Overwrites one rate. Takes effect for every later conversion until the
	/// next refresh.
	pub fn set_rate(
		&mut self,
		currency: Currency,
		rate: f64,
	) -> Result<(), ConversionError> {
		self.table_mut().set(currency, rate)
	}

	/// Replaces the whole table with a fresh fetch, dropping any edits.
	pub fn refresh(&mut self) {
		let table = self.load();
		self.table = Some(table);
	}

	pub fn convert(
		&mut self,
		request: &ConversionRequest,
	) -> Result<ConversionResult, ConversionError> {
		convert(self.initialize(), request)
	}

	/// None until the table has been loaded.
	pub fn load_state(&self) -> Option<LoadState> {
		self.load_state
	}

	fn table_mut(&mut self) -> &mut RateTable {
		let table = match self.table.take() {
			Some(table) => table,
			None => self.load(),
		};
		self.table.insert(table)
	}

	fn load(&mut self) -> RateTable {
		let (table, origin) = match self.source.fetch() {
			Ok(table) => {
				info!("Loaded live exchange rates");
				(table, RateOrigin::Live)
			},
			Err(e) => {
				warn!("No connection, using offline mode ({})", e);
				(RateTable::offline(), RateOrigin::Offline)
			},
		};

		self.load_state = Some(LoadState {
			origin,
			loaded_at: Local::now(),
		});

		table
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rates::provider::FetchFailure;
	use approx::assert_relative_eq;
	use std::cell::Cell;
	use log::{Level, LevelFilter, Log, Metadata, Record};
	use std::collections::HashMap;
	use std::rc::Rc;
	use std::sync::Mutex;

	/// Keeps every warning logged while tests run.
	struct WarningLog;

	static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
	static WARNING_LOG: WarningLog = WarningLog;

	impl Log for WarningLog {
		fn enabled(&self, metadata: &Metadata) -> bool {
			metadata.level() <= Level::Warn
		}

		fn log(&self, record: &Record) {
			if self.enabled(record.metadata()) {
				WARNINGS.lock().unwrap().push(record.args().to_string());
			}
		}

		fn flush(&self) {}
	}

	fn capture_warnings() {
		// only the first call installs it; later ones share the same log
		if log::set_logger(&WARNING_LOG).is_ok() {
			log::set_max_level(LevelFilter::Warn);
		}
	}

	/// Serves the given tables in order, failing once they run out. Counts
	/// every fetch.
	struct ScriptedSource {
		tables: Vec<RateTable>,
		calls: Rc<Cell<usize>>,
	}

	impl RateSource for ScriptedSource {
		fn fetch(&self) -> Result<RateTable, FetchFailure> {
			let n = self.calls.get();
			self.calls.set(n + 1);
			self.tables.get(n).cloned().ok_or(FetchFailure::Offline)
		}
	}

	fn live_table(ves: f64) -> RateTable {
		RateTable::from_remote(&HashMap::from([
			("VES".to_string(), ves),
			("COP".to_string(), 4000.0),
			("BRL".to_string(), 5.5),
		]))
	}

	fn session_with(
		tables: Vec<RateTable>,
	) -> (ConversionSession, Rc<Cell<usize>>) {
		let calls = Rc::new(Cell::new(0));
		let source = ScriptedSource {
			tables,
			calls: calls.clone(),
		};
		(ConversionSession::new(Box::new(source)), calls)
	}

	fn usd_from_ves(session: &mut ConversionSession, amount: f64) -> f64 {
		let request = ConversionRequest::new(Currency::Ves, amount).unwrap();
		session
			.convert(&request)
			.unwrap()
			.equivalents
			.iter()
			.find(|e| e.currency == Currency::Usd)
			.map(|e| e.value)
			.unwrap()
	}

	#[test]
	fn test_initialize_fetches_once() {
		let (mut session, calls) = session_with(vec![live_table(60.0)]);
		assert!(session.load_state().is_none());

		session.initialize();
		session.initialize();
		usd_from_ves(&mut session, 60.0);

		assert_eq!(calls.get(), 1);
		assert_eq!(session.load_state().unwrap().origin, RateOrigin::Live);
	}

	#[test]
	fn test_failed_fetch_uses_offline_table() {
		let (mut session, _) = session_with(vec![]);
		assert_eq!(*session.initialize(), RateTable::offline());
		assert_eq!(session.load_state().unwrap().origin, RateOrigin::Offline);
	}

	#[test]
	fn test_failed_fetch_warns() {
		capture_warnings();
		let (mut session, _) = session_with(vec![]);
		session.initialize();

		let expected = "No connection, using offline mode (rate source disabled)";
		let warnings = WARNINGS.lock().unwrap();
		assert!(warnings.iter().any(|w| w == expected));
	}

	#[test]
	fn test_edit_persists_until_refresh() {
		let (mut session, calls) =
			session_with(vec![live_table(60.0), live_table(50.0)]);

		session.set_rate(Currency::Ves, 75.0).unwrap();
		assert_relative_eq!(usd_from_ves(&mut session, 150.0), 2.0);
		assert_relative_eq!(usd_from_ves(&mut session, 7500.0), 100.0);

		session.refresh();
		assert_eq!(calls.get(), 2);
		assert_eq!(*session.initialize(), live_table(50.0));
		assert_relative_eq!(usd_from_ves(&mut session, 150.0), 3.0);
	}

	#[test]
	fn test_refresh_failure_falls_back() {
		let (mut session, _) = session_with(vec![live_table(60.0)]);
		session.set_rate(Currency::Brl, 6.0).unwrap();

		session.refresh();
		assert_eq!(*session.initialize(), RateTable::offline());
		assert_eq!(session.load_state().unwrap().origin, RateOrigin::Offline);
	}

	#[test]
	fn test_pivot_survives_edits_and_refreshes() {
		let (mut session, _) = session_with(vec![live_table(60.0)]);

		assert_eq!(
			session.set_rate(Currency::Usd, 3.0),
			Err(ConversionError::PivotIsReadOnly)
		);
		assert_eq!(session.initialize().get(Currency::Usd), Some(1.0));

		session.refresh();
		assert_eq!(session.initialize().get(Currency::Usd), Some(1.0));
	}

	#[test]
	fn test_zero_rate_keeps_session_usable() {
		let (mut session, _) = session_with(vec![live_table(60.0)]);
		session.set_rate(Currency::Ves, 0.0).unwrap();

		let request = ConversionRequest::new(Currency::Ves, 100.0).unwrap();
		assert!(matches!(
			session.convert(&request),
			Err(ConversionError::DegenerateRate { .. })
		));

		let request = ConversionRequest::new(Currency::Brl, 11.0).unwrap();
		let result = session.convert(&request).unwrap();
		assert_eq!(result.equivalents.len(), 4);
		assert_relative_eq!(result.equivalents[0].value, 2.0);
	}
}
