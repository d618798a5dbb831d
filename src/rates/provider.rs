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
use crate::rates::http::Client;
use crate::rates::models::LatestRates;
use crate::rates::rate_table::RateTable;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything that can go wrong while retrieving rates. Callers recover from
/// all of these the same way, so they are kept as one type.
#[derive(Debug, Error)]
pub enum FetchFailure {
	#[error("rate source disabled")]
	Offline,

	#[error("rate request timed out")]
	Timeout,

	#[error("rate request failed: {0}")]
	Network(reqwest::Error),

	#[error("rate source responded with status {0}")]
	Status(StatusCode),

	#[error("malformed rate response: {0}")]
	Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchFailure {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() {
			FetchFailure::Timeout
		} else {
			FetchFailure::Network(e)
		}
	}
}

/// Somewhere current rates can be fetched from. One attempt per call; no
/// retries.
pub trait RateSource {
	fn fetch(&self) -> Result<RateTable, FetchFailure>;
}

/// Reads the latest pivot-based rates from an exchangerate-api style
/// endpoint.
pub struct HttpRateSource {
	http: Client,
}

impl HttpRateSource {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchFailure> {
		Ok(Self {
			http: Client::new(base_url, timeout)?,
		})
	}
}

impl RateSource for HttpRateSource {
	fn fetch(&self) -> Result<RateTable, FetchFailure> {
		let latest: LatestRates =
			self.http.get(&format!("latest/{}", Currency::PIVOT))?;
		Ok(RateTable::from_remote(&latest.rates))
	}
}

/// Never reaches the network; the session falls back to offline rates.
pub struct OfflineSource;

impl RateSource for OfflineSource {
	fn fetch(&self) -> Result<RateTable, FetchFailure> {
		Err(FetchFailure::Offline)
	}
}
