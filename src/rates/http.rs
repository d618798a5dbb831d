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
use crate::rates::provider::FetchFailure;
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
}

impl Client {
	/// Every request made through this client, body included, is bounded by
	/// the timeout.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchFailure> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()?;

		Ok(Client {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	/// Sends a GET and decodes the JSON body. Errors on non-2xx response codes.
	pub fn get<R>(&self, endpoint: &str) -> Result<R, FetchFailure>
	where
		R: DeserializeOwned,
	{
		let url = format!("{}/{}", self.base_url, endpoint);

		debug!("Sending GET to {}", url);
		let response = self.client.request(Method::GET, &url).send()?;

		// Handle non-2xx response codes
		if !response.status().is_success() {
			return Err(FetchFailure::Status(response.status()));
		}

		let body = response.text()?;
		Ok(serde_json::from_str(&body)?)
	}
}
