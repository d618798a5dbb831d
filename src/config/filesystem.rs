/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = ".config/cambio/config.toml";

/// Fetches the config from the given path, or default path if none. The
/// default file is created empty when missing; a custom path must exist.
pub fn get_config(custom_config_path: Option<&String>) -> Result<Config, Error> {
	let config_path = match custom_config_path {
		None => home_dir()
			.ok_or_else(|| anyhow!("Unable to determine home directory"))?
			.join(DEFAULT_CONFIG_PATH),
		Some(p) => PathBuf::from(p),
	};

	// create empty config file if it doesn't exist
	if !config_path.exists() && custom_config_path.is_none() {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent)?;
		}
		File::create(&config_path)?;
	}

	read_config(&config_path)
}

fn read_config(path: &Path) -> Result<Config, Error> {
	let content = fs::read_to_string(path).map_err(|e| {
		anyhow!("failed to read config {}: {}", path.display(), e)
	})?;

	toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))
}
