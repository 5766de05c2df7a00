// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! Stored with `confy` under the application name, so it lives in the
//! platform's usual configuration directory. A missing or unreadable file
//! falls back to the defaults.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_NAME: &str = "trackedit";

const LOG_FILE_NAME: &str = "trackedit.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// Base url of the track database service.
    pub(crate) server_url: String,
    /// Initial timeline zoom in pixels per second.
    pub(crate) default_zoom: f64,
    pub(crate) nudge_seconds: f64,
    pub(crate) coarse_nudge_seconds: f64,
    /// Where episode exports are written when no path is given.
    pub(crate) export_dir: PathBuf,
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server_url: "http://localhost:5000".into(),
            default_zoom: 20.0,
            nudge_seconds: 1.0,
            coarse_nudge_seconds: 10.0,
            export_dir: PathBuf::from("."),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// The log file, defaulting to one beside the configuration file.
    pub(crate) fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }

        confy::get_configuration_file_path(CONFIG_NAME, None)
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join(LOG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
    }
}

/// Loads the configuration, falling back to defaults.
///
/// Runs before logging is up, so a load failure is handed back for the
/// caller to log once it can.
pub(crate) fn load_config() -> (AppConfig, Option<String>) {
    or_defaults(confy::load(CONFIG_NAME, None))
}

fn or_defaults<E: fmt::Display>(loaded: Result<AppConfig, E>) -> (AppConfig, Option<String>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e.to_string())),
    }
}
