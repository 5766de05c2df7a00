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

//! JSON payloads exchanged with the backend.
//!
//! Responses are decoded in two steps: the raw body is first checked for an
//! `{error}` payload or `success: false`, and only then decoded into the
//! typed response.

use std::path::PathBuf;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    api::ApiError,
    model::{EpisodeNumber, Track},
};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of `GET /api/episodes/{n}/tracks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TracksResponse {
    pub(crate) tracks: Vec<Track>,
    #[serde(default)]
    pub(crate) first_time: Option<String>,
}

/// Body of `POST /api/episodes/{n}/tracks/shift`.
///
/// A `None` end index is sent as `null` and means "to the end of the
/// episode".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShiftRequest {
    pub(crate) start_index: usize,
    pub(crate) end_index: Option<usize>,
    pub(crate) delta_seconds: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub(crate) url: String,
}

/// Parameters of an M3U playlist import.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct M3uImport {
    pub(crate) path: PathBuf,
    pub(crate) episode: EpisodeNumber,
    pub(crate) start_datetime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct M3uImportSummary {
    #[serde(default)]
    pub(crate) tracks_imported: u32,
    #[serde(default)]
    pub(crate) metadata_extracted: u32,
    #[serde(default)]
    pub(crate) duration_updates: u32,
    pub(crate) episode_number: EpisodeNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EpisodeImportSummary {
    #[serde(default)]
    pub(crate) tracks_imported: u32,
}

/// Builds the error for a non-2xx response, preferring the backend's own
/// `{error}` message.
pub(crate) fn status_error(status: u16, reason: Option<&str>, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_message)
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

    ApiError::Backend { status, message }
}

/// Decodes a successful response body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    reject_failure(status, &value)?;
    Ok(serde_json::from_value(value)?)
}

/// Checks a successful response whose body carries no data of interest.
///
/// Empty or non-JSON bodies are accepted, the status already said the
/// request succeeded.
pub(crate) fn check(status: u16, body: &str) -> Result<(), ApiError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => reject_failure(status, &value),
        Err(_) => Ok(()),
    }
}

fn reject_failure(status: u16, value: &Value) -> Result<(), ApiError> {
    if let Some(message) = error_message(value) {
        return Err(ApiError::Backend { status, message });
    }

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Backend {
            status,
            message: UNKNOWN_ERROR.to_string(),
        });
    }

    Ok(())
}

fn error_message(value: &Value) -> Option<String> {
    value.get("error").and_then(Value::as_str).map(str::to_string)
}
