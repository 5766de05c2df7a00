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

//! Backend REST interface.
//!
//! Every read and write of episode and track data goes through the
//! [`TrackApi`] trait. The production implementation, [`HttpTrackApi`], talks
//! JSON over HTTP to the track database service; tests substitute an
//! in-memory backend with the same positional semantics.

mod http;
pub(crate) mod wire;

#[cfg(test)]
pub(crate) mod fake;

use std::path::Path;

use thiserror::Error;

use crate::model::{EpisodeNumber, TrackRecord, export::EpisodeExport};

pub(crate) use http::HttpTrackApi;
pub(crate) use wire::{
    EpisodeImportSummary, M3uImport, M3uImportSummary, ShiftRequest, TracksResponse,
};

/// Failures at the backend boundary.
#[derive(Error, Debug)]
pub(crate) enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an `{error}` payload, a non-2xx status or
    /// `success: false`.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The CRUD surface of the track database service.
///
/// Writes are never applied to local state by the caller; after any
/// successful mutation the episode is fetched again so that ids and ordering
/// always come from the backend.
pub(crate) trait TrackApi: Send {
    fn list_episodes(&self) -> Result<Vec<EpisodeNumber>, ApiError>;

    fn delete_episode(&self, episode: EpisodeNumber) -> Result<(), ApiError>;

    fn fetch_tracks(&self, episode: EpisodeNumber) -> Result<TracksResponse, ApiError>;

    fn create_track(&self, episode: EpisodeNumber, record: &TrackRecord) -> Result<(), ApiError>;

    fn update_track(
        &self,
        episode: EpisodeNumber,
        track_id: &str,
        record: &TrackRecord,
    ) -> Result<(), ApiError>;

    fn delete_track(&self, episode: EpisodeNumber, track_id: &str) -> Result<(), ApiError>;

    /// Adds `delta_seconds` to every track whose position in the backend's
    /// start-time order lies in `[start_index, end_index)`.
    fn shift_tracks(&self, episode: EpisodeNumber, request: &ShiftRequest) -> Result<(), ApiError>;

    /// Uploads an audio file and returns the url it is served from.
    fn upload_audio(&self, path: &Path) -> Result<String, ApiError>;

    fn import_m3u(&self, import: &M3uImport) -> Result<M3uImportSummary, ApiError>;

    /// Replaces every track of `episode` with the tracks of `document`.
    fn import_episode(
        &self,
        episode: EpisodeNumber,
        document: &EpisodeExport,
    ) -> Result<EpisodeImportSummary, ApiError>;

    /// Resolves a url returned by the backend into one the player can open.
    fn media_url(&self, url: &str) -> String {
        url.to_string()
    }
}
