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

//! HTTP implementation of the backend interface.
//!
//! Requests are issued with a blocking `reqwest` client from the task worker
//! thread, so the UI thread never waits on the network. Timeouts are the
//! client defaults and nothing is retried.

use std::path::Path;

use reqwest::blocking::{Client, RequestBuilder, multipart::Form};
use tracing::debug;

use crate::{
    api::{
        ApiError, EpisodeImportSummary, M3uImport, M3uImportSummary, ShiftRequest, TrackApi,
        TracksResponse,
        wire::{self, UploadResponse},
    },
    model::{EpisodeNumber, TrackRecord, export::EpisodeExport},
};

pub(crate) struct HttpTrackApi {
    client: Client,
    base_url: String,
}

impl HttpTrackApi {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the status and body of a 2xx response.
    fn send(&self, request: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        debug!(status = status.as_u16(), bytes = body.len(), "backend response");

        if !status.is_success() {
            return Err(wire::status_error(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ));
        }

        Ok((status.as_u16(), body))
    }
}

impl TrackApi for HttpTrackApi {
    fn list_episodes(&self) -> Result<Vec<EpisodeNumber>, ApiError> {
        let (status, body) = self.send(self.client.get(self.url("/api/episodes")))?;
        wire::decode(status, &body)
    }

    fn delete_episode(&self, episode: EpisodeNumber) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}"));
        let (status, body) = self.send(self.client.delete(url))?;
        wire::check(status, &body)
    }

    fn fetch_tracks(&self, episode: EpisodeNumber) -> Result<TracksResponse, ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/tracks"));
        let (status, body) = self.send(self.client.get(url))?;
        wire::decode(status, &body)
    }

    fn create_track(&self, episode: EpisodeNumber, record: &TrackRecord) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/tracks"));
        let (status, body) = self.send(self.client.post(url).json(record))?;
        wire::check(status, &body)
    }

    fn update_track(
        &self,
        episode: EpisodeNumber,
        track_id: &str,
        record: &TrackRecord,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/tracks/{track_id}"));
        let (status, body) = self.send(self.client.put(url).json(record))?;
        wire::check(status, &body)
    }

    fn delete_track(&self, episode: EpisodeNumber, track_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/tracks/{track_id}"));
        let (status, body) = self.send(self.client.delete(url))?;
        wire::check(status, &body)
    }

    fn shift_tracks(&self, episode: EpisodeNumber, request: &ShiftRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/tracks/shift"));
        let (status, body) = self.send(self.client.post(url).json(request))?;
        wire::check(status, &body)
    }

    fn upload_audio(&self, path: &Path) -> Result<String, ApiError> {
        let form = Form::new().file("file", path)?;
        let (status, body) = self.send(self.client.post(self.url("/api/upload")).multipart(form))?;
        let response: UploadResponse = wire::decode(status, &body)?;
        Ok(response.url)
    }

    fn import_m3u(&self, import: &M3uImport) -> Result<M3uImportSummary, ApiError> {
        let form = Form::new()
            .file("file", &import.path)?
            .text("episodeNumber", import.episode.to_string())
            .text("startDatetime", import.start_datetime.clone());
        let (status, body) =
            self.send(self.client.post(self.url("/api/import/m3u")).multipart(form))?;
        wire::decode(status, &body)
    }

    fn import_episode(
        &self,
        episode: EpisodeNumber,
        document: &EpisodeExport,
    ) -> Result<EpisodeImportSummary, ApiError> {
        let url = self.url(&format!("/api/episodes/{episode}/import"));
        let (status, body) = self.send(self.client.post(url).json(document))?;
        wire::decode(status, &body)
    }

    fn media_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        }
    }
}
