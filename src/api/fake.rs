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

//! In-memory backend used by tests.
//!
//! Mirrors the track database service closely enough to exercise the
//! editor's synchronization rules: tracks are returned in insertion order,
//! shifts are positional over the start-time order, saves replace the whole
//! record and imports replace the whole episode.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    path::Path,
};

use crate::{
    api::{
        ApiError, EpisodeImportSummary, M3uImport, M3uImportSummary, ShiftRequest, TrackApi,
        TracksResponse,
    },
    model::{EpisodeNumber, Track, TrackRecord, export::EpisodeExport},
};

/// A backend call, as observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fetch(EpisodeNumber),
    Create(EpisodeNumber),
    Update(EpisodeNumber, String, f64),
    Delete(EpisodeNumber, String),
    Shift(EpisodeNumber, ShiftRequest),
    DeleteEpisode(EpisodeNumber),
    Import(EpisodeNumber),
}

#[derive(Default)]
pub(crate) struct FakeTrackApi {
    episodes: RefCell<BTreeMap<EpisodeNumber, Vec<Track>>>,
    next_row: Cell<u32>,
    first_time: RefCell<Option<String>>,
    pub(crate) calls: RefCell<Vec<Call>>,
    failing: RefCell<Vec<&'static str>>,
}

impl FakeTrackApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seeds an episode with tracks at the given start times, in that order.
    pub(crate) fn with_tracks(self, episode: EpisodeNumber, starts: &[f64]) -> Self {
        for (n, start) in starts.iter().enumerate() {
            let record = TrackRecord {
                unique_id: Some(format!("u{episode}-{n}")),
                title: format!("Track {n}"),
                artist: format!("Artist {n}"),
                length: "3:00".into(),
                start_time_seconds: Some(*start),
                ..TrackRecord::default()
            };
            self.insert(episode, &record);
        }
        self.calls.borrow_mut().clear();
        self
    }

    pub(crate) fn with_first_time(self, first_time: &str) -> Self {
        *self.first_time.borrow_mut() = Some(first_time.to_string());
        self
    }

    /// Makes every subsequent call of the named operation fail.
    pub(crate) fn fail(&self, operation: &'static str) {
        self.failing.borrow_mut().push(operation);
    }

    /// Start times of an episode in the backend's own order.
    pub(crate) fn start_times(&self, episode: EpisodeNumber) -> Vec<f64> {
        self.ordered(episode)
            .iter()
            .map(|t| t.start_or_zero())
            .collect()
    }

    pub(crate) fn shift_calls(&self) -> Vec<ShiftRequest> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Shift(_, request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    fn guard(&self, operation: &'static str) -> Result<(), ApiError> {
        if self.failing.borrow().contains(&operation) {
            return Err(ApiError::Backend {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    fn insert(&self, episode: EpisodeNumber, record: &TrackRecord) {
        let row = self.next_row.get() + 1;
        self.next_row.set(row);

        let track = Track {
            id: Some(
                record
                    .unique_id
                    .clone()
                    .unwrap_or_else(|| format!("rowid_{row}")),
            ),
            unique_id: record.unique_id.clone(),
            title: record.title.clone(),
            artist: record.artist.clone(),
            album: record.album.clone(),
            length: record.length.clone(),
            start_time_seconds: record.start_time_seconds,
            ignore: record.ignore,
            artwork_url: record.artwork_url.clone(),
        };

        self.episodes
            .borrow_mut()
            .entry(episode)
            .or_default()
            .push(track);
    }

    fn ordered(&self, episode: EpisodeNumber) -> Vec<Track> {
        let mut tracks = self
            .episodes
            .borrow()
            .get(&episode)
            .cloned()
            .unwrap_or_default();
        tracks.sort_by(|a, b| a.start_or_zero().total_cmp(&b.start_or_zero()));
        tracks
    }
}

impl TrackApi for FakeTrackApi {
    fn list_episodes(&self) -> Result<Vec<EpisodeNumber>, ApiError> {
        self.guard("list")?;
        Ok(self.episodes.borrow().keys().rev().copied().collect())
    }

    fn delete_episode(&self, episode: EpisodeNumber) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::DeleteEpisode(episode));
        self.guard("delete_episode")?;
        self.episodes.borrow_mut().remove(&episode);
        Ok(())
    }

    fn fetch_tracks(&self, episode: EpisodeNumber) -> Result<TracksResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Fetch(episode));
        self.guard("fetch")?;
        Ok(TracksResponse {
            tracks: self
                .episodes
                .borrow()
                .get(&episode)
                .cloned()
                .unwrap_or_default(),
            first_time: self.first_time.borrow().clone(),
        })
    }

    fn create_track(&self, episode: EpisodeNumber, record: &TrackRecord) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Create(episode));
        self.guard("create")?;
        self.insert(episode, record);
        Ok(())
    }

    fn update_track(
        &self,
        episode: EpisodeNumber,
        track_id: &str,
        record: &TrackRecord,
    ) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Update(
            episode,
            track_id.to_string(),
            record.start_time_seconds.unwrap_or_default(),
        ));
        self.guard("update")?;

        let mut episodes = self.episodes.borrow_mut();
        let track = episodes
            .get_mut(&episode)
            .and_then(|tracks| {
                tracks
                    .iter_mut()
                    .find(|t| t.id.as_deref() == Some(track_id))
            })
            .ok_or_else(|| ApiError::Backend {
                status: 404,
                message: "Track not found".into(),
            })?;

        track.unique_id = record.unique_id.clone();
        track.title = record.title.clone();
        track.artist = record.artist.clone();
        track.album = record.album.clone();
        track.length = record.length.clone();
        track.start_time_seconds = record.start_time_seconds;
        track.ignore = record.ignore;
        track.artwork_url = record.artwork_url.clone();

        Ok(())
    }

    fn delete_track(&self, episode: EpisodeNumber, track_id: &str) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Delete(episode, track_id.to_string()));
        self.guard("delete")?;
        if let Some(tracks) = self.episodes.borrow_mut().get_mut(&episode) {
            tracks.retain(|t| t.id.as_deref() != Some(track_id));
        }
        Ok(())
    }

    fn shift_tracks(&self, episode: EpisodeNumber, request: &ShiftRequest) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Shift(episode, *request));
        self.guard("shift")?;

        let ordered_ids: Vec<Option<String>> =
            self.ordered(episode).into_iter().map(|t| t.id).collect();
        let end = request
            .end_index
            .unwrap_or(ordered_ids.len())
            .min(ordered_ids.len());

        if let Some(tracks) = self.episodes.borrow_mut().get_mut(&episode) {
            for id in ordered_ids.iter().take(end).skip(request.start_index) {
                if let Some(track) = tracks.iter_mut().find(|t| &t.id == id) {
                    if let Some(start) = track.start_time_seconds.as_mut() {
                        *start += request.delta_seconds;
                    }
                }
            }
        }

        Ok(())
    }

    fn upload_audio(&self, path: &Path) -> Result<String, ApiError> {
        self.guard("upload")?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(format!("/api/audio/{name}"))
    }

    fn import_m3u(&self, import: &M3uImport) -> Result<M3uImportSummary, ApiError> {
        self.guard("m3u")?;
        Ok(M3uImportSummary {
            episode_number: import.episode,
            ..M3uImportSummary::default()
        })
    }

    fn import_episode(
        &self,
        episode: EpisodeNumber,
        document: &EpisodeExport,
    ) -> Result<EpisodeImportSummary, ApiError> {
        self.calls.borrow_mut().push(Call::Import(episode));
        self.guard("import")?;

        self.episodes.borrow_mut().remove(&episode);
        for record in &document.tracks {
            self.insert(episode, record);
        }

        Ok(EpisodeImportSummary {
            tracks_imported: document.tracks.len() as u32,
        })
    }
}
