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

//! Ordered cache of the current episode's tracks.
//!
//! The store is the single source of truth for rendering and editing. It is
//! only ever replaced wholesale by a fresh fetch from the backend; writes go
//! straight to the backend and are followed by a reload, so ids and ordering
//! always match what the backend holds.
//!
//! Loading is split across the task boundary: [`fetch_episode`] runs on the
//! worker and returns the sorted list, [`TrackStore::replace`] installs it on
//! the UI thread.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    api::{ApiError, ShiftRequest, TrackApi},
    model::{EpisodeNumber, Track, TrackRecord, export::parse_first_time},
};

/// A freshly fetched episode, already in authoritative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LoadedEpisode {
    pub(crate) episode: EpisodeNumber,
    pub(crate) tracks: Vec<Track>,
    pub(crate) first_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub(crate) struct TrackStore {
    episode: Option<EpisodeNumber>,
    tracks: Vec<Track>,
    first_time: Option<DateTime<Utc>>,
}

impl TrackStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn episode(&self) -> Option<EpisodeNumber> {
        self.episode
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub(crate) fn first_time(&self) -> Option<DateTime<Utc>> {
        self.first_time
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Position of the track with the given id in the current order.
    pub(crate) fn index_of(&self, track_id: &str) -> Option<usize> {
        self.tracks
            .iter()
            .position(|t| t.id.as_deref() == Some(track_id))
    }

    /// Installs a fetched episode and returns the new authoritative order.
    pub(crate) fn replace(&mut self, loaded: LoadedEpisode) -> &[Track] {
        self.episode = Some(loaded.episode);
        self.tracks = loaded.tracks;
        self.first_time = loaded.first_time;
        &self.tracks
    }

    /// Switches to an episode with no tracks yet.
    pub(crate) fn start_episode(&mut self, episode: EpisodeNumber) {
        self.episode = Some(episode);
        self.tracks.clear();
        self.first_time = None;
    }

    pub(crate) fn clear(&mut self) {
        self.episode = None;
        self.tracks.clear();
        self.first_time = None;
    }
}

/// Fetches an episode's tracks and sorts them by start time.
///
/// The sort is stable so tracks sharing a start time keep the order the
/// backend returned them in.
pub(crate) fn fetch_episode(
    api: &dyn TrackApi,
    episode: EpisodeNumber,
) -> Result<LoadedEpisode, ApiError> {
    let response = api.fetch_tracks(episode)?;

    let mut tracks = response.tracks;
    tracks.sort_by(|a, b| a.start_or_zero().total_cmp(&b.start_or_zero()));

    debug!(episode, count = tracks.len(), "fetched tracks");

    Ok(LoadedEpisode {
        episode,
        tracks,
        first_time: response.first_time.as_deref().and_then(parse_first_time),
    })
}

/// Creates the track when it has no id, otherwise replaces the stored record
/// in full.
pub(crate) fn save(api: &dyn TrackApi, episode: EpisodeNumber, track: &Track) -> Result<(), ApiError> {
    let record = TrackRecord::from(track);

    match track.id.as_deref() {
        Some(id) => {
            api.update_track(episode, id, &record)?;
            info!(episode, id, "track updated");
        }
        None => {
            api.create_track(episode, &record)?;
            info!(episode, title = %record.title, "track created");
        }
    }

    Ok(())
}

pub(crate) fn remove(api: &dyn TrackApi, episode: EpisodeNumber, track_id: &str) -> Result<(), ApiError> {
    api.delete_track(episode, track_id)?;
    info!(episode, id = track_id, "track deleted");
    Ok(())
}

/// Shifts the tracks at positions `[start_index, end_index)` by
/// `delta_seconds`, with `None` meaning "to the end of the episode".
///
/// Positions refer to the backend's start-time order, which matches the
/// store only straight after a reload.
pub(crate) fn shift(
    api: &dyn TrackApi,
    episode: EpisodeNumber,
    start_index: usize,
    end_index: Option<usize>,
    delta_seconds: f64,
) -> Result<(), ApiError> {
    let request = ShiftRequest {
        start_index,
        end_index,
        delta_seconds,
    };
    api.shift_tracks(episode, &request)?;
    info!(episode, start_index, ?end_index, delta_seconds, "tracks shifted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeTrackApi};

    #[test]
    fn load_sorts_by_start_time() {
        let api = FakeTrackApi::new().with_tracks(1, &[30.0, 5.0, 20.0, 0.0]);

        let loaded = fetch_episode(&api, 1).unwrap();
        let starts: Vec<f64> = loaded.tracks.iter().map(|t| t.start_or_zero()).collect();

        assert_eq!(starts, vec![0.0, 5.0, 20.0, 30.0]);
    }

    #[test]
    fn load_keeps_backend_order_for_ties() {
        let api = FakeTrackApi::new().with_tracks(1, &[10.0, 5.0, 10.0, 10.0]);

        let loaded = fetch_episode(&api, 1).unwrap();
        let titles: Vec<&str> = loaded.tracks.iter().map(|t| t.title.as_str()).collect();

        assert_eq!(titles, vec!["Track 1", "Track 0", "Track 2", "Track 3"]);
    }

    #[test]
    fn load_sorts_missing_start_times_as_zero() {
        let api = FakeTrackApi::new().with_tracks(1, &[10.0]);
        api.create_track(1, &TrackRecord {
            title: "Unplaced".into(),
            ..TrackRecord::default()
        })
        .unwrap();

        let loaded = fetch_episode(&api, 1).unwrap();

        assert_eq!(loaded.tracks[0].title, "Unplaced");
        assert_eq!(loaded.tracks[0].start_time_seconds, None);
    }

    #[test]
    fn load_parses_first_time() {
        let api = FakeTrackApi::new()
            .with_tracks(1, &[0.0])
            .with_first_time("2024-01-01T10:00:00Z");

        let loaded = fetch_episode(&api, 1).unwrap();

        assert_eq!(
            loaded.first_time.map(|t| t.to_rfc3339()),
            Some("2024-01-01T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn failed_fetch_leaves_store_untouched() {
        let api = FakeTrackApi::new().with_tracks(1, &[1.0, 2.0]);
        let mut store = TrackStore::new();
        store.replace(fetch_episode(&api, 1).unwrap());

        api.fail("fetch");
        assert!(fetch_episode(&api, 1).is_err());

        assert_eq!(store.episode(), Some(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_returns_new_order() {
        let mut store = TrackStore::new();
        let loaded = LoadedEpisode {
            episode: 4,
            tracks: vec![Track::default(), Track::default()],
            first_time: None,
        };

        assert_eq!(store.replace(loaded).len(), 2);
        assert_eq!(store.episode(), Some(4));
    }

    #[test]
    fn save_creates_without_id_and_replaces_with_id() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);
        let existing = fetch_episode(&api, 1).unwrap().tracks.remove(0);

        let new_track = Track {
            title: "New".into(),
            start_time_seconds: Some(42.0),
            ..Track::default()
        };
        save(&api, 1, &new_track).unwrap();

        let moved = Track {
            start_time_seconds: Some(7.0),
            ..existing.clone()
        };
        save(&api, 1, &moved).unwrap();

        let calls = api.calls.borrow().clone();
        assert_eq!(calls[1], Call::Create(1));
        assert_eq!(calls[2], Call::Update(1, existing.id.clone().unwrap(), 7.0));
        assert_eq!(api.start_times(1), vec![7.0, 42.0]);
    }

    #[test]
    fn failed_save_reports_backend_message() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);
        api.fail("create");

        let error = save(&api, 1, &Track::default()).unwrap_err();

        assert_eq!(error.to_string(), "create failed");
    }

    #[test]
    fn shift_to_end_moves_every_later_track() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0, 10.0, 20.0, 30.0]);

        shift(&api, 1, 2, None, 5.0).unwrap();

        assert_eq!(api.start_times(1), vec![0.0, 10.0, 25.0, 35.0]);
    }

    #[test]
    fn remove_then_reload_resynchronises() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0, 10.0]);
        let mut store = TrackStore::new();
        store.replace(fetch_episode(&api, 1).unwrap());
        let id = store.get(0).and_then(|t| t.id.clone()).unwrap();

        remove(&api, 1, &id).unwrap();
        store.replace(fetch_episode(&api, 1).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(store.index_of(&id), None);
    }
}
