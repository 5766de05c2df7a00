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

//! Timeline markers and the drag-to-retime protocol.
//!
//! Every track that starts inside the loaded audio gets one marker on the
//! timeline. Markers are disposable: whenever the track list, the zoom level
//! or the audio duration changes they are all destroyed and rebuilt from the
//! store, and a map from track id to marker is rebuilt alongside them.
//!
//! Dragging a marker and dropping it produces a [`DragCommit`], which the
//! task worker persists with [`persist_drag`]. In cascade mode a non-zero
//! move also shifts every later track by the same delta, keeping their
//! relative spacing.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    api::{ApiError, TrackApi},
    model::{EpisodeNumber, Track, store},
};

/// How far short of the end of the audio a marker can be dragged, in seconds.
pub(crate) const END_MARGIN: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct MarkerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Marker {
    pub(crate) id: MarkerId,
    pub(crate) track_index: usize,
    pub(crate) track_id: Option<String>,
    pub(crate) label: String,
    pub(crate) ignore: bool,
    /// Where the marker currently sits, including an in-progress drag.
    pub(crate) time: f64,
    /// Time the next drag delta is measured from.
    original_time: f64,
}

impl Marker {
    pub(crate) fn original_time(&self) -> f64 {
        self.original_time
    }
}

/// The result of dropping a dragged marker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DragEnd {
    pub(crate) marker: MarkerId,
    pub(crate) track_index: usize,
    pub(crate) track_id: Option<String>,
    pub(crate) new_time: f64,
    pub(crate) delta: f64,
    pub(crate) cascade: bool,
}

/// Everything the worker needs to persist a dropped marker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DragCommit {
    pub(crate) episode: EpisodeNumber,
    pub(crate) index: usize,
    pub(crate) track: Track,
    pub(crate) new_time: f64,
    pub(crate) delta: f64,
    pub(crate) cascade: bool,
}

impl DragCommit {
    pub(crate) fn new(episode: EpisodeNumber, index: usize, track: Track, end: &DragEnd) -> Self {
        Self {
            episode,
            index,
            track,
            new_time: end.new_time,
            delta: end.delta,
            cascade: end.cascade,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MarkerSync {
    markers: Vec<Marker>,
    by_track: HashMap<String, MarkerId>,
    duration: Option<f64>,
    dragging: Option<MarkerId>,
    cascade: bool,
    next_id: u64,
}

impl MarkerSync {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Recreates one marker per track that starts inside the audio.
    ///
    /// Does nothing until a positive duration is known. Tracks starting at
    /// or after the end of the audio are skipped, audio and track data are
    /// edited independently and may disagree for a while. Returns the number
    /// of markers placed.
    pub(crate) fn rebuild(&mut self, tracks: &[Track], duration: Option<f64>) -> usize {
        let Some(duration) = duration.filter(|d| *d > 0.0) else {
            debug!("audio duration unknown, markers not rebuilt");
            return self.markers.len();
        };

        self.markers.clear();
        self.by_track.clear();
        self.dragging = None;
        self.duration = Some(duration);

        for (index, track) in tracks.iter().enumerate() {
            let Some(start) = track.start_time_seconds else {
                debug!(index, "track has no start time, no marker");
                continue;
            };
            if !(0.0..duration).contains(&start) {
                debug!(index, start, duration, "track starts outside the audio, no marker");
                continue;
            }

            let id = MarkerId(self.next_id);
            self.next_id += 1;

            if let Some(track_id) = &track.id {
                self.by_track.insert(track_id.clone(), id);
            }

            self.markers.push(Marker {
                id,
                track_index: index,
                track_id: track.id.clone(),
                label: track.display_title().to_string(),
                ignore: track.ignore,
                time: start,
                original_time: start,
            });
        }

        debug!(count = self.markers.len(), duration, "markers rebuilt");

        self.markers.len()
    }

    pub(crate) fn clear(&mut self) {
        self.markers.clear();
        self.by_track.clear();
        self.dragging = None;
        self.duration = None;
    }

    pub(crate) fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub(crate) fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    pub(crate) fn marker_for_track(&self, track_id: &str) -> Option<&Marker> {
        self.by_track.get(track_id).and_then(|id| self.marker(*id))
    }

    pub(crate) fn track_for_marker(&self, id: MarkerId) -> Option<&str> {
        self.marker(id).and_then(|m| m.track_id.as_deref())
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub(crate) fn dragging(&self) -> Option<MarkerId> {
        self.dragging
    }

    pub(crate) fn cascade(&self) -> bool {
        self.cascade
    }

    pub(crate) fn toggle_cascade(&mut self) -> bool {
        self.cascade = !self.cascade;
        self.cascade
    }

    /// Grabs a marker. Only one marker can be dragged at a time.
    pub(crate) fn begin_drag(&mut self, id: MarkerId) -> bool {
        if self.dragging.is_some() || self.marker(id).is_none() {
            return false;
        }
        self.dragging = Some(id);
        true
    }

    /// Moves the dragged marker by `delta` seconds, kept inside the audio.
    ///
    /// The upper bound stays [`END_MARGIN`] short of the duration, since a
    /// track starting at the very end gets no marker on the next rebuild.
    pub(crate) fn drag_by(&mut self, delta: f64) {
        let limit = self
            .duration
            .map_or(f64::MAX, |d| (d - END_MARGIN).max(0.0));
        if let Some(id) = self.dragging {
            if let Some(marker) = self.marker_mut(id) {
                marker.time = (marker.time + delta).clamp(0.0, limit);
            }
        }
    }

    /// Drops the dragged marker.
    ///
    /// The marker's original time advances to where it was dropped, so a
    /// second drag measures its delta from here rather than from where the
    /// session started.
    pub(crate) fn end_drag(&mut self) -> Option<DragEnd> {
        let id = self.dragging.take()?;
        let cascade_mode = self.cascade;
        let marker = self.marker_mut(id)?;

        let delta = marker.time - marker.original_time;
        marker.original_time = marker.time;

        Some(DragEnd {
            marker: id,
            track_index: marker.track_index,
            track_id: marker.track_id.clone(),
            new_time: marker.time,
            delta,
            cascade: cascade_mode && delta != 0.0,
        })
    }

    /// Abandons the drag and puts the marker back.
    pub(crate) fn cancel_drag(&mut self) {
        if let Some(id) = self.dragging.take() {
            if let Some(marker) = self.marker_mut(id) {
                marker.time = marker.original_time;
            }
        }
    }
}

/// Persists a dropped marker.
///
/// The dragged track is saved with its new start time first. In cascade mode
/// the tracks after it are then shifted by the same delta in one call. A
/// failed save aborts the cascade; a failed shift leaves the saved track in
/// place, nothing is rolled back.
pub(crate) fn persist_drag(api: &dyn TrackApi, commit: &DragCommit) -> Result<(), ApiError> {
    let moved = Track {
        start_time_seconds: Some(commit.new_time),
        ..commit.track.clone()
    };
    store::save(api, commit.episode, &moved)?;

    if commit.cascade {
        if let Err(e) = store::shift(api, commit.episode, commit.index + 1, None, commit.delta) {
            warn!(episode = commit.episode, index = commit.index, error = %e, "cascade shift failed after track update");
            return Err(e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{ShiftRequest, fake::FakeTrackApi},
        model::store::fetch_episode,
    };

    fn tracks_at(starts: &[f64]) -> Vec<Track> {
        starts
            .iter()
            .enumerate()
            .map(|(n, start)| Track {
                id: Some(format!("t{n}")),
                title: format!("Track {n}"),
                start_time_seconds: Some(*start),
                ..Track::default()
            })
            .collect()
    }

    /// Drags the marker of track `index` to `new_time` and persists the drop.
    fn drag_and_persist(
        api: &FakeTrackApi,
        sync: &mut MarkerSync,
        tracks: &[Track],
        index: usize,
        new_time: f64,
    ) -> Result<(), ApiError> {
        let track_id = tracks[index].id.clone().unwrap();
        let marker = sync.marker_for_track(&track_id).unwrap();
        let (id, from) = (marker.id, marker.time);

        assert!(sync.begin_drag(id));
        sync.drag_by(new_time - from);
        let end = sync.end_drag().unwrap();

        persist_drag(api, &DragCommit::new(1, index, tracks[index].clone(), &end))
    }

    #[test]
    fn rebuild_skips_tracks_outside_the_audio() {
        let mut sync = MarkerSync::new();
        let tracks = tracks_at(&[0.0, 50.0, 99.9, 100.0, 250.0]);

        let placed = sync.rebuild(&tracks, Some(100.0));

        assert_eq!(placed, 3);
        let indices: Vec<usize> = sync.markers().iter().map(|m| m.track_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn rebuild_without_duration_is_a_no_op() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[1.0, 2.0]), Some(10.0));

        assert_eq!(sync.rebuild(&tracks_at(&[1.0]), None), 2);
        assert_eq!(sync.rebuild(&tracks_at(&[1.0]), Some(0.0)), 2);
        assert_eq!(sync.markers().len(), 2);
    }

    #[test]
    fn rebuild_recreates_every_marker() {
        let mut sync = MarkerSync::new();
        let tracks = tracks_at(&[1.0, 2.0]);
        sync.rebuild(&tracks, Some(10.0));
        let before: Vec<MarkerId> = sync.markers().iter().map(|m| m.id).collect();

        sync.rebuild(&tracks, Some(10.0));
        let after: Vec<MarkerId> = sync.markers().iter().map(|m| m.id).collect();

        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|id| !before.contains(id)));
    }

    #[test]
    fn track_and_marker_map_both_ways() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[1.0, 2.0, 3.0]), Some(10.0));

        let marker = sync.marker_for_track("t1").unwrap();
        assert_eq!(marker.time, 2.0);
        assert_eq!(sync.track_for_marker(marker.id), Some("t1"));
        assert!(sync.marker_for_track("missing").is_none());
    }

    #[test]
    fn dragging_flag_spans_the_gesture() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[1.0, 2.0]), Some(10.0));
        let first = sync.markers()[0].id;
        let second = sync.markers()[1].id;

        assert!(!sync.is_dragging());
        assert!(sync.begin_drag(first));
        assert!(sync.is_dragging());
        assert!(!sync.begin_drag(second));

        sync.end_drag();
        assert!(!sync.is_dragging());
    }

    #[test]
    fn track_without_start_time_gets_no_marker() {
        let mut tracks = tracks_at(&[0.0, 5.0]);
        tracks[0].start_time_seconds = None;
        let mut sync = MarkerSync::new();

        assert_eq!(sync.rebuild(&tracks, Some(10.0)), 1);
        assert_eq!(sync.markers()[0].track_index, 1);
    }

    #[test]
    fn drag_is_clamped_to_the_audio() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[1.0]), Some(10.0));
        let id = sync.markers()[0].id;

        sync.begin_drag(id);
        sync.drag_by(-5.0);
        assert_eq!(sync.marker(id).unwrap().time, 0.0);
        sync.drag_by(50.0);
        assert_eq!(sync.marker(id).unwrap().time, 10.0 - END_MARGIN);
    }

    #[test]
    fn marker_dropped_at_the_end_survives_a_rebuild() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[50.0]), Some(60.0));
        let id = sync.markers()[0].id;

        sync.begin_drag(id);
        sync.drag_by(100.0);
        let dropped = sync.end_drag().unwrap();

        assert!(dropped.new_time < 60.0);
        assert_eq!(sync.rebuild(&tracks_at(&[dropped.new_time]), Some(60.0)), 1);
    }

    #[test]
    fn cancel_restores_the_marker() {
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks_at(&[4.0]), Some(10.0));
        let id = sync.markers()[0].id;

        sync.begin_drag(id);
        sync.drag_by(3.0);
        sync.cancel_drag();

        assert_eq!(sync.marker(id).unwrap().time, 4.0);
        assert!(!sync.is_dragging());
    }

    #[test]
    fn plain_drag_moves_only_the_dragged_track() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.rebuild(&tracks, Some(60.0));

        drag_and_persist(&api, &mut sync, &tracks, 1, 12.0).unwrap();

        assert_eq!(api.start_times(1), vec![5.0, 12.0, 20.0]);
        assert!(api.shift_calls().is_empty());
    }

    #[test]
    fn cascade_drag_shifts_every_later_track() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks, Some(60.0));

        drag_and_persist(&api, &mut sync, &tracks, 0, 8.0).unwrap();

        assert_eq!(api.start_times(1), vec![8.0, 13.0, 23.0]);
        assert_eq!(
            api.shift_calls(),
            vec![ShiftRequest {
                start_index: 1,
                end_index: None,
                delta_seconds: 3.0
            }]
        );
    }

    #[test]
    fn cascade_drag_leaves_earlier_tracks_alone() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0, 40.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks, Some(60.0));

        drag_and_persist(&api, &mut sync, &tracks, 2, 18.0).unwrap();

        assert_eq!(api.start_times(1), vec![5.0, 10.0, 18.0, 38.0]);
    }

    #[test]
    fn cascade_without_movement_only_saves() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks, Some(60.0));

        drag_and_persist(&api, &mut sync, &tracks, 0, 5.0).unwrap();

        assert!(api.shift_calls().is_empty());
        assert_eq!(api.start_times(1), vec![5.0, 10.0]);
    }

    #[test]
    fn failed_save_aborts_the_cascade() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks, Some(60.0));
        api.fail("update");

        assert!(drag_and_persist(&api, &mut sync, &tracks, 0, 8.0).is_err());

        assert!(api.shift_calls().is_empty());
        assert_eq!(api.start_times(1), vec![5.0, 10.0, 20.0]);
    }

    #[test]
    fn failed_shift_keeps_the_saved_track() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0]);
        let tracks = fetch_episode(&api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks, Some(60.0));
        api.fail("shift");

        assert!(drag_and_persist(&api, &mut sync, &tracks, 0, 8.0).is_err());

        assert_eq!(api.start_times(1), vec![8.0, 10.0, 20.0]);
    }

    #[test]
    fn second_drag_measures_from_the_latest_drop() {
        let mut sync = MarkerSync::new();
        sync.toggle_cascade();
        sync.rebuild(&tracks_at(&[5.0, 10.0]), Some(60.0));
        let id = sync.markers()[0].id;

        sync.begin_drag(id);
        sync.drag_by(3.0);
        let first = sync.end_drag().unwrap();

        sync.begin_drag(id);
        sync.drag_by(2.0);
        let second = sync.end_drag().unwrap();

        assert_eq!(first.delta, 3.0);
        assert_eq!(second.delta, 2.0);
        assert_eq!(second.new_time, 10.0);
        assert_eq!(sync.marker(id).unwrap().original_time(), 10.0);
    }
}
