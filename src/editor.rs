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

//! Editing state for the current episode.
//!
//! [`Editor`] ties the track store, the timeline markers and the row
//! selection together and keeps them consistent: every reload replaces the
//! store, clears the selection and rebuilds the markers, and every change of
//! zoom or audio duration rebuilds the markers again. It owns no channels or
//! threads, the event handlers drive it and turn its results into tasks.

use tracing::debug;

use crate::{
    components::{Timeline, TrackTableState, ZoomDirection},
    model::{
        EpisodeNumber, Track,
        export::EpisodeExport,
        markers::{DragCommit, MarkerId, MarkerSync},
        selection::Selection,
        store::{LoadedEpisode, TrackStore},
    },
};

pub(crate) struct Editor {
    pub(crate) store: TrackStore,
    pub(crate) markers: MarkerSync,
    pub(crate) selection: Selection,
    pub(crate) timeline: Timeline,
    pub(crate) track_table: TrackTableState,
    duration: Option<f64>,
    playhead: Option<f64>,
}

impl Editor {
    pub(crate) fn new(zoom: f64) -> Self {
        Self {
            store: TrackStore::new(),
            markers: MarkerSync::new(),
            selection: Selection::new(),
            timeline: Timeline::new(zoom),
            track_table: TrackTableState::new(),
            duration: None,
            playhead: None,
        }
    }

    pub(crate) fn episode(&self) -> Option<EpisodeNumber> {
        self.store.episode()
    }

    pub(crate) fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Current playback position, once audio is loaded.
    pub(crate) fn playhead(&self) -> Option<f64> {
        self.playhead
    }

    /// Installs a fresh load of the episode.
    ///
    /// Row positions change with every load, so the selection is dropped.
    /// Only reloads following a marker drag keep the timeline scrolled where
    /// the user left it.
    pub(crate) fn apply_loaded(&mut self, loaded: LoadedEpisode, preserve_scroll: bool) {
        let count = self.store.replace(loaded).len();
        self.selection.clear();
        self.track_table.clamp(count);
        if !preserve_scroll {
            self.timeline.reset_scroll();
        }
        self.rebuild_markers();
    }

    /// Switches to an episode that has no tracks yet.
    pub(crate) fn start_episode(&mut self, episode: EpisodeNumber) {
        self.store.start_episode(episode);
        self.reset_view();
    }

    pub(crate) fn clear_episode(&mut self) {
        self.store.clear();
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.selection.clear();
        self.markers.clear();
        self.track_table.clamp(0);
        self.timeline.reset_scroll();
        self.rebuild_markers();
    }

    /// Records a newly loaded audio file's duration.
    pub(crate) fn load_audio(&mut self, duration: Option<f64>) {
        self.playhead = Some(0.0);
        self.markers.clear();
        self.duration = None;
        self.set_duration(duration);
    }

    /// Updates the audio duration, rebuilding markers when it changed.
    pub(crate) fn set_duration(&mut self, duration: Option<f64>) {
        let duration = duration.filter(|d| *d > 0.0);
        if duration.is_some() && duration != self.duration {
            self.duration = duration;
            self.rebuild_markers();
        }
    }

    pub(crate) fn rebuild_markers(&mut self) {
        let count = self.markers.rebuild(self.store.tracks(), self.duration);
        self.timeline.clamp_focus(count);
    }

    /// Steps the zoom. Without audio there is nothing to zoom.
    pub(crate) fn zoom(&mut self, direction: ZoomDirection) -> bool {
        if self.duration.is_none() {
            return false;
        }
        let changed = self.timeline.step_zoom(direction);
        if changed {
            debug!(zoom = self.timeline.zoom(), "zoom changed");
            self.rebuild_markers();
        }
        changed
    }

    /// Tracks playback, keeping the playhead in view while playing unless a
    /// marker is being dragged.
    pub(crate) fn follow_playhead(&mut self, time: f64, playing: bool) {
        self.playhead = Some(time);
        if playing && !self.markers.is_dragging() {
            self.timeline.reveal(time);
        }
    }

    /// Where playback should start for the track at `index`, if it lies
    /// inside the loaded audio.
    pub(crate) fn start_of(&self, index: usize) -> Option<f64> {
        let start = self.store.get(index)?.start_time_seconds?;
        let duration = self.duration?;
        (start < duration).then_some(start)
    }

    /// Grabs a marker and moves the table cursor onto its track.
    pub(crate) fn grab(&mut self, marker: MarkerId) -> bool {
        if !self.markers.begin_drag(marker) {
            return false;
        }
        if let Some(index) = self
            .markers
            .track_for_marker(marker)
            .and_then(|id| self.store.index_of(id))
        {
            self.track_table.goto(index);
        }
        true
    }

    /// Focuses the timeline marker of the track at `index`, if it has one.
    pub(crate) fn focus_marker_of(&mut self, index: usize) {
        let position = self
            .store
            .get(index)
            .and_then(|t| t.id.as_deref())
            .and_then(|id| self.markers.marker_for_track(id))
            .and_then(|m| self.markers.markers().iter().position(|other| other.id == m.id));

        if let Some(position) = position {
            self.timeline.focus(Some(position));
            if let Some(marker) = self.markers.markers().get(position) {
                let time = marker.time;
                self.timeline.reveal(time);
            }
        }
    }

    pub(crate) fn nudge(&mut self, delta: f64) {
        self.markers.drag_by(delta);
        if let Some(marker) = self.markers.dragging().and_then(|id| self.markers.marker(id)) {
            let time = marker.time;
            self.timeline.reveal(time);
        }
    }

    pub(crate) fn cancel_drag(&mut self) {
        self.markers.cancel_drag();
    }

    /// Drops the grabbed marker and describes the save it requires.
    ///
    /// The track is found through its id rather than the marker's list
    /// position, so a marker never writes to the wrong track.
    pub(crate) fn drop_marker(&mut self) -> Option<DragCommit> {
        let end = self.markers.end_drag()?;
        let episode = self.store.episode()?;

        let index = end
            .track_id
            .as_deref()
            .and_then(|id| self.store.index_of(id))
            .unwrap_or(end.track_index);
        let track = self.store.get(index)?.clone();

        Some(DragCommit::new(episode, index, track, &end))
    }

    /// The checked rows to shift, or why a shift cannot run.
    pub(crate) fn shift_request(&self) -> Result<(EpisodeNumber, Selection), &'static str> {
        let episode = self.store.episode().ok_or("Please select an episode first")?;
        if self.selection.is_empty() {
            return Err("Please select at least one track to shift");
        }
        Ok((episode, self.selection.clone()))
    }

    pub(crate) fn export_document(&self) -> Result<EpisodeExport, &'static str> {
        let episode = self.store.episode().ok_or("Please select an episode first")?;
        if self.store.is_empty() {
            return Err("No tracks to export");
        }
        Ok(EpisodeExport::new(
            episode,
            self.store.first_time(),
            self.store.tracks(),
        ))
    }

    pub(crate) fn track_at(&self, index: usize) -> Option<&Track> {
        self.store.get(index)
    }
}
