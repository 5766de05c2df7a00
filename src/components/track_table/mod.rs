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

//! The episode's track list.
//!
//! Rows are derived from the track store and the current selection by a
//! pure function, [`track_rows`], so rendering never reaches into mutable
//! state. [`TrackTableState`] only owns the cursor.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::{
    model::{Track, selection::Selection},
    util::format::format_time,
};

/// What the user asked the table to do, resolved against the cursor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrackTableAction {
    Toggle(usize),
    ExtendTo(usize),
    SelectAll,
    ClearSelection,
    Add,
    InsertAtPlayhead,
    Edit(usize),
    Delete(usize),
    GoTo(usize),
}

/// One rendered row of the track table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackRow<'a> {
    pub(crate) index: usize,
    pub(crate) checked: bool,
    pub(crate) playing: bool,
    pub(crate) start: String,
    pub(crate) title: &'a str,
    pub(crate) artist: &'a str,
    pub(crate) album: &'a str,
    pub(crate) length: &'a str,
    pub(crate) ignore: bool,
}

pub(crate) fn track_rows<'a>(
    tracks: &'a [Track],
    selection: &Selection,
    playing: Option<usize>,
) -> Vec<TrackRow<'a>> {
    tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TrackRow {
            index,
            checked: selection.is_checked(index),
            playing: playing == Some(index),
            start: track.start_time_seconds.map(format_time).unwrap_or_default(),
            title: track.display_title(),
            artist: track.display_artist(),
            album: track.display_album(),
            length: track.display_length(),
            ignore: track.ignore,
        })
        .collect()
}

/// The track being heard at `time`: the last one starting at or before it.
pub(crate) fn playing_index(tracks: &[Track], time: f64) -> Option<usize> {
    tracks
        .iter()
        .rposition(|t| t.start_time_seconds.is_some_and(|start| start <= time))
}

#[derive(Default)]
pub(crate) struct TrackTableState {
    pub(crate) table_state: TableState,
}

impl TrackTableState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Keeps the cursor on a valid row after the list was replaced.
    pub(crate) fn clamp(&mut self, len: usize) {
        let cursor = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(cursor);
    }

    pub(crate) fn goto(&mut self, index: usize) {
        self.table_state.select(Some(index));
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }
}
