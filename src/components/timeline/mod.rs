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

//! Horizontal timeline of the episode audio with one marker per track.
//!
//! Zoom is kept in pixels per second, the unit the level is configured in;
//! one terminal column stands for [`PIXELS_PER_COLUMN`] pixels. The view
//! scrolls horizontally and remembers its left edge in seconds so a reload
//! can keep the user's place.

mod event;
mod render;

pub(crate) use event::{Nudge, TimelineAction};

pub(crate) const PIXELS_PER_COLUMN: f64 = 100.0;

pub(crate) const MIN_ZOOM: f64 = 1.0;
pub(crate) const MAX_ZOOM: f64 = 500.0;
const ZOOM_STEP: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug)]
pub(crate) struct Timeline {
    zoom: f64,
    scroll: f64,
    width: u16,
    focused: Option<usize>,
}

impl Timeline {
    pub(crate) fn new(zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            scroll: 0.0,
            width: 0,
            focused: None,
        }
    }

    pub(crate) fn zoom(&self) -> f64 {
        self.zoom
    }

    pub(crate) fn seconds_per_column(&self) -> f64 {
        PIXELS_PER_COLUMN / self.zoom
    }

    /// Steps the zoom level, returning `true` when it changed.
    pub(crate) fn step_zoom(&mut self, direction: ZoomDirection) -> bool {
        let zoom = match direction {
            ZoomDirection::In => (self.zoom * ZOOM_STEP).min(MAX_ZOOM),
            ZoomDirection::Out => (self.zoom / ZOOM_STEP).max(MIN_ZOOM),
        };
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    /// Left edge of the view, in seconds.
    pub(crate) fn scroll(&self) -> f64 {
        self.scroll
    }

    pub(crate) fn reset_scroll(&mut self) {
        self.scroll = 0.0;
    }

    /// Records the drawable width, needed to know what is in view.
    pub(crate) fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub(crate) fn visible_seconds(&self) -> f64 {
        f64::from(self.width) * self.seconds_per_column()
    }

    /// Scrolls so `time` is in view, centring it when it was off screen.
    pub(crate) fn reveal(&mut self, time: f64) {
        let span = self.visible_seconds();
        if span <= 0.0 {
            return;
        }
        if time < self.scroll || time >= self.scroll + span {
            self.scroll = (time - span / 2.0).max(0.0);
        }
    }

    /// Column of `time` within the view, if it is visible.
    pub(crate) fn column_of(&self, time: f64) -> Option<u16> {
        if time < self.scroll {
            return None;
        }
        let column = ((time - self.scroll) / self.seconds_per_column()).floor();
        (column < f64::from(self.width)).then_some(column as u16)
    }

    /// Position in the marker list of the focused marker.
    pub(crate) fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub(crate) fn focus(&mut self, index: Option<usize>) {
        self.focused = index;
    }

    /// Keeps the focus on an existing marker after markers were rebuilt.
    pub(crate) fn clamp_focus(&mut self, count: usize) {
        self.focused = match (count, self.focused) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(count - 1)),
            (_, None) => None,
        };
    }

    fn focus_next(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) if i + 1 < count => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    fn focus_previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.focused = Some(self.focused.map_or(0, |i| i.saturating_sub(1)));
    }
}
