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

//! Key handling for the timeline.
//!
//! Outside a drag `h`/`l` walk the focus across markers. While a marker is
//! grabbed the same keys move it by the fine nudge, `H`/`L` by the coarse
//! one.

use crossterm::event::{Event, KeyCode};

use crate::{
    components::timeline::{Timeline, ZoomDirection},
    model::markers::{Marker, MarkerId},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TimelineAction {
    Grab(MarkerId),
    Drop,
    Cancel,
    Nudge(f64),
    Zoom(ZoomDirection),
    TogglePlay,
}

/// Marker move distances in seconds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Nudge {
    pub(crate) fine: f64,
    pub(crate) coarse: f64,
}

impl Timeline {
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        markers: &[Marker],
        dragging: bool,
        nudge: Nudge,
    ) -> Option<TimelineAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        if dragging {
            return match key_event.code {
                KeyCode::Char('h') | KeyCode::Left => Some(TimelineAction::Nudge(-nudge.fine)),
                KeyCode::Char('l') | KeyCode::Right => Some(TimelineAction::Nudge(nudge.fine)),
                KeyCode::Char('H') => Some(TimelineAction::Nudge(-nudge.coarse)),
                KeyCode::Char('L') => Some(TimelineAction::Nudge(nudge.coarse)),
                KeyCode::Enter => Some(TimelineAction::Drop),
                KeyCode::Esc => Some(TimelineAction::Cancel),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('h') | KeyCode::Left => {
                self.focus_previous(markers.len());
                self.reveal_focused(markers);
                None
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.focus_next(markers.len());
                self.reveal_focused(markers);
                None
            }
            KeyCode::Enter => self
                .focused()
                .and_then(|i| markers.get(i))
                .map(|m| TimelineAction::Grab(m.id)),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(TimelineAction::Zoom(ZoomDirection::In)),
            KeyCode::Char('-') => Some(TimelineAction::Zoom(ZoomDirection::Out)),
            KeyCode::Char(' ') => Some(TimelineAction::TogglePlay),
            _ => None,
        }
    }

    fn reveal_focused(&mut self, markers: &[Marker]) {
        if let Some(marker) = self.focused().and_then(|i| markers.get(i)) {
            self.reveal(marker.time);
        }
    }
}
