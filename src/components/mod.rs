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

//! UI components.
//!
//! Each component owns its view state (cursor, scroll, focus) and turns key
//! presses into an action enum; the event handlers apply those actions to
//! the application state.

mod episodes;
pub(crate) mod status;
pub(crate) mod timeline;
pub(crate) mod track_form;
mod track_table;

pub(crate) use episodes::EpisodeList;
pub(crate) use status::{ConfirmAction, StatusLine, StatusMessage};
pub(crate) use timeline::{Nudge, Timeline, TimelineAction, ZoomDirection};
pub(crate) use track_form::{FormAction, TrackForm};
pub(crate) use track_table::{TrackRow, TrackTableAction, TrackTableState, playing_index, track_rows};
