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

//! Episode list pane.
//!
//! Holds the episode numbers the backend knows about, in the order it
//! returned them (newest first), and the list cursor.

mod render;

use ratatui::widgets::ListState;

use crate::model::EpisodeNumber;

#[derive(Default)]
pub(crate) struct EpisodeList {
    episodes: Vec<EpisodeNumber>,
    pub(crate) list_state: ListState,
}

impl EpisodeList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn episodes(&self) -> &[EpisodeNumber] {
        &self.episodes
    }

    pub(crate) fn selected(&self) -> Option<EpisodeNumber> {
        let index = self.list_state.selected()?;
        self.episodes.get(index).copied()
    }

    /// Replaces the list, keeping `current` under the cursor when present.
    pub(crate) fn set_episodes(&mut self, episodes: Vec<EpisodeNumber>, current: Option<EpisodeNumber>) {
        self.episodes = episodes;
        let index = current
            .and_then(|ep| self.episodes.iter().position(|e| *e == ep))
            .or((!self.episodes.is_empty()).then_some(0));
        self.list_state.select(index);
    }

    /// Moves the cursor onto `episode` if it is listed.
    pub(crate) fn select(&mut self, episode: EpisodeNumber) {
        if let Some(index) = self.episodes.iter().position(|e| *e == episode) {
            self.list_state.select(Some(index));
        }
    }

    pub(crate) fn next(&mut self) {
        let len = self.episodes.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub(crate) fn previous(&mut self) {
        if self.episodes.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }
}
