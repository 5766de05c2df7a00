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

//! Status line: the latest notice or error, and yes/no confirmations.
//!
//! Destructive actions are parked here as a [`ConfirmAction`] until the user
//! answers.

use crate::model::{EpisodeNumber, export::EpisodeExport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatusMessage {
    Notice(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConfirmAction {
    DeleteTrack {
        episode: EpisodeNumber,
        track_id: String,
    },
    DeleteEpisode(EpisodeNumber),
    ImportEpisode {
        episode: EpisodeNumber,
        document: EpisodeExport,
    },
}

impl ConfirmAction {
    pub(crate) fn prompt(&self) -> String {
        match self {
            ConfirmAction::DeleteTrack { .. } => "Are you sure you want to delete this track?".into(),
            ConfirmAction::DeleteEpisode(episode) => format!(
                "Are you sure you want to delete Episode {episode}? This will permanently delete all tracks for this episode."
            ),
            ConfirmAction::ImportEpisode { episode, .. } => format!(
                "This will replace all existing tracks for episode {episode}. Continue?"
            ),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatusLine {
    message: Option<StatusMessage>,
    confirm: Option<ConfirmAction>,
}

impl StatusLine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn notice(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::Notice(text.into()));
    }

    pub(crate) fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::Error(text.into()));
    }

    pub(crate) fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub(crate) fn clear_message(&mut self) {
        self.message = None;
    }

    /// Asks for confirmation, replacing any unanswered question.
    pub(crate) fn ask(&mut self, action: ConfirmAction) {
        self.confirm = Some(action);
    }

    pub(crate) fn pending(&self) -> Option<&ConfirmAction> {
        self.confirm.as_ref()
    }

    /// Takes the pending action if the answer was yes; any answer clears it.
    pub(crate) fn answer(&mut self, yes: bool) -> Option<ConfirmAction> {
        self.confirm.take().filter(|_| yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_returns_the_action_once() {
        let mut status = StatusLine::new();
        status.ask(ConfirmAction::DeleteEpisode(4));

        assert_eq!(status.answer(true), Some(ConfirmAction::DeleteEpisode(4)));
        assert!(status.pending().is_none());
        assert_eq!(status.answer(true), None);
    }

    #[test]
    fn no_discards_the_action() {
        let mut status = StatusLine::new();
        status.ask(ConfirmAction::DeleteEpisode(4));

        assert_eq!(status.answer(false), None);
        assert!(status.pending().is_none());
    }

    #[test]
    fn import_prompt_names_the_episode() {
        let action = ConfirmAction::ImportEpisode {
            episode: 9,
            document: EpisodeExport::default(),
        };

        assert_eq!(
            action.prompt(),
            "This will replace all existing tracks for episode 9. Continue?"
        );
    }
}
