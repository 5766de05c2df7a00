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

//! Add / edit form for a single track.
//!
//! The form edits a copy. Submitting validates the start time and hands a
//! complete [`Track`] back to the caller, carrying over the identity and
//! artwork of the track being edited so the save is a full-record replace.

mod render;

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::model::{EpisodeNumber, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Artist,
    Album,
    Length,
    Start,
    Ignore,
}

impl FormField {
    const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Artist,
        FormField::Album,
        FormField::Length,
        FormField::Start,
        FormField::Ignore,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Artist => "Artist",
            FormField::Album => "Album",
            FormField::Length => "Length",
            FormField::Start => "Start (s)",
            FormField::Ignore => "Ignore",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormAction {
    Submit(EpisodeNumber, Track),
    Cancel,
}

pub(crate) struct TrackForm {
    episode: EpisodeNumber,
    original: Option<Track>,
    title: Input,
    artist: Input,
    album: Input,
    length: Input,
    start: Input,
    ignore: bool,
    focus: FormField,
    error: Option<String>,
}

impl TrackForm {
    /// An empty form for a new track starting at `start` seconds.
    pub(crate) fn add(episode: EpisodeNumber, start: f64) -> Self {
        Self::with_values(episode, None, &Track {
            start_time_seconds: Some(start),
            ..Track::default()
        })
    }

    pub(crate) fn edit(episode: EpisodeNumber, track: &Track) -> Self {
        Self::with_values(episode, Some(track.clone()), track)
    }

    fn with_values(episode: EpisodeNumber, original: Option<Track>, track: &Track) -> Self {
        Self {
            episode,
            original,
            title: Input::new(track.title.clone()),
            artist: Input::new(track.artist.clone()),
            album: Input::new(track.album.clone()),
            length: Input::new(track.length.clone()),
            start: Input::new(prefill_start(track.start_time_seconds)),
            ignore: track.ignore,
            focus: FormField::Title,
            error: None,
        }
    }

    pub(crate) fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub(crate) fn focus(&self) -> FormField {
        self.focus
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn ignore(&self) -> bool {
        self.ignore
    }

    pub(crate) fn input(&self, field: FormField) -> Option<&Input> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Artist => Some(&self.artist),
            FormField::Album => Some(&self.album),
            FormField::Length => Some(&self.length),
            FormField::Start => Some(&self.start),
            FormField::Ignore => None,
        }
    }

    fn input_mut(&mut self, field: FormField) -> Option<&mut Input> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Artist => Some(&mut self.artist),
            FormField::Album => Some(&mut self.album),
            FormField::Length => Some(&mut self.length),
            FormField::Start => Some(&mut self.start),
            FormField::Ignore => None,
        }
    }

    /// Builds the track to save, or explains why the input is invalid.
    ///
    /// An edit whose start text is still the prefilled one keeps the stored
    /// start time at full precision.
    pub(crate) fn to_track(&self) -> Result<Track, String> {
        let text = self.start.value().trim();
        let unchanged = self
            .original
            .as_ref()
            .filter(|t| prefill_start(t.start_time_seconds) == text);

        let start = match unchanged {
            Some(original) => original.start_time_seconds,
            None => Some(
                text.parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .ok_or_else(|| "Please enter a valid start time".to_string())?,
            ),
        };

        let base = self.original.clone().unwrap_or_default();

        Ok(Track {
            title: self.title.value().trim().to_string(),
            artist: self.artist.value().trim().to_string(),
            album: self.album.value().trim().to_string(),
            length: self.length.value().trim().to_string(),
            start_time_seconds: start,
            ignore: self.ignore,
            ..base
        })
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<FormAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Esc => return Some(FormAction::Cancel),
            KeyCode::Enter => {
                return match self.to_track() {
                    Ok(track) => Some(FormAction::Submit(self.episode, track)),
                    Err(message) => {
                        self.error = Some(message);
                        self.focus = FormField::Start;
                        None
                    }
                };
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Char(' ') if self.focus == FormField::Ignore => self.ignore = !self.ignore,
            _ => {
                if let Some(input) = self.input_mut(self.focus) {
                    input.handle_event(event);
                }
            }
        }

        None
    }
}

/// Seconds as typed by a person: no trailing zeros, at most two decimals.
/// A missing start time leaves the field blank.
fn prefill_start(seconds: Option<f64>) -> String {
    seconds
        .map(|s| format!("{}", (s * 100.0).round() / 100.0))
        .unwrap_or_default()
}
