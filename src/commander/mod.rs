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

//! The `:` command line.
//!
//! Typing `:` activates a text input. On Enter the buffer is parsed into a
//! [`Command`] and sent to the event loop, or the parse error is reported on
//! the status line.

use std::{path::PathBuf, sync::mpsc::Sender};

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{components::ZoomDirection, events::AppEvent, model::EpisodeNumber};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    SelectEpisode(EpisodeNumber),
    NewEpisode(EpisodeNumber),
    DeleteEpisode,
    Shift(f64),
    ToggleCascade,
    Upload(PathBuf),
    ImportM3u {
        path: PathBuf,
        episode: Option<EpisodeNumber>,
        start: Option<String>,
    },
    Export(Option<PathBuf>),
    ImportEpisode {
        path: PathBuf,
        episode: Option<EpisodeNumber>,
    },
    Zoom(ZoomDirection),
    Reload,
    Quit,
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` when the event was consumed by the command line.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.active = false;
                self.input.reset();

                if !buffer.is_empty() {
                    let event = match parse_command(&buffer) {
                        Ok(command) => AppEvent::Command(command),
                        Err(message) => AppEvent::Error(message),
                    };
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                self.input.handle_event(event);
            }
        }

        true
    }
}

pub(crate) fn parse_command(buffer: &str) -> Result<Command, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] | ["quit"] => Command::Quit,
        ["reload"] => Command::Reload,
        ["cascade"] => Command::ToggleCascade,
        ["delep"] => Command::DeleteEpisode,

        ["ep", n] => Command::SelectEpisode(parse_episode(n)?),
        ["new", n] => Command::NewEpisode(parse_episode(n)?),
        ["ep" | "new", ..] => return Err("Please enter an episode number".into()),

        ["shift", delta] => Command::Shift(
            delta
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .ok_or_else(|| "Please enter a valid shift value".to_string())?,
        ),
        ["shift", ..] => return Err("Please enter a valid shift value".into()),

        ["zoom", "in"] => Command::Zoom(ZoomDirection::In),
        ["zoom", "out"] => Command::Zoom(ZoomDirection::Out),
        ["zoom", ..] => return Err("Usage: zoom in|out".into()),

        ["upload", path @ ..] if !path.is_empty() => Command::Upload(PathBuf::from(path.join(" "))),
        ["upload"] => return Err("Please select an audio file".into()),

        ["m3u", path, rest @ ..] => {
            let (episode, datetime) = match rest {
                [n, tail @ ..] if n.parse::<EpisodeNumber>().is_ok() => (n.parse().ok(), tail),
                _ => (None, rest),
            };
            Command::ImportM3u {
                path: PathBuf::from(path),
                episode,
                start: (!datetime.is_empty()).then(|| datetime.join(" ")),
            }
        }
        ["m3u"] => return Err("Please select an M3U file".into()),

        ["export"] => Command::Export(None),
        ["export", path @ ..] => Command::Export(Some(PathBuf::from(path.join(" ")))),

        ["import", path] => Command::ImportEpisode {
            path: PathBuf::from(path),
            episode: None,
        },
        ["import", path, n] => Command::ImportEpisode {
            path: PathBuf::from(path),
            episode: Some(parse_episode(n)?),
        },
        ["import", ..] => return Err("Please select a JSON file".into()),

        [cmd, ..] => return Err(format!("Unknown command: {cmd}")),
        [] => return Err("Empty command".into()),
    };

    Ok(command)
}

fn parse_episode(value: &str) -> Result<EpisodeNumber, String> {
    value
        .parse()
        .map_err(|_| "Please enter an episode number".to_string())
}
