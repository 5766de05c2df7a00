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

//! Application events and the UI event loop.
//!
//! Every input reaches the UI thread as an [`AppEvent`] on a single channel:
//! key presses from the input thread, periodic ticks, results and failures
//! from the task worker, and state changes from the audio player. The loop
//! applies each event to the [`App`] and redraws.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{error, info};

use crate::{
    App,
    commander::Command,
    model::{EpisodeNumber, export::EpisodeExport, store::LoadedEpisode},
    player::PlayerState,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Command(Command),

    EpisodesLoaded(Vec<EpisodeNumber>),
    TracksLoaded {
        loaded: LoadedEpisode,
        preserve_scroll: bool,
    },
    TrackSaved,
    EpisodeDeleted(EpisodeNumber),
    EpisodeImportReady {
        episode: EpisodeNumber,
        document: EpisodeExport,
    },
    EpisodeImported(EpisodeNumber),
    AudioUploaded {
        url: String,
        duration: Option<f64>,
    },

    PlayerStateChanged(PlayerState),
    DurationChanged(f64),
    TimeChanged(f64),

    Tick,

    ExitApplication,

    Notice(String),
    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed. A fatal error from a worker ends the loop with that error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => {
                info!("exit requested");
                break;
            }
            AppEvent::FatalError(message) => {
                error!(%message, "fatal error");
                return Err(anyhow!(message));
            }

            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Command(command) => handle_command(app, command)?,
            AppEvent::EpisodesLoaded(episodes) => handle_episodes_loaded(app, episodes),
            AppEvent::TracksLoaded {
                loaded,
                preserve_scroll,
            } => handle_tracks_loaded(app, loaded, preserve_scroll),
            AppEvent::TrackSaved => handle_track_saved(app),
            AppEvent::EpisodeDeleted(episode) => handle_episode_deleted(app, episode)?,
            AppEvent::EpisodeImportReady { episode, document } => {
                handle_episode_import_ready(app, episode, document)
            }
            AppEvent::EpisodeImported(episode) => handle_episode_imported(app, episode)?,
            AppEvent::AudioUploaded { url, duration } => handle_audio_uploaded(app, url, duration)?,
            AppEvent::PlayerStateChanged(state) => handle_player_state_changed(app, state),
            AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
            AppEvent::TimeChanged(seconds) => handle_time_changed(app, seconds),
            AppEvent::Notice(message) => app.status.notice(message),
            AppEvent::Error(message) => app.status.error(message),
            AppEvent::Tick => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
