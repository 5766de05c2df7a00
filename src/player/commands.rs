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

//! MPV playback worker.
//!
//! The worker alternates between draining [`AudioPlayerCommand`]s from the UI
//! and waiting briefly for MPV property changes, which it forwards as
//! [`AppEvent`]s.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::{debug, error};

use crate::{
    events::AppEvent,
    player::{AudioPlayer, PlayerState},
};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load(String),
    TogglePause,
    PlayFrom(f64),
    Seek(i32),
}

/// Spawns the worker thread. A failure inside the worker is reported as a
/// fatal application event.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            error!(error = ?e, "playback worker stopped");
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {e:?}")));
        }
    });
}

fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut tracker = PlaybackTracker::new();

    loop {
        if !process_commands(&mut handler, &command_rx)? {
            return Ok(());
        }
        forward_mpv_events(&mut handler, &mut tracker, &event_tx)?;
    }
}

/// Executes every pending command. Returns `false` once the UI has gone.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "player command");

        match command {
            AudioPlayerCommand::Load(url) => {
                handler
                    .set_property("pause", true)
                    .context("Failed to pause before load")?;
                handler
                    .command(&["loadfile", &url, "replace"])
                    .with_context(|| format!("Failed to load audio: {url}"))?;
            }
            AudioPlayerCommand::TogglePause => {
                handler
                    .command(&["cycle", "pause"])
                    .context("Failed to toggle pause")?;
            }
            AudioPlayerCommand::PlayFrom(seconds) => {
                handler
                    .command(&["seek", &format!("{seconds:.3}"), "absolute"])
                    .context("Failed to seek")?;
                handler
                    .set_property("pause", false)
                    .context("Failed to resume")?;
            }
            AudioPlayerCommand::Seek(delta) => {
                handler
                    .command(&["seek", &delta.to_string(), "relative"])
                    .context("Failed to seek")?;
            }
        }
    }
}

/// Waits up to 50ms for an MPV event and forwards anything the UI tracks.
fn forward_mpv_events(
    handler: &mut mpv::MpvHandler,
    tracker: &mut PlaybackTracker,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv::Event::PropertyChange { name, change, .. }) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let event = tracker.apply(name, change);

    if let Some(state) = tracker.state_change() {
        event_tx
            .send(AppEvent::PlayerStateChanged(state))
            .context("Failed to send player state event")?;
    }
    if let Some(event) = event {
        event_tx.send(event).context("Failed to send event")?;
    }

    Ok(())
}

/// Folds MPV property changes into the player state the UI shows.
#[derive(Debug)]
struct PlaybackTracker {
    paused: bool,
    idle: bool,
    reported: PlayerState,
}

impl PlaybackTracker {
    fn new() -> Self {
        Self {
            paused: false,
            idle: true,
            reported: PlayerState::Stopped,
        }
    }

    /// Records one property change, returning the event to forward for it.
    fn apply(&mut self, name: &str, change: Format) -> Option<AppEvent> {
        match (name, change) {
            ("duration", Format::Double(duration)) if duration > 0.0 => {
                Some(AppEvent::DurationChanged(duration))
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                Some(AppEvent::TimeChanged(seconds))
            }
            ("pause", Format::Flag(paused)) => {
                self.paused = paused;
                None
            }
            ("idle-active", Format::Flag(idle)) => {
                self.idle = idle;
                None
            }
            _ => None,
        }
    }

    /// The player state, when it differs from the last one reported.
    fn state_change(&mut self) -> Option<PlayerState> {
        let state = AudioPlayer::player_state(self.paused, self.idle);
        if state == self.reported {
            return None;
        }
        self.reported = state;
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_paused_then_playing() {
        let mut tracker = PlaybackTracker::new();
        assert_eq!(tracker.state_change(), None);

        tracker.apply("pause", Format::Flag(true));
        tracker.apply("idle-active", Format::Flag(false));
        assert_eq!(tracker.state_change(), Some(PlayerState::Paused));
        assert_eq!(tracker.state_change(), None);

        tracker.apply("pause", Format::Flag(false));
        assert_eq!(tracker.state_change(), Some(PlayerState::Playing));
    }

    #[test]
    fn only_meaningful_times_are_forwarded() {
        let mut tracker = PlaybackTracker::new();

        assert!(matches!(
            tracker.apply("duration", Format::Double(3600.0)),
            Some(AppEvent::DurationChanged(d)) if d == 3600.0
        ));
        assert!(tracker.apply("duration", Format::Double(0.0)).is_none());
        assert!(matches!(
            tracker.apply("time-pos", Format::Double(12.5)),
            Some(AppEvent::TimeChanged(t)) if t == 12.5
        ));
        assert!(tracker.apply("time-pos", Format::Double(-1.0)).is_none());
    }
}
