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

//! Keyboard routing.
//!
//! A key goes to the first of these that wants it: an open confirmation
//! prompt, the track form, the command line, the focused pane, and finally
//! the global bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{App, Pane, components::Nudge, events::AppEvent};

use super::handlers::*;

const SEEK_DELTA: i32 = 5;
const COARSE_SEEK_DELTA: i32 = 30;

/// Maps keyboard input to editing actions and playback commands.
///
/// # Errors
///
/// Returns an error if a task or player command cannot be sent to its
/// worker.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.status.pending().is_some() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => handle_confirmation(app, true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                handle_confirmation(app, false)
            }
            _ => Ok(()),
        };
    }

    let event = Event::Key(key);

    if let Some(form) = app.track_form.as_mut() {
        if let Some(action) = form.process_event(&event) {
            handle_form_action(app, action)?;
        }
        return Ok(());
    }

    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    if process_pane_key_event(app, &event, key)? {
        return Ok(());
    }

    process_global_key_event(app, key)
}

/// Returns `true` when the focused pane consumed the key.
fn process_pane_key_event(app: &mut App, event: &Event, key: KeyEvent) -> Result<bool> {
    match app.focus {
        Pane::Episodes => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.episodes.next(),
            KeyCode::Char('k') | KeyCode::Up => app.episodes.previous(),
            KeyCode::Enter => {
                if let Some(episode) = app.episodes.selected() {
                    select_episode(app, episode)?;
                }
            }
            _ => return Ok(false),
        },

        Pane::Tracks => {
            let len = app.editor.store.len();
            match app.editor.track_table.process_event(event, len) {
                Some(action) => handle_track_table_action(app, action)?,
                None => return Ok(false),
            }
        }

        Pane::Timeline => {
            let nudge = Nudge {
                fine: app.config.nudge_seconds,
                coarse: app.config.coarse_nudge_seconds,
            };
            let editor = &mut app.editor;
            let action = editor.timeline.process_event(
                event,
                editor.markers.markers(),
                editor.markers.is_dragging(),
                nudge,
            );
            match action {
                Some(action) => handle_timeline_action(app, action)?,
                None => return Ok(false),
            }
        }
    }

    Ok(true)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.previous(),

        KeyCode::Char('c') => toggle_cascade(app),
        KeyCode::Char('r') => reload(app)?,

        KeyCode::Char('p') => toggle_play(app)?,
        KeyCode::Char(',') => seek(app, -SEEK_DELTA)?,
        KeyCode::Char('.') => seek(app, SEEK_DELTA)?,
        KeyCode::Char('<') => seek(app, -COARSE_SEEK_DELTA)?,
        KeyCode::Char('>') => seek(app, COARSE_SEEK_DELTA)?,

        KeyCode::Esc => app.status.clear_message(),

        _ => {}
    }

    Ok(())
}
