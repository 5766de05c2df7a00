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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every event to keep the screen in step with the editor state.

mod commander;
mod icons;
mod player;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    App, Pane,
    components::{playing_index, track_rows},
    render::{commander::draw_commander, player::draw_player, status::draw_status},
    theme::Theme,
};

const EPISODE_LIST_WIDTH: u16 = 18;
const TIMELINE_HEIGHT: u16 = 6;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the episode list on the left, the track table
/// above the timeline on the right, and the player, status and command
/// lines along the bottom. An open track form is drawn over everything.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, player, status, commander
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Main layout: episodes, editor
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(EPISODE_LIST_WIDTH), Constraint::Min(0)])
        .split(outer[0]);

    let editor_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(TIMELINE_HEIGHT)])
        .split(main[1]);

    let current = app.editor.episode();
    app.episodes.draw(
        f,
        main[0],
        current,
        app.focus == Pane::Episodes,
        &app.theme,
    );

    draw_tracks(f, editor_area[0], app);

    let playhead = app.editor.playhead();
    app.editor.timeline.draw(
        f,
        editor_area[1],
        &app.editor.markers,
        playhead,
        app.focus == Pane::Timeline,
        &app.theme,
    );

    draw_player(f, outer[1], app);
    draw_status(f, outer[2], app);
    draw_commander(f, outer[3], app);

    if let Some(form) = app.track_form.as_mut() {
        form.draw(f, area, &app.theme);
    }
}

fn draw_tracks(f: &mut Frame, area: Rect, app: &mut App) {
    let title = match app.editor.episode() {
        Some(episode) => format!("Episode {episode}"),
        None => "No episode".to_string(),
    };

    let editor = &mut app.editor;
    let tracks = editor.store.tracks();
    let playing = editor.playhead().and_then(|t| playing_index(tracks, t));
    let rows = track_rows(tracks, &editor.selection, playing);

    editor.track_table.draw(
        f,
        area,
        &title,
        &rows,
        app.focus == Pane::Tracks,
        &app.theme,
    );
}
