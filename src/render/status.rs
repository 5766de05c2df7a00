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

//! Render the status line: the pending question, or the latest message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{App, components::StatusMessage};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = if let Some(action) = app.status.pending() {
        Line::from(vec![
            Span::styled(
                format!(" {} ", action.prompt()),
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("(y/n)"),
        ])
    } else {
        match app.status.message() {
            Some(StatusMessage::Notice(text)) => {
                Line::styled(format!(" {text}"), Style::default().fg(theme.notice_fg))
            }
            Some(StatusMessage::Error(text)) => Line::styled(
                format!(" {text}"),
                Style::default()
                    .fg(theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Line::default(),
        }
    };

    f.render_widget(Paragraph::new(line), area);
}
