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

//! Drawing the episode list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

use crate::{components::EpisodeList, model::EpisodeNumber, theme::Theme};

impl EpisodeList {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        current: Option<EpisodeNumber>,
        focused: bool,
        theme: &Theme,
    ) {
        let border_colour = if focused {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let items: Vec<ListItem> = self
            .episodes()
            .iter()
            .map(|ep| {
                let style = if current == Some(*ep) {
                    Style::default()
                        .fg(theme.accent_colour)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.table_track_fg)
                };
                ListItem::new(Line::from(format!("Episode {ep}")).style(style))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_colour))
                    .title(" Episodes "),
            )
            .highlight_style(Style::default().bg(theme.gauge_track_colour))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
