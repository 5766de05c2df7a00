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

//! Drawing the track table.

use std::fmt::Write;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::{
    components::{TrackRow, TrackTableState},
    theme::Theme,
};

impl TrackTableState {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        rows: &[TrackRow],
        focused: bool,
        theme: &Theme,
    ) {
        let selected_count = rows.iter().filter(|r| r.checked).count();

        let mut header_text = format!(" {title} | {} tracks ", rows.len());
        if selected_count > 0 {
            let _ = write!(header_text, "| {selected_count} selected ");
        }

        let border_colour = if focused {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let table_rows = rows.iter().map(|row| {
            let fg = |colour: Color| {
                if row.ignore { theme.ignored_fg } else { colour }
            };

            let checkbox = if row.checked { "[x]" } else { "[ ]" };
            let mut title_style = Style::default().fg(fg(theme.table_track_fg));
            if row.ignore {
                title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
            }
            if row.playing {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }

            Row::new(vec![
                Cell::from(Line::from(checkbox).style(Style::default().fg(theme.accent_colour))),
                Cell::from(
                    Line::from(row.start.as_str())
                        .style(Style::default().fg(fg(theme.table_time_fg)))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(row.title).style(title_style)),
                Cell::from(Line::from(row.artist).style(Style::default().fg(fg(theme.table_artist_fg)))),
                Cell::from(Line::from(row.album).style(Style::default().fg(fg(theme.table_album_fg)))),
                Cell::from(
                    Line::from(row.length)
                        .style(Style::default().fg(fg(theme.table_time_fg)))
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            table_rows,
            [
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("Start").alignment(Alignment::Right)),
                Cell::from("Title"),
                Cell::from("Artist"),
                Cell::from("Album"),
                Cell::from(Line::from("Length").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_colour))
                .title(header_text),
        );

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
