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

//! Drawing the track form as a centred popup.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    components::track_form::{FormField, TrackForm},
    render::Render,
    theme::Theme,
};

const LABEL_WIDTH: u16 = 11;

impl Render for TrackForm {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(12)])
            .flex(Flex::Center)
            .areas(popup);

        let title = if self.is_edit() { " Edit Track " } else { " Add Track " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .title(title)
            .padding(Padding::horizontal(1));

        let inner = block.inner(popup);
        f.render_widget(Clear, popup);
        f.render_widget(block, popup);

        let rows = Layout::vertical([Constraint::Length(1); 8]).split(inner);

        for (row, field) in rows.iter().zip(FormField::ALL) {
            let focused = self.focus() == field;
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.table_time_fg)
            };

            let value = match self.input(field) {
                Some(input) => input.value().to_string(),
                None if self.ignore() => "[x]".to_string(),
                None => "[ ]".to_string(),
            };

            let line = Line::from(vec![
                Span::styled(format!("{:<width$}", field.label(), width = usize::from(LABEL_WIDTH)), label_style),
                Span::styled(value, Style::default().fg(theme.table_track_fg)),
            ]);
            f.render_widget(Paragraph::new(line), *row);

            if focused {
                if let Some(input) = self.input(field) {
                    let x = row.x + LABEL_WIDTH + input.visual_cursor() as u16;
                    f.set_cursor_position((x.min(row.right().saturating_sub(1)), row.y));
                }
            }
        }

        let footer = match self.error() {
            Some(message) => Line::from(Span::styled(message.to_string(), Style::default().fg(theme.error_fg))),
            None => Line::from(Span::styled(
                "Enter save | Esc cancel | Tab next field | Space toggles ignore",
                Style::default().fg(theme.border_colour),
            )),
        };
        f.render_widget(Paragraph::new(footer), rows[7]);
    }
}
