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

//! Drawing the timeline: a time ruler, the playhead and the track markers.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    components::timeline::Timeline,
    model::markers::{Marker, MarkerSync},
    theme::Theme,
    util::format::{format_delta, format_time},
};

const RULER_STEP: u16 = 10;

const MARKER: char = '\u{2503}';
const PLAYHEAD: char = '\u{25BC}';
const TICK: char = '\u{252C}';
const RULE: char = '\u{2500}';

impl Timeline {
    /// Columns of the visible markers, paired with their list position.
    fn marker_columns(&self, markers: &[Marker]) -> Vec<(u16, usize)> {
        markers
            .iter()
            .enumerate()
            .filter_map(|(i, m)| self.column_of(m.time).map(|c| (c, i)))
            .collect()
    }

    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        markers: &MarkerSync,
        playhead: Option<f64>,
        focused: bool,
        theme: &Theme,
    ) {
        let border_colour = if focused {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let mut title = format!(" Timeline | {:.0} px/s ", self.zoom());
        if markers.cascade() {
            title.push_str("| cascade ");
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour))
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.set_width(inner.width);
        let width = usize::from(inner.width);

        let base = Style::default().fg(theme.border_colour);

        // Ruler labels and ticks.
        let mut labels = vec![' '; width];
        let mut ticks: Vec<(char, Style)> = vec![(RULE, base); width];
        for column in (0..inner.width).step_by(usize::from(RULER_STEP)) {
            let time = self.scroll() + f64::from(column) * self.seconds_per_column();
            for (offset, ch) in format_time(time).chars().enumerate() {
                if let Some(cell) = labels.get_mut(usize::from(column) + offset) {
                    *cell = ch;
                }
            }
            ticks[usize::from(column)] = (TICK, base);
        }

        if let Some(column) = playhead.and_then(|t| self.column_of(t)) {
            ticks[usize::from(column)] = (PLAYHEAD, Style::default().fg(theme.playhead_fg));
        }

        let mut marker_row: Vec<(char, Style)> = vec![(' ', base); width];
        for (column, index) in self.marker_columns(markers.markers()) {
            let marker = &markers.markers()[index];
            let style = if markers.dragging() == Some(marker.id) {
                Style::default()
                    .fg(theme.marker_drag_fg)
                    .add_modifier(Modifier::BOLD)
            } else if self.focused() == Some(index) {
                Style::default()
                    .fg(theme.marker_focus_fg)
                    .add_modifier(Modifier::BOLD)
            } else if marker.ignore {
                Style::default().fg(theme.ignored_fg)
            } else {
                Style::default().fg(theme.marker_fg)
            };
            marker_row[usize::from(column)] = (MARKER, style);
        }

        let lines = vec![
            Line::from(Span::styled(labels.into_iter().collect::<String>(), base)),
            styled_line(ticks),
            styled_line(marker_row),
            self.focus_line(markers, theme),
        ];

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn focus_line(&self, markers: &MarkerSync, theme: &Theme) -> Line<'static> {
        let Some(marker) = self.focused().and_then(|i| markers.markers().get(i)) else {
            return Line::default();
        };

        let mut text = format!("{} @ {}", marker.label, format_time(marker.time));
        if markers.dragging() == Some(marker.id) {
            text.push_str(&format!(" ({})", format_delta(marker.time - marker.original_time())));
        }

        let colour = if markers.dragging() == Some(marker.id) {
            theme.marker_drag_fg
        } else {
            theme.marker_focus_fg
        };

        Line::from(Span::styled(text, Style::default().fg(colour)))
    }
}

/// Joins runs of equally styled cells into spans.
fn styled_line(cells: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for (ch, style) in cells {
        if run_style.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style.unwrap_or_default()));
    }

    Line::from(spans)
}
