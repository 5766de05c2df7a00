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

//! Key handling for the track table.
//!
//! Navigation is handled in place; anything that touches the selection, the
//! store or playback is returned as a [`TrackTableAction`].

use crossterm::event::{Event, KeyCode, KeyModifiers};

use crate::components::{TrackTableAction, TrackTableState};

impl TrackTableState {
    pub(crate) fn process_event(&mut self, event: &Event, len: usize) -> Option<TrackTableAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.goto_next(len),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.goto_previous(len),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => self.goto_first(len),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.goto_last(len),
            _ => {}
        }

        let cursor = self.cursor().filter(|i| *i < len);

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => Some(TrackTableAction::SelectAll),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(TrackTableAction::ClearSelection),

            (KeyCode::Char(' '), KeyModifiers::SHIFT) | (KeyCode::Char('V'), _) => {
                cursor.map(TrackTableAction::ExtendTo)
            }
            (KeyCode::Char(' '), _) => cursor.map(TrackTableAction::Toggle),

            (KeyCode::Char('a'), _) => Some(TrackTableAction::Add),
            (KeyCode::Char('i'), _) => Some(TrackTableAction::InsertAtPlayhead),
            (KeyCode::Char('e'), _) => cursor.map(TrackTableAction::Edit),
            (KeyCode::Char('d'), _) => cursor.map(TrackTableAction::Delete),
            (KeyCode::Enter, _) => cursor.map(TrackTableAction::GoTo),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn space_toggles_the_cursor_row() {
        let mut table = TrackTableState::new();
        table.clamp(3);
        table.process_event(&key(KeyCode::Char('j'), KeyModifiers::NONE), 3);

        let action = table.process_event(&key(KeyCode::Char(' '), KeyModifiers::NONE), 3);

        assert_eq!(action, Some(TrackTableAction::Toggle(1)));
    }

    #[test]
    fn shifted_space_extends_the_range() {
        let mut table = TrackTableState::new();
        table.goto(2);

        let action = table.process_event(&key(KeyCode::Char(' '), KeyModifiers::SHIFT), 3);

        assert_eq!(action, Some(TrackTableAction::ExtendTo(2)));
    }

    #[test]
    fn row_actions_need_a_row() {
        let mut table = TrackTableState::new();

        let action = table.process_event(&key(KeyCode::Char('e'), KeyModifiers::NONE), 0);

        assert_eq!(action, None);
    }

    #[test]
    fn control_a_is_select_all_not_add() {
        let mut table = TrackTableState::new();

        assert_eq!(
            table.process_event(&key(KeyCode::Char('a'), KeyModifiers::CONTROL), 2),
            Some(TrackTableAction::SelectAll)
        );
        assert_eq!(
            table.process_event(&key(KeyCode::Char('a'), KeyModifiers::NONE), 2),
            Some(TrackTableAction::Add)
        );
    }
}
