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

//! Terminal background control through OSC escape sequences.
//!
//! Supported by most modern emulators (XTerm, Alacritty, Kitty, iTerm2);
//! others ignore the sequences.

use std::io::{self, Write};

/// Paints the whole terminal window with `hex_color` (e.g. `"#1e1e1e"`), so
/// no default-coloured border shows around the UI.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    write_osc(&format!("11;{hex_color}"));
}

/// Restores the emulator's own background on exit.
pub(crate) fn reset_terminal_bg() {
    write_osc("111");
}

fn write_osc(body: &str) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x1b]{body}\x07");
    let _ = stdout.flush();
}
