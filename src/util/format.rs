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

//! Time formatting for the track table, timeline and player line.

/// Formats a position in seconds as `M:SS`, or `H:MM:SS` from one hour.
///
/// Fractions are truncated and negative values clamp to zero.
///
/// # Examples
///
/// ```
/// assert_eq!(format_time(65.9), "1:05");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// ```
pub(crate) fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

/// Formats a signed shift amount, e.g. `+3.0s` or `-12.5s`.
pub(crate) fn format_delta(seconds: f64) -> String {
    format!("{seconds:+.1}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_times_use_minutes() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn long_times_include_hours() {
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(3725.0), "1:02:05");
    }

    #[test]
    fn invalid_times_clamp_to_zero() {
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn deltas_carry_a_sign() {
        assert_eq!(format_delta(3.0), "+3.0s");
        assert_eq!(format_delta(-12.5), "-12.5s");
    }
}
