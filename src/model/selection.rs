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

//! Checked rows of the track table and bulk time shifts.
//!
//! Selection is held as row positions into the store's current order, so it
//! is only meaningful until the next reload and is cleared on every one.

use std::collections::BTreeSet;

use tracing::info;

use crate::{
    api::{ApiError, TrackApi},
    model::{EpisodeNumber, store},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    checked: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl Selection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.checked.len()
    }

    pub(crate) fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Flips one row and makes it the anchor for range selection.
    pub(crate) fn toggle(&mut self, index: usize) {
        if !self.checked.remove(&index) {
            self.checked.insert(index);
        }
        self.anchor = Some(index);
    }

    /// Checks every row between the anchor and `index`, inclusive.
    ///
    /// The anchor stays where it is so repeated range selections pivot
    /// around it. Without an anchor this behaves like [`Self::toggle`].
    pub(crate) fn extend_to(&mut self, index: usize) {
        let Some(anchor) = self.anchor else {
            self.toggle(index);
            return;
        };

        let (low, high) = if anchor <= index {
            (anchor, index)
        } else {
            (index, anchor)
        };
        self.checked.extend(low..=high);
    }

    pub(crate) fn select_all(&mut self, len: usize) {
        self.checked = (0..len).collect();
    }

    pub(crate) fn clear(&mut self) {
        self.checked.clear();
        self.anchor = None;
    }

    /// Checked rows in ascending order.
    pub(crate) fn sorted(&self) -> Vec<usize> {
        self.checked.iter().copied().collect()
    }

    /// The half-open range from the first to one past the last checked row.
    ///
    /// Rows inside the range that are not checked are still covered.
    pub(crate) fn shift_span(&self) -> Option<(usize, usize)> {
        let first = *self.checked.first()?;
        let last = *self.checked.last()?;
        Some((first, last + 1))
    }
}

/// Shifts the selected tracks by `delta_seconds` in a single backend call.
///
/// Returns `false` without calling the backend when nothing is selected.
pub(crate) fn bulk_shift(
    api: &dyn TrackApi,
    episode: EpisodeNumber,
    selection: &Selection,
    delta_seconds: f64,
) -> Result<bool, ApiError> {
    let Some((start, end)) = selection.shift_span() else {
        return Ok(false);
    };

    store::shift(api, episode, start, Some(end), delta_seconds)?;
    info!(episode, selected = ?selection.sorted(), "bulk shift applied");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ShiftRequest, fake::FakeTrackApi};

    #[test]
    fn toggle_checks_and_unchecks() {
        let mut selection = Selection::new();

        selection.toggle(3);
        assert!(selection.is_checked(3));
        assert_eq!(selection.anchor(), Some(3));

        selection.toggle(3);
        assert!(!selection.is_checked(3));
        assert_eq!(selection.anchor(), Some(3));
    }

    #[test]
    fn range_select_fills_from_anchor() {
        let mut selection = Selection::new();

        selection.toggle(2);
        selection.extend_to(5);

        assert_eq!(selection.sorted(), vec![2, 3, 4, 5]);
        assert_eq!(selection.anchor(), Some(2));
    }

    #[test]
    fn range_select_works_upwards() {
        let mut selection = Selection::new();

        selection.toggle(6);
        selection.extend_to(4);

        assert_eq!(selection.sorted(), vec![4, 5, 6]);
    }

    #[test]
    fn plain_toggle_moves_the_anchor() {
        let mut selection = Selection::new();

        selection.toggle(2);
        selection.extend_to(5);
        selection.toggle(1);

        assert_eq!(selection.anchor(), Some(1));
        assert_eq!(selection.sorted(), vec![1, 2, 3, 4, 5]);

        selection.extend_to(0);
        assert_eq!(selection.sorted(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_select_without_anchor_toggles() {
        let mut selection = Selection::new();

        selection.extend_to(4);

        assert_eq!(selection.sorted(), vec![4]);
        assert_eq!(selection.anchor(), Some(4));
    }

    #[test]
    fn select_all_and_clear() {
        let mut selection = Selection::new();
        selection.toggle(1);

        selection.select_all(4);
        assert_eq!(selection.sorted(), vec![0, 1, 2, 3]);

        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.anchor(), None);
    }

    #[test]
    fn span_covers_gaps() {
        let mut selection = Selection::new();
        selection.toggle(1);
        selection.toggle(3);

        assert_eq!(selection.shift_span(), Some((1, 4)));
    }

    #[test]
    fn bulk_shift_sends_the_enclosing_range() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0, 10.0, 20.0, 30.0, 40.0]);
        let mut selection = Selection::new();
        selection.toggle(1);
        selection.toggle(3);

        assert!(bulk_shift(&api, 1, &selection, 10.0).unwrap());

        assert_eq!(
            api.shift_calls(),
            vec![ShiftRequest {
                start_index: 1,
                end_index: Some(4),
                delta_seconds: 10.0
            }]
        );
        assert_eq!(api.start_times(1), vec![0.0, 20.0, 30.0, 40.0, 40.0]);
    }

    #[test]
    fn bulk_shift_with_nothing_selected_is_skipped() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);

        assert!(!bulk_shift(&api, 1, &Selection::new(), 5.0).unwrap());
        assert!(api.shift_calls().is_empty());
    }
}
