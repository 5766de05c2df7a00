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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the editor, the tracks of an
//! episode as the backend reports them and the full record that is sent back
//! whenever a track is created, replaced or exported.

pub(crate) mod export;
pub(crate) mod markers;
pub(crate) mod selection;
pub(crate) mod store;

use serde::{Deserialize, Deserializer, Serialize};

pub(crate) const UNTITLED: &str = "Untitled";
pub(crate) const UNKNOWN_ARTIST: &str = "Unknown";
pub(crate) const NO_ALBUM: &str = "N/A";
pub(crate) const NO_LENGTH: &str = "0:00";

/// Episode numbers are the grouping key for every backend resource.
pub(crate) type EpisodeNumber = u32;

/// One labelled segment of an episode's audio.
///
/// An `id` of `None` marks a track that has not been saved yet. The backend
/// assigns ids either as strings (`uniqueId` or `rowid_N`) or as numbers,
/// both are normalised to strings on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Track {
    #[serde(default, deserialize_with = "de_optional_id")]
    pub(crate) id: Option<String>,
    #[serde(default, deserialize_with = "de_optional_id")]
    pub(crate) unique_id: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) artist: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) album: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) length: String,
    /// `None` when the backend has no start time for the track.
    #[serde(default)]
    pub(crate) start_time_seconds: Option<f64>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) ignore: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) artwork_url: String,
}

impl Track {
    /// Sort key for start-time order. Tracks without a start time sort as if
    /// they started at zero.
    pub(crate) fn start_or_zero(&self) -> f64 {
        self.start_time_seconds.unwrap_or(0.0)
    }

    pub(crate) fn display_title(&self) -> &str {
        non_empty_or(&self.title, UNTITLED)
    }

    pub(crate) fn display_artist(&self) -> &str {
        non_empty_or(&self.artist, UNKNOWN_ARTIST)
    }

    pub(crate) fn display_album(&self) -> &str {
        non_empty_or(&self.album, NO_ALBUM)
    }

    pub(crate) fn display_length(&self) -> &str {
        non_empty_or(&self.length, NO_LENGTH)
    }
}

/// The full track record used for create, replace, export and import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackRecord {
    #[serde(default, deserialize_with = "de_optional_id")]
    pub(crate) unique_id: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) artist: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) album: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) length: String,
    #[serde(default)]
    pub(crate) start_time_seconds: Option<f64>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) ignore: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) artwork_url: String,
}

impl From<&Track> for TrackRecord {
    fn from(track: &Track) -> Self {
        Self {
            unique_id: track.unique_id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            length: track.length.clone(),
            start_time_seconds: track.start_time_seconds,
            ignore: track.ignore,
            artwork_url: track.artwork_url.clone(),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) if !text.is_empty() => Some(text),
        Some(RawId::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_track_decodes_with_string_or_numeric_ids() {
        let json = r#"[
            {"id": "abc", "uniqueId": "abc", "title": "One", "startTimeSeconds": 12.5, "ignore": false},
            {"id": 42, "uniqueId": null, "title": null, "artist": "", "startTimeSeconds": 0}
        ]"#;

        let tracks: Vec<Track> = serde_json::from_str(json).unwrap();

        assert_eq!(tracks[0].id.as_deref(), Some("abc"));
        assert_eq!(tracks[0].start_time_seconds, Some(12.5));
        assert_eq!(tracks[1].id.as_deref(), Some("42"));
        assert_eq!(tracks[1].unique_id, None);
        assert_eq!(tracks[1].display_title(), UNTITLED);
        assert_eq!(tracks[1].display_artist(), UNKNOWN_ARTIST);
        assert_eq!(tracks[1].display_album(), NO_ALBUM);
        assert_eq!(tracks[1].display_length(), NO_LENGTH);
    }

    #[test]
    fn missing_or_null_start_time_stays_unknown() {
        let json = r#"[
            {"id": "a", "title": "No start"},
            {"id": "b", "startTimeSeconds": null}
        ]"#;

        let tracks: Vec<Track> = serde_json::from_str(json).unwrap();

        assert_eq!(tracks[0].start_time_seconds, None);
        assert_eq!(tracks[1].start_time_seconds, None);
        assert_eq!(tracks[1].start_or_zero(), 0.0);
        assert!(serde_json::to_value(TrackRecord::from(&tracks[0])).unwrap()["startTimeSeconds"].is_null());
    }

    #[test]
    fn record_carries_every_attribute_with_new_time() {
        let track = Track {
            id: Some("rowid_3".into()),
            unique_id: Some("u-3".into()),
            title: "Title".into(),
            artist: "Artist".into(),
            album: "Album".into(),
            length: "4:20".into(),
            start_time_seconds: Some(10.0),
            ignore: true,
            artwork_url: "http://art".into(),
        };

        let record = TrackRecord::from(&Track {
            start_time_seconds: Some(13.0),
            ..track
        });

        assert_eq!(record.unique_id.as_deref(), Some("u-3"));
        assert_eq!(record.title, "Title");
        assert_eq!(record.length, "4:20");
        assert_eq!(record.start_time_seconds, Some(13.0));
        assert!(record.ignore);
        assert_eq!(record.artwork_url, "http://art");
    }

    #[test]
    fn record_serialises_camel_case() {
        let record = TrackRecord {
            start_time_seconds: Some(1.5),
            ..TrackRecord::default()
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["startTimeSeconds"], 1.5);
        assert!(value["uniqueId"].is_null());
        assert!(value.get("artworkUrl").is_some());
    }
}
