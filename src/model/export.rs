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

//! Episode track list export and import documents.
//!
//! An export is a pretty-printed JSON file named `episode-{n}-tracks.json`
//! holding the episode number, the timestamp of the first track and the full
//! record of every track. The same document, read back from disk, is what an
//! episode import posts to the backend.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EpisodeNumber, Track, TrackRecord};

/// Timestamp layouts the backend is known to emit without an offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EpisodeExport {
    pub(crate) episode_number: EpisodeNumber,
    #[serde(default)]
    pub(crate) first_time: Option<String>,
    #[serde(default)]
    pub(crate) tracks: Vec<TrackRecord>,
}

impl EpisodeExport {
    pub(crate) fn new(
        episode_number: EpisodeNumber,
        first_time: Option<DateTime<Utc>>,
        tracks: &[Track],
    ) -> Self {
        Self {
            episode_number,
            first_time: first_time.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            tracks: tracks.iter().map(TrackRecord::from).collect(),
        }
    }
}

pub(crate) fn export_file_name(episode: EpisodeNumber) -> String {
    format!("episode-{episode}-tracks.json")
}

/// Writes the document into `dir` and returns the path of the new file.
pub(crate) fn write_export(dir: &Path, document: &EpisodeExport) -> Result<PathBuf> {
    let path = dir.join(export_file_name(document.episode_number));
    let json = serde_json::to_string_pretty(document).context("Failed to encode export")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

pub(crate) fn read_export(path: &Path) -> Result<EpisodeExport> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not an episode export", path.display()))
}

/// Parses the backend's first-track timestamp.
///
/// RFC 3339 values keep their offset; values without one are taken to be
/// local time.
pub(crate) fn parse_first_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, start: f64) -> Track {
        Track {
            id: Some(format!("id-{title}")),
            unique_id: Some(format!("u-{title}")),
            title: title.into(),
            start_time_seconds: Some(start),
            ..Track::default()
        }
    }

    #[test]
    fn export_document_matches_wire_shape() {
        let first = parse_first_time("2024-05-01T20:00:00Z");
        let document = EpisodeExport::new(320, first, &[track("a", 0.0), track("b", 95.5)]);

        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["episodeNumber"], 320);
        assert_eq!(value["firstTime"], "2024-05-01T20:00:00.000Z");
        assert_eq!(value["tracks"][1]["uniqueId"], "u-b");
        assert_eq!(value["tracks"][1]["startTimeSeconds"], 95.5);
        assert!(value["tracks"][0].get("id").is_none());
    }

    #[test]
    fn missing_first_time_exports_null() {
        let document = EpisodeExport::new(1, None, &[track("a", 0.0)]);
        let value = serde_json::to_value(&document).unwrap();
        assert!(value["firstTime"].is_null());
    }

    #[test]
    fn written_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let document = EpisodeExport::new(7, None, &[track("a", 1.0), track("b", 2.0)]);

        let path = write_export(dir.path(), &document).unwrap();

        assert_eq!(path.file_name().unwrap(), "episode-7-tracks.json");
        assert_eq!(read_export(&path).unwrap(), document);
    }

    #[test]
    fn reading_garbage_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let error = read_export(&path).unwrap_err();

        assert!(error.to_string().contains("is not an episode export"));
    }

    #[test]
    fn backend_timestamps_without_offset_parse() {
        assert!(parse_first_time("2024-05-01 20:00:00.123456").is_some());
        assert!(parse_first_time("2024-05-01T20:00:00").is_some());
        assert!(parse_first_time("yesterday").is_none());
    }
}
