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

use std::path::Path;

use anyhow::{Context, Result};
use lofty::prelude::*;
use tracing::{info, warn};

use crate::{
    api::M3uImport,
    events::AppEvent,
    model::{
        EpisodeNumber, Track,
        export::{self, EpisodeExport},
        markers::{self, DragCommit},
        selection::{self, Selection},
        store,
    },
    tasks::TaskContext,
    util::format::format_delta,
};

pub(super) fn load_episodes(ctx: &TaskContext) -> Result<()> {
    let episodes = ctx.api.list_episodes().context("Error loading episodes")?;
    ctx.event_tx.send(AppEvent::EpisodesLoaded(episodes))?;

    Ok(())
}

pub(super) fn load_tracks(ctx: &TaskContext, episode: EpisodeNumber, preserve_scroll: bool) -> Result<()> {
    let loaded = store::fetch_episode(ctx.api, episode).context("Error loading tracks")?;
    ctx.event_tx.send(AppEvent::TracksLoaded {
        loaded,
        preserve_scroll,
    })?;

    Ok(())
}

pub(super) fn save_track(ctx: &TaskContext, episode: EpisodeNumber, track: &Track) -> Result<()> {
    store::save(ctx.api, episode, track).context("Error saving track")?;
    ctx.event_tx.send(AppEvent::TrackSaved)?;

    load_tracks(ctx, episode, false)
}

pub(super) fn delete_track(ctx: &TaskContext, episode: EpisodeNumber, track_id: &str) -> Result<()> {
    store::remove(ctx.api, episode, track_id).context("Error deleting track")?;

    load_tracks(ctx, episode, false)
}

/// Saves a dropped marker and reloads without losing the timeline position.
///
/// On failure nothing is reloaded: whatever part of the change the backend
/// accepted shows up on the next reload.
pub(super) fn commit_drag(ctx: &TaskContext, commit: &DragCommit) -> Result<()> {
    markers::persist_drag(ctx.api, commit).context("Error updating track time")?;

    load_tracks(ctx, commit.episode, true)
}

pub(super) fn bulk_shift(
    ctx: &TaskContext,
    episode: EpisodeNumber,
    selection: &Selection,
    delta: f64,
) -> Result<()> {
    let shifted =
        selection::bulk_shift(ctx.api, episode, selection, delta).context("Error shifting tracks")?;

    if !shifted {
        ctx.event_tx.send(AppEvent::Error(
            "Please select at least one track to shift".into(),
        ))?;
        return Ok(());
    }

    ctx.event_tx.send(AppEvent::Notice(format!(
        "Shifted {} tracks by {}",
        selection.len(),
        format_delta(delta)
    )))?;

    load_tracks(ctx, episode, false)
}

pub(super) fn delete_episode(ctx: &TaskContext, episode: EpisodeNumber) -> Result<()> {
    ctx.api
        .delete_episode(episode)
        .with_context(|| format!("Error deleting episode {episode}"))?;
    info!(episode, "episode deleted");

    ctx.event_tx.send(AppEvent::EpisodeDeleted(episode))?;

    Ok(())
}

/// Uploads a local audio file and hands its playable url to the player.
///
/// The duration is read from the local file so markers can be placed before
/// the player has opened the stream.
pub(super) fn upload_audio(ctx: &TaskContext, path: &Path) -> Result<()> {
    let url = ctx.api.upload_audio(path).context("Error uploading file")?;
    info!(path = %path.display(), %url, "audio uploaded");

    ctx.event_tx.send(AppEvent::AudioUploaded {
        url: ctx.api.media_url(&url),
        duration: read_duration(path),
    })?;

    Ok(())
}

fn read_duration(path: &Path) -> Option<f64> {
    match lofty::read_from_path(path) {
        Ok(tagged_file) => {
            let seconds = tagged_file.properties().duration().as_secs_f64();
            (seconds > 0.0).then_some(seconds)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read audio duration");
            None
        }
    }
}

pub(super) fn import_m3u(ctx: &TaskContext, import: &M3uImport) -> Result<()> {
    let summary = ctx.api.import_m3u(import).context("Error importing M3U")?;
    info!(?summary, "m3u imported");

    ctx.event_tx.send(AppEvent::Notice(format!(
        "Import successful! {} tracks imported, {} tracks with metadata extracted, {} durations updated",
        summary.tracks_imported, summary.metadata_extracted, summary.duration_updates
    )))?;
    ctx.event_tx
        .send(AppEvent::EpisodeImported(summary.episode_number))?;

    Ok(())
}

pub(super) fn export_episode(ctx: &TaskContext, dir: &Path, document: &EpisodeExport) -> Result<()> {
    let path = export::write_export(dir, document)?;
    info!(episode = document.episode_number, path = %path.display(), "episode exported");

    ctx.event_tx.send(AppEvent::Notice(format!(
        "Exported {} tracks to {}",
        document.tracks.len(),
        path.display()
    )))?;

    Ok(())
}

/// Reads an export file and asks the UI to confirm replacing `episode`.
pub(super) fn read_episode_import(ctx: &TaskContext, path: &Path, episode: EpisodeNumber) -> Result<()> {
    let document = export::read_export(path)?;

    ctx.event_tx
        .send(AppEvent::EpisodeImportReady { episode, document })?;

    Ok(())
}

pub(super) fn import_episode(
    ctx: &TaskContext,
    episode: EpisodeNumber,
    document: &EpisodeExport,
) -> Result<()> {
    let summary = ctx
        .api
        .import_episode(episode, document)
        .context("Error importing episode")?;
    info!(episode, tracks = summary.tracks_imported, "episode imported");

    ctx.event_tx.send(AppEvent::Notice(format!(
        "Import successful! {} tracks imported",
        summary.tracks_imported
    )))?;
    ctx.event_tx.send(AppEvent::EpisodeImported(episode))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::{
        api::{TrackApi, fake::FakeTrackApi},
        model::{TrackRecord, markers::MarkerSync},
        tasks::{AppTask, run_task},
    };

    fn run(api: &FakeTrackApi, task: AppTask) -> Vec<AppEvent> {
        let (event_tx, event_rx): (_, Receiver<AppEvent>) = mpsc::channel();
        let ctx = TaskContext {
            event_tx: &event_tx,
            api,
        };
        run_task(task, &ctx);
        event_rx.try_iter().collect()
    }

    fn drop_first_marker(api: &FakeTrackApi, to: f64, cascade: bool) -> DragCommit {
        let tracks = store::fetch_episode(api, 1).unwrap().tracks;
        let mut sync = MarkerSync::new();
        if cascade {
            sync.toggle_cascade();
        }
        sync.rebuild(&tracks, Some(3600.0));

        let marker = sync.markers()[0].id;
        sync.begin_drag(marker);
        sync.drag_by(to - tracks[0].start_or_zero());
        let end = sync.end_drag().unwrap();

        DragCommit::new(1, 0, tracks[0].clone(), &end)
    }

    #[test]
    fn drag_commit_reloads_keeping_scroll() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0, 20.0]);
        let commit = drop_first_marker(&api, 8.0, true);

        let events = run(&api, AppTask::CommitDrag(commit));

        let [
            AppEvent::TracksLoaded {
                loaded,
                preserve_scroll: true,
            },
        ] = events.as_slice()
        else {
            panic!("expected a scroll-preserving reload, got {events:?}");
        };
        let starts: Vec<f64> = loaded.tracks.iter().map(|t| t.start_or_zero()).collect();
        assert_eq!(starts, vec![8.0, 13.0, 23.0]);
    }

    #[test]
    fn failed_drag_commit_reports_without_reload() {
        let api = FakeTrackApi::new().with_tracks(1, &[5.0, 10.0]);
        let commit = drop_first_marker(&api, 8.0, false);
        api.fail("update");

        let events = run(&api, AppTask::CommitDrag(commit));

        let [AppEvent::Error(message)] = events.as_slice() else {
            panic!("expected a single error, got {events:?}");
        };
        assert_eq!(message, "Error updating track time: update failed");
    }

    #[test]
    fn saving_closes_the_form_then_reloads() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);
        let track = Track {
            title: "New".into(),
            start_time_seconds: Some(30.0),
            ..Track::default()
        };

        let events = run(&api, AppTask::SaveTrack { episode: 1, track });

        assert!(matches!(events[0], AppEvent::TrackSaved));
        assert!(matches!(
            &events[1],
            AppEvent::TracksLoaded {
                preserve_scroll: false,
                loaded,
            } if loaded.tracks.len() == 2
        ));
    }

    #[test]
    fn delete_failure_is_reported() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);
        api.fail("delete");

        let events = run(
            &api,
            AppTask::DeleteTrack {
                episode: 1,
                track_id: "u1-0".into(),
            },
        );

        assert!(matches!(&events[..], [AppEvent::Error(m)] if m.starts_with("Error deleting track")));
    }

    #[test]
    fn empty_bulk_shift_is_rejected() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0]);

        let events = run(
            &api,
            AppTask::BulkShift {
                episode: 1,
                selection: Selection::new(),
                delta: 5.0,
            },
        );

        assert!(matches!(
            &events[..],
            [AppEvent::Error(m)] if m == "Please select at least one track to shift"
        ));
        assert!(api.shift_calls().is_empty());
    }

    #[test]
    fn bulk_shift_reports_and_reloads() {
        let api = FakeTrackApi::new().with_tracks(1, &[0.0, 10.0, 20.0]);
        let mut selection = Selection::new();
        selection.toggle(1);
        selection.extend_to(2);

        let events = run(
            &api,
            AppTask::BulkShift {
                episode: 1,
                selection,
                delta: -2.0,
            },
        );

        assert!(matches!(&events[0], AppEvent::Notice(m) if m == "Shifted 2 tracks by -2.0s"));
        assert!(matches!(&events[1], AppEvent::TracksLoaded { .. }));
        assert_eq!(api.start_times(1), vec![0.0, 8.0, 18.0]);
    }

    #[test]
    fn deleting_an_episode_is_announced() {
        let api = FakeTrackApi::new().with_tracks(3, &[0.0]);

        let events = run(&api, AppTask::DeleteEpisode(3));

        assert!(matches!(&events[..], [AppEvent::EpisodeDeleted(3)]));
        assert!(api.list_episodes().unwrap().is_empty());
    }

    #[test]
    fn export_then_import_reproduces_the_records() {
        let api = FakeTrackApi::new()
            .with_tracks(1, &[0.0, 95.5, 300.0])
            .with_first_time("2024-05-01T20:00:00Z");
        let dir = tempfile::tempdir().unwrap();

        let loaded = store::fetch_episode(&api, 1).unwrap();
        let document = EpisodeExport::new(1, loaded.first_time, &loaded.tracks);
        run(
            &api,
            AppTask::ExportEpisode {
                dir: dir.path().to_path_buf(),
                document,
            },
        );

        let path = dir.path().join("episode-1-tracks.json");
        let events = run(&api, AppTask::ReadEpisodeImport { path, episode: 2 });
        let Some(AppEvent::EpisodeImportReady { episode, document }) = events.into_iter().next() else {
            panic!("expected the import to be read");
        };

        let events = run(&api, AppTask::ImportEpisode { episode, document });
        assert!(matches!(&events[..], [AppEvent::Notice(_), AppEvent::EpisodeImported(2)]));

        let records = |ep| -> Vec<TrackRecord> {
            store::fetch_episode(&api, ep)
                .unwrap()
                .tracks
                .iter()
                .map(TrackRecord::from)
                .collect()
        };
        assert_eq!(records(2), records(1));
    }

    #[test]
    fn m3u_import_selects_the_imported_episode() {
        let api = FakeTrackApi::new();
        let import = M3uImport {
            path: "show.m3u".into(),
            episode: 77,
            start_datetime: "2024-05-01 20:00:00".into(),
        };

        let events = run(&api, AppTask::ImportM3u(import));

        assert!(matches!(&events[..], [AppEvent::Notice(_), AppEvent::EpisodeImported(77)]));
    }
}
