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

//! Background task processing.
//!
//! Every backend call blocks on the network, so none of them run on the UI
//! thread. The UI sends an [`AppTask`] to a dedicated worker which performs
//! the calls against a [`TrackApi`] and reports the outcome back as
//! [`AppEvent`]s. Mutating tasks finish by reloading the episode, so the
//! track store only ever changes from a fresh fetch.
//!
//! A failing task never stops the worker: its error is turned into an
//! [`AppEvent::Error`] for the status line.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use tracing::{debug, error};

use crate::{
    api::{HttpTrackApi, M3uImport, TrackApi},
    config::AppConfig,
    events::AppEvent,
    model::{
        EpisodeNumber, Track, export::EpisodeExport, markers::DragCommit, selection::Selection,
    },
};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadEpisodes,
    LoadTracks {
        episode: EpisodeNumber,
        preserve_scroll: bool,
    },

    SaveTrack {
        episode: EpisodeNumber,
        track: Track,
    },
    DeleteTrack {
        episode: EpisodeNumber,
        track_id: String,
    },
    CommitDrag(DragCommit),
    BulkShift {
        episode: EpisodeNumber,
        selection: Selection,
        delta: f64,
    },

    DeleteEpisode(EpisodeNumber),

    UploadAudio(PathBuf),
    ImportM3u(M3uImport),

    ExportEpisode {
        dir: PathBuf,
        document: EpisodeExport,
    },
    ReadEpisodeImport {
        path: PathBuf,
        episode: EpisodeNumber,
    },
    ImportEpisode {
        episode: EpisodeNumber,
        document: EpisodeExport,
    },
}

/// Spawns the task worker, talking to the server named in the
/// configuration.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let api = HttpTrackApi::new(&config.server_url);

        while let Ok(task) = task_rx.recv() {
            let ctx = TaskContext {
                event_tx: &event_tx,
                api: &api,
            };

            run_task(task, &ctx);
        }

        debug!("task channel closed, worker exiting");
    });
}

/// Shared resources for task handlers.
pub(crate) struct TaskContext<'a> {
    pub(crate) event_tx: &'a Sender<AppEvent>,
    pub(crate) api: &'a dyn TrackApi,
}

/// Runs one task, reporting any failure to the UI.
pub(crate) fn run_task(task: AppTask, ctx: &TaskContext) {
    debug!(?task, "running task");

    if let Err(e) = handle_task(task, ctx) {
        error!(error = %format!("{e:#}"), "task failed");
        let _ = ctx.event_tx.send(AppEvent::Error(format!("{e:#}")));
    }
}

fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::LoadEpisodes => handlers::load_episodes(ctx),
        AppTask::LoadTracks {
            episode,
            preserve_scroll,
        } => handlers::load_tracks(ctx, episode, preserve_scroll),

        AppTask::SaveTrack { episode, track } => handlers::save_track(ctx, episode, &track),
        AppTask::DeleteTrack { episode, track_id } => {
            handlers::delete_track(ctx, episode, &track_id)
        }
        AppTask::CommitDrag(commit) => handlers::commit_drag(ctx, &commit),
        AppTask::BulkShift {
            episode,
            selection,
            delta,
        } => handlers::bulk_shift(ctx, episode, &selection, delta),

        AppTask::DeleteEpisode(episode) => handlers::delete_episode(ctx, episode),

        AppTask::UploadAudio(path) => handlers::upload_audio(ctx, &path),
        AppTask::ImportM3u(import) => handlers::import_m3u(ctx, &import),

        AppTask::ExportEpisode { dir, document } => handlers::export_episode(ctx, &dir, &document),
        AppTask::ReadEpisodeImport { path, episode } => {
            handlers::read_episode_import(ctx, &path, episode)
        }
        AppTask::ImportEpisode { episode, document } => {
            handlers::import_episode(ctx, episode, &document)
        }
    }
}
