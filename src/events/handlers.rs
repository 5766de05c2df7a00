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

use anyhow::Result;
use chrono::Local;
use tracing::{debug, info, warn};

use crate::{
    App,
    api::M3uImport,
    commander::Command,
    components::{
        ConfirmAction, FormAction, TimelineAction, TrackForm, TrackTableAction, ZoomDirection,
    },
    events::AppEvent,
    model::{EpisodeNumber, export::EpisodeExport, store::LoadedEpisode},
    player::PlayerState,
    tasks::AppTask,
};

const M3U_START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    debug!(?command, "command");

    match command {
        Command::SelectEpisode(episode) => select_episode(app, episode)?,
        Command::NewEpisode(episode) => {
            app.editor.start_episode(episode);
            app.episodes.select(episode);
            app.status.notice(format!("Episode {episode} started"));
        }
        Command::DeleteEpisode => match app.editor.episode() {
            Some(episode) => app.status.ask(ConfirmAction::DeleteEpisode(episode)),
            None => app.status.error("Please select an episode first"),
        },
        Command::Shift(delta) => request_bulk_shift(app, delta)?,
        Command::ToggleCascade => toggle_cascade(app),
        Command::Upload(path) => {
            app.status.notice("Uploading...");
            app.task_tx.send(AppTask::UploadAudio(path))?;
        }
        Command::ImportM3u {
            path,
            episode,
            start,
        } => {
            let Some(episode) = episode.or(app.editor.episode()) else {
                app.status.error("Please enter an episode number");
                return Ok(());
            };
            let start_datetime =
                start.unwrap_or_else(|| Local::now().format(M3U_START_FORMAT).to_string());

            app.status.notice("Importing...");
            app.task_tx.send(AppTask::ImportM3u(M3uImport {
                path,
                episode,
                start_datetime,
            }))?;
        }
        Command::Export(dir) => match app.editor.export_document() {
            Ok(document) => {
                let dir = dir.unwrap_or_else(|| app.config.export_dir.clone());
                app.task_tx.send(AppTask::ExportEpisode { dir, document })?;
            }
            Err(message) => app.status.error(message),
        },
        Command::ImportEpisode { path, episode } => {
            let Some(episode) = episode.or(app.editor.episode()) else {
                app.status.error("Please enter an episode number");
                return Ok(());
            };
            app.task_tx
                .send(AppTask::ReadEpisodeImport { path, episode })?;
        }
        Command::Zoom(direction) => zoom(app, direction),
        Command::Reload => reload(app)?,
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

pub(super) fn handle_episodes_loaded(app: &mut App, episodes: Vec<EpisodeNumber>) {
    app.episodes.set_episodes(episodes, app.editor.episode());
}

pub(super) fn handle_tracks_loaded(app: &mut App, loaded: LoadedEpisode, preserve_scroll: bool) {
    let episode = loaded.episode;
    app.editor.apply_loaded(loaded, preserve_scroll);
    app.episodes.select(episode);
}

pub(super) fn handle_track_saved(app: &mut App) {
    app.track_form = None;
    app.status.notice("Track saved");
}

pub(super) fn handle_episode_deleted(app: &mut App, episode: EpisodeNumber) -> Result<()> {
    if app.editor.episode() == Some(episode) {
        app.editor.clear_episode();
    }
    app.status.notice(format!("Episode {episode} deleted"));
    app.task_tx.send(AppTask::LoadEpisodes)?;

    Ok(())
}

pub(super) fn handle_episode_import_ready(
    app: &mut App,
    episode: EpisodeNumber,
    document: EpisodeExport,
) {
    app.status
        .ask(ConfirmAction::ImportEpisode { episode, document });
}

pub(super) fn handle_episode_imported(app: &mut App, episode: EpisodeNumber) -> Result<()> {
    app.task_tx.send(AppTask::LoadEpisodes)?;
    select_episode(app, episode)
}

pub(super) fn handle_audio_uploaded(
    app: &mut App,
    url: String,
    duration: Option<f64>,
) -> Result<()> {
    app.audio_player.load(&url)?;
    app.editor.load_audio(duration);
    info!(%url, ?duration, "audio loaded");
    app.status.notice("Audio loaded");
    app.audio_url = Some(url);

    Ok(())
}

pub(super) fn handle_player_state_changed(app: &mut App, state: PlayerState) {
    app.player_state = state;
}

pub(super) fn handle_duration_changed(app: &mut App, duration: f64) {
    app.editor.set_duration(Some(duration));
}

pub(super) fn handle_time_changed(app: &mut App, seconds: f64) {
    let playing = app.player_state == PlayerState::Playing;
    app.editor.follow_playhead(seconds, playing);
}

/// Applies the answer to the pending confirmation prompt.
pub(super) fn handle_confirmation(app: &mut App, yes: bool) -> Result<()> {
    let Some(action) = app.status.answer(yes) else {
        return Ok(());
    };

    match action {
        ConfirmAction::DeleteTrack { episode, track_id } => {
            app.task_tx
                .send(AppTask::DeleteTrack { episode, track_id })?;
        }
        ConfirmAction::DeleteEpisode(episode) => {
            app.task_tx.send(AppTask::DeleteEpisode(episode))?;
        }
        ConfirmAction::ImportEpisode { episode, document } => {
            app.status.notice("Importing...");
            app.task_tx
                .send(AppTask::ImportEpisode { episode, document })?;
        }
    }

    Ok(())
}

pub(super) fn handle_form_action(app: &mut App, action: FormAction) -> Result<()> {
    match action {
        FormAction::Submit(episode, track) => {
            app.task_tx.send(AppTask::SaveTrack { episode, track })?;
        }
        FormAction::Cancel => app.track_form = None,
    }

    Ok(())
}

pub(super) fn handle_track_table_action(app: &mut App, action: TrackTableAction) -> Result<()> {
    match action {
        TrackTableAction::Toggle(index) => app.editor.selection.toggle(index),
        TrackTableAction::ExtendTo(index) => app.editor.selection.extend_to(index),
        TrackTableAction::SelectAll => {
            let len = app.editor.store.len();
            app.editor.selection.select_all(len);
        }
        TrackTableAction::ClearSelection => app.editor.selection.clear(),
        TrackTableAction::Add => open_add_form(app, false),
        TrackTableAction::InsertAtPlayhead => open_add_form(app, true),
        TrackTableAction::Edit(index) => {
            if let (Some(episode), Some(track)) = (app.editor.episode(), app.editor.track_at(index)) {
                app.track_form = Some(TrackForm::edit(episode, track));
            }
        }
        TrackTableAction::Delete(index) => request_delete_track(app, index),
        TrackTableAction::GoTo(index) => go_to_track(app, index)?,
    }

    Ok(())
}

pub(super) fn handle_timeline_action(app: &mut App, action: TimelineAction) -> Result<()> {
    match action {
        TimelineAction::Grab(marker) => {
            if app.editor.grab(marker) {
                debug!(?marker, "marker grabbed");
            }
        }
        TimelineAction::Nudge(delta) => app.editor.nudge(delta),
        TimelineAction::Drop => {
            if let Some(commit) = app.editor.drop_marker() {
                app.task_tx.send(AppTask::CommitDrag(commit))?;
            }
        }
        TimelineAction::Cancel => app.editor.cancel_drag(),
        TimelineAction::Zoom(direction) => zoom(app, direction),
        TimelineAction::TogglePlay => toggle_play(app)?,
    }

    Ok(())
}

pub(super) fn select_episode(app: &mut App, episode: EpisodeNumber) -> Result<()> {
    app.episodes.select(episode);
    app.task_tx.send(AppTask::LoadTracks {
        episode,
        preserve_scroll: false,
    })?;

    Ok(())
}

pub(super) fn reload(app: &mut App) -> Result<()> {
    app.task_tx.send(AppTask::LoadEpisodes)?;
    if let Some(episode) = app.editor.episode() {
        app.task_tx.send(AppTask::LoadTracks {
            episode,
            preserve_scroll: false,
        })?;
    }

    Ok(())
}

pub(super) fn toggle_cascade(app: &mut App) {
    let on = app.editor.markers.toggle_cascade();
    app.status
        .notice(format!("Cascade mode {}", if on { "on" } else { "off" }));
}

pub(super) fn zoom(app: &mut App, direction: ZoomDirection) {
    if !app.editor.zoom(direction) {
        debug!(?direction, "zoom unchanged");
    }
}

pub(super) fn toggle_play(app: &mut App) -> Result<()> {
    if app.audio_url.is_none() {
        app.status.error("Please upload an audio file first");
        return Ok(());
    }
    app.audio_player.toggle_pause()
}

pub(super) fn seek(app: &mut App, delta: i32) -> Result<()> {
    if app.audio_url.is_some() {
        app.audio_player.seek(delta)?;
    }
    Ok(())
}

fn request_bulk_shift(app: &mut App, delta: f64) -> Result<()> {
    match app.editor.shift_request() {
        Ok((episode, selection)) => {
            app.task_tx.send(AppTask::BulkShift {
                episode,
                selection,
                delta,
            })?;
        }
        Err(message) => app.status.error(message),
    }

    Ok(())
}

fn open_add_form(app: &mut App, at_playhead: bool) {
    let Some(episode) = app.editor.episode() else {
        app.status.error("Please select an episode first");
        return;
    };

    let start = match (at_playhead, app.editor.playhead()) {
        (true, None) => {
            app.status.error("Please upload an audio file first");
            return;
        }
        (_, playhead) => playhead.unwrap_or(0.0),
    };

    app.track_form = Some(TrackForm::add(episode, start));
}

fn request_delete_track(app: &mut App, index: usize) {
    let Some(episode) = app.editor.episode() else {
        return;
    };
    match app.editor.track_at(index).and_then(|t| t.id.clone()) {
        Some(track_id) => app
            .status
            .ask(ConfirmAction::DeleteTrack { episode, track_id }),
        None => warn!(index, "track has no id, cannot delete"),
    }
}

fn go_to_track(app: &mut App, index: usize) -> Result<()> {
    app.editor.focus_marker_of(index);
    match app.editor.start_of(index) {
        Some(start) => app.audio_player.play_from(start)?,
        None => debug!(index, "track start is outside the loaded audio"),
    }
    Ok(())
}
