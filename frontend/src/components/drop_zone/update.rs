//! Update function for the drop zone.
//!
//! Drag messages drive the shared `DragSurface`; a drop is classified there
//! and routed by `dispatch`. Remote references are downloaded on a spawned
//! task that reports back through `Msg::Phase`, `Msg::RemoteReady` and
//! `Msg::RemoteFailed`.

use common::ingest::{dispatch, handle_files, Dispatch, IngestionOrchestrator, IngestionResult};
use common::IngestError;
use log::{debug, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::platform::{BrowserFile, GlooHttpClient, GlooTimer};

use super::messages::Msg;
use super::state::DropZone;

pub fn update(component: &mut DropZone, ctx: &Context<DropZone>, msg: Msg) -> bool {
    match msg {
        Msg::DragEnter(items) => component.surface.on_enter(&items),
        Msg::DragLeave => component.surface.on_leave(),
        Msg::Drop(transfer) => {
            let payload = component.surface.on_drop(&transfer);
            match dispatch(payload, component.policy()) {
                Dispatch::Files(result) => {
                    ctx.props()
                        .on_files_drop
                        .emit((result.accepted.clone(), result.rejected.clone()));
                    deliver(component, ctx, result);
                }
                Dispatch::Remote(url) => {
                    component.last_error = None;
                    ctx.props().on_url_drop.emit(url.clone());
                    start_download(ctx, url);
                }
                Dispatch::Failed(err) => report_error(component, ctx, err.user_message()),
            }
            true
        }
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FilesPicked(files) => {
            if files.is_empty() {
                return false;
            }
            let mut result = handle_files(&files, component.policy());
            if result.accepted.is_empty() {
                result.error = Some(IngestError::PolicyRejection.user_message());
            }
            deliver(component, ctx, result);
            // Allow picking the same file again.
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.set_value("");
            }
            true
        }
        Msg::Phase(phase) => {
            debug!("download phase: {:?}", phase);
            component.phase = phase;
            true
        }
        Msg::RemoteReady(file) => {
            ctx.props()
                .on_file_select
                .emit(vec![BrowserFile::from_file_like(&file)]);
            false
        }
        Msg::RemoteFailed(message) => {
            report_error(component, ctx, message);
            true
        }
        Msg::PreferencesChanged(preferences) => {
            component.preferences = preferences;
            true
        }
    }
}

/// Hands accepted files to `on_file_select`, or the error to `on_error`.
fn deliver(component: &mut DropZone, ctx: &Context<DropZone>, result: IngestionResult<BrowserFile>) {
    if let Some(message) = result.error {
        report_error(component, ctx, message);
    } else if !result.accepted.is_empty() {
        info!(
            "{} file(s) accepted, {} rejected",
            result.accepted.len(),
            result.rejected.len()
        );
        component.last_error = None;
        ctx.props().on_file_select.emit(result.accepted);
    }
}

fn report_error(component: &mut DropZone, ctx: &Context<DropZone>, message: String) {
    component.last_error = Some(message.clone());
    ctx.props().on_error.emit(message);
}

/// Downloads `url` off the event loop. Overlapping drops are not deduplicated:
/// each one runs to completion and reports on its own.
fn start_download(ctx: &Context<DropZone>, url: String) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let orchestrator = IngestionOrchestrator::new(GlooHttpClient, GlooTimer);
        let phase_link = link.clone();
        let file_link = link.clone();
        let outcome = orchestrator
            .handle_remote_reference(
                &url,
                move |phase| phase_link.send_message(Msg::Phase(phase)),
                move |file| file_link.send_message(Msg::RemoteReady(file)),
            )
            .await;
        if let Err(err) = outcome {
            link.send_message(Msg::RemoteFailed(err.user_message()));
        }
    });
}
