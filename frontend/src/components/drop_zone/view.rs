//! View rendering for the drop zone.
//!
//! The zone is a single `<div>` carrying the four native drag handlers from
//! [`register_drop_target`], a status line, and a hidden file input for
//! click-to-browse.

use yew::html::Scope;
use yew::prelude::*;

use common::ingest::DragSurface;

use crate::platform::{drag_items, files_from_list, DomTransfer};

use super::helpers::zone_status;
use super::messages::Msg;
use super::state::DropZone;

/// Handler bindings for a drop target plus the live flags to render.
pub struct RootProps {
    pub ondragenter: Callback<DragEvent>,
    pub ondragleave: Callback<DragEvent>,
    pub ondragover: Callback<DragEvent>,
    pub ondrop: Callback<DragEvent>,
    pub is_active: bool,
    pub is_rejected: bool,
}

/// Binds the native drag events of an element to `surface`.
///
/// Every handler prevents the browser default (opening the file). The drop
/// handler snapshots the transfer data while it is still readable.
pub fn register_drop_target(link: &Scope<DropZone>, surface: &DragSurface) -> RootProps {
    let effect = surface.on_over();

    RootProps {
        ondragenter: link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragEnter(drag_items(&e))
        }),
        ondragleave: link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragLeave
        }),
        ondragover: Callback::from(move |e: DragEvent| {
            e.prevent_default();
            if let Some(transfer) = e.data_transfer() {
                transfer.set_drop_effect(effect.as_str());
            }
        }),
        ondrop: link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::Drop(DomTransfer::capture(&e))
        }),
        is_active: surface.is_active(),
        is_rejected: surface.is_rejected(),
    }
}

pub fn view(component: &DropZone, ctx: &Context<DropZone>) -> Html {
    let link = ctx.link();
    let root = register_drop_target(link, &component.surface);
    let status = zone_status(root.is_active, root.is_rejected, component.phase);
    let policy = component.policy();

    html! {
        <div
            class={classes!("drop-zone", status.class(), component.preferences.theme_class())}
            ondragenter={root.ondragenter}
            ondragleave={root.ondragleave}
            ondragover={root.ondragover}
            ondrop={root.ondrop}
            onclick={link.callback(|_| Msg::OpenFileDialog)}
        >
            <i class="material-icons drop-zone-icon">{ status.icon() }</i>
            <span class="drop-zone-label">{ status.label() }</span>
            {
                if let Some(error) = &component.last_error {
                    html! { <span class="drop-zone-error">{ error.clone() }</span> }
                } else {
                    html! {}
                }
            }
            { ctx.props().children.clone() }
            <input
                type="file"
                ref={component.file_input_ref.clone()}
                accept={policy.accept_attribute()}
                multiple={policy.allows_multiple()}
                style="display:none;"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                onchange={link.callback(|e: Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    Msg::FilesPicked(input.files().map(files_from_list).unwrap_or_default())
                })}
            />
        </div>
    }
}
