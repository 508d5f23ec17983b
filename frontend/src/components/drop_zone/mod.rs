//! Drop zone: the drop target for post images.
//!
//! Wires the shared drag surface and ingestion orchestrator into a Yew
//! component. Local files are partitioned against the policy, image links
//! are downloaded, and the results reach the parent through the callbacks
//! in [`DropZoneProps`]. Clicking the zone opens the native file picker and
//! feeds the same policy.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use messages::Msg;
pub use props::DropZoneProps;
pub use state::DropZone;

impl Component for DropZone {
    type Message = Msg;
    type Properties = DropZoneProps;

    fn create(ctx: &Context<Self>) -> Self {
        DropZone::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.accept != old_props.accept || props.max_items != old_props.max_items {
            // A policy is fixed for the lifetime of a surface.
            self.surface = common::ingest::DragSurface::new(state::policy_from(props));
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
