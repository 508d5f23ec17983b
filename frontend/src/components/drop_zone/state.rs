//! Runtime state of the drop zone.

use common::ingest::{AcceptancePolicy, DownloadPhase, DragSurface};
use common::model::preferences::Preferences;
use yew::context::ContextHandle;
use yew::prelude::*;

use super::messages::Msg;
use super::props::DropZoneProps;

pub struct DropZone {
    /// Drag state machine; owns the acceptance policy.
    pub surface: DragSurface,

    /// Progress of the last remote download.
    pub phase: DownloadPhase,

    /// Hidden `<input type="file">` behind click-to-browse.
    pub file_input_ref: NodeRef,

    /// Last error reported to the parent, cleared on the next successful drop.
    pub last_error: Option<String>,

    /// Theme, read from the application context.
    pub preferences: Preferences,

    /// Keeps the preferences subscription alive.
    pub _preferences_handle: Option<ContextHandle<Preferences>>,
}

impl DropZone {
    pub fn new(ctx: &Context<Self>) -> Self {
        let (preferences, handle) = match ctx
            .link()
            .context::<Preferences>(ctx.link().callback(Msg::PreferencesChanged))
        {
            Some((preferences, handle)) => (preferences, Some(handle)),
            None => (Preferences::default(), None),
        };

        Self {
            surface: DragSurface::new(policy_from(ctx.props())),
            phase: DownloadPhase::Idle,
            file_input_ref: NodeRef::default(),
            last_error: None,
            preferences,
            _preferences_handle: handle,
        }
    }

    pub fn policy(&self) -> &AcceptancePolicy {
        self.surface.policy()
    }
}

pub fn policy_from(props: &DropZoneProps) -> AcceptancePolicy {
    AcceptancePolicy::new(props.accept.iter().cloned(), props.max_items)
}
