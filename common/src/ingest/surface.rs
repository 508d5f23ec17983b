//! Drag surface state machine and drop classification.
//!
//! Browsers fire `dragenter`/`dragleave` for every descendant the pointer
//! crosses, so a boolean flipped on enter and cleared on leave flickers and can
//! get stuck. The surface keeps a reentrancy counter instead: the target is
//! active exactly while the counter is above zero.
//!
//! ```text
//! Idle --enter(0->1)--> Active | Rejected --leave(->0) / drop--> Idle
//! ```

use log::{debug, warn};

use crate::error::IngestError;
use crate::ingest::heuristics::{has_web_scheme, looks_like_image_url};
use crate::ingest::policy::AcceptancePolicy;

/// Transfer formats scanned for a remote reference, in priority order.
pub const URL_FORMATS: [&str; 3] = ["text/uri-list", "text/plain", "URL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragItemKind {
    File,
    Text,
}

/// One entry of the dragged item list, as visible during `dragenter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItem {
    pub kind: DragItemKind,
    pub mime_type: Option<String>,
}

impl DragItem {
    pub fn file(mime_type: impl Into<String>) -> Self {
        Self {
            kind: DragItemKind::File,
            mime_type: Some(mime_type.into()),
        }
    }

    pub fn text(mime_type: impl Into<String>) -> Self {
        Self {
            kind: DragItemKind::Text,
            mime_type: Some(mime_type.into()),
        }
    }

    /// Items without a discoverable type count as non-file and are let
    /// through, so URL drags are not flagged before the drop.
    fn is_acceptable(&self, policy: &AcceptancePolicy) -> bool {
        match (&self.kind, self.mime_type.as_deref()) {
            (DragItemKind::File, Some(mime)) if !mime.trim().is_empty() => policy.accepts(mime),
            _ => true,
        }
    }
}

/// Read access to the data carried by a drop.
pub trait TransferSource {
    type File;

    fn files(&self) -> Result<Vec<Self::File>, IngestError>;

    /// Data stored under `format`, `None` when absent.
    fn data(&self, format: &str) -> Result<Option<String>, IngestError>;
}

/// Classified result of a single drop gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload<F> {
    Files(Vec<F>),
    RemoteReference(String),
    /// Nothing usable. `discarded` holds a web URL that was dropped but did
    /// not look like an image, so the caller can explain why nothing happened.
    Empty { discarded: Option<String> },
}

impl<F> DropPayload<F> {
    pub fn kind(&self) -> &'static str {
        match self {
            DropPayload::Files(_) => "files",
            DropPayload::RemoteReference(_) => "remote",
            DropPayload::Empty { .. } => "empty",
        }
    }

    pub fn empty() -> Self {
        DropPayload::Empty { discarded: None }
    }
}

/// Flags the view renders, plus the reentrancy counter behind them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    pub is_active: bool,
    pub is_rejected: bool,
    depth: u32,
}

impl DragState {
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// Value to store in `dataTransfer.dropEffect` during `dragover`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Copy,
}

impl DropEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropEffect::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragSurface {
    policy: AcceptancePolicy,
    state: DragState,
}

impl DragSurface {
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            policy,
            state: DragState::default(),
        }
    }

    pub fn policy(&self) -> &AcceptancePolicy {
        &self.policy
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn is_rejected(&self) -> bool {
        self.state.is_rejected
    }

    /// Back to `Idle` with the counter at zero.
    pub fn reset(&mut self) {
        self.state = DragState::default();
    }

    /// Handles `dragenter`. Returns whether the visible flags changed.
    pub fn on_enter(&mut self, items: &[DragItem]) -> bool {
        let before = self.state;
        self.state.depth = self.state.depth.saturating_add(1);
        if self.state.depth == 1 {
            let rejected = !items.is_empty() && !items.iter().any(|i| i.is_acceptable(&self.policy));
            self.state.is_active = true;
            self.state.is_rejected = rejected;
            debug!("drag entered: items={} rejected={}", items.len(), rejected);
        }
        flags_changed(before, self.state)
    }

    /// Handles `dragleave`. Returns whether the visible flags changed.
    pub fn on_leave(&mut self) -> bool {
        let before = self.state;
        self.state.depth = self.state.depth.saturating_sub(1);
        if self.state.depth == 0 {
            if before.is_active {
                debug!("drag left the surface");
            }
            self.reset();
        }
        flags_changed(before, self.state)
    }

    /// Handles `dragover`. No state change; the caller must still prevent the
    /// default action for the drop to be allowed.
    pub fn on_over(&self) -> DropEffect {
        DropEffect::Copy
    }

    /// Handles `drop`: resets to `Idle` unconditionally and classifies the payload.
    ///
    /// Unreadable transfer data degrades to [`DropPayload::Empty`].
    pub fn on_drop<S: TransferSource>(&mut self, transfer: &S) -> DropPayload<S::File> {
        self.reset();
        match classify(transfer) {
            Ok(payload) => {
                debug!("drop classified as {}", payload.kind());
                payload
            }
            Err(err) => {
                warn!("drop classification failed, treating as empty: {err}");
                DropPayload::empty()
            }
        }
    }
}

fn flags_changed(before: DragState, after: DragState) -> bool {
    before.is_active != after.is_active || before.is_rejected != after.is_rejected
}

/// Classifies the data of a drop.
///
/// Precedence: native files, then the first non-empty URL-ish string from
/// [`URL_FORMATS`] if it looks like an image, otherwise empty. A web URL that
/// fails the image check is kept as the `discarded` reference.
pub fn classify<S: TransferSource>(transfer: &S) -> Result<DropPayload<S::File>, IngestError> {
    let files = transfer.files()?;
    if !files.is_empty() {
        return Ok(DropPayload::Files(files));
    }

    let Some(candidate) = first_reference(transfer)? else {
        return Ok(DropPayload::empty());
    };
    if looks_like_image_url(&candidate) {
        Ok(DropPayload::RemoteReference(candidate))
    } else if has_web_scheme(&candidate) {
        debug!("dropped link is not an image reference");
        Ok(DropPayload::Empty {
            discarded: Some(candidate),
        })
    } else {
        Ok(DropPayload::empty())
    }
}

fn first_reference<S: TransferSource>(transfer: &S) -> Result<Option<String>, IngestError> {
    for format in URL_FORMATS {
        let Some(raw) = transfer.data(format)? else {
            continue;
        };
        let value = if format == "text/uri-list" {
            first_uri(&raw)
        } else {
            Some(raw.trim().to_string())
        };
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// First URI of a `text/uri-list` body (RFC 2483), skipping comment lines.
fn first_uri(list: &str) -> Option<String> {
    list.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ingest::policy::tests::{TestFile, file};
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct FakeTransfer {
        pub files: Vec<TestFile>,
        pub data: HashMap<&'static str, String>,
        pub broken: bool,
    }

    impl FakeTransfer {
        pub fn with_data(format: &'static str, value: &str) -> Self {
            let mut transfer = Self::default();
            transfer.data.insert(format, value.to_string());
            transfer
        }
    }

    impl TransferSource for FakeTransfer {
        type File = TestFile;

        fn files(&self) -> Result<Vec<TestFile>, IngestError> {
            if self.broken {
                return Err(IngestError::ClassificationFailure("boom".into()));
            }
            Ok(self.files.clone())
        }

        fn data(&self, format: &str) -> Result<Option<String>, IngestError> {
            Ok(self.data.get(format).cloned())
        }
    }

    fn images_surface() -> DragSurface {
        DragSurface::new(AcceptancePolicy::images(1))
    }

    #[test]
    fn nested_enter_leave_never_sticks_active() {
        let mut surface = images_surface();
        let items = [DragItem::file("image/png")];

        assert!(surface.on_enter(&items));
        assert!(!surface.on_enter(&items)); // child element
        assert!(!surface.on_enter(&items)); // grandchild
        assert_eq!(surface.state().depth(), 3);

        assert!(!surface.on_leave());
        assert!(!surface.on_leave());
        assert!(surface.is_active());
        assert!(surface.on_leave());
        assert!(!surface.is_active());
        assert_eq!(surface.state(), DragState::default());
    }

    #[test]
    fn counter_is_clamped_at_zero() {
        let mut surface = images_surface();
        assert!(!surface.on_leave());
        assert!(!surface.on_leave());
        assert_eq!(surface.state().depth(), 0);

        surface.on_enter(&[]);
        assert!(surface.is_active());
        assert_eq!(surface.state().depth(), 1);
    }

    #[test]
    fn active_iff_counter_positive_over_event_sequence() {
        let mut surface = images_surface();
        // true = enter, false = leave
        let sequence = [
            true, false, false, true, true, false, true, false, false, false, true, true, true,
            false, false, true, false, false,
        ];
        for enter in sequence {
            if enter {
                surface.on_enter(&[DragItem::text("text/plain")]);
            } else {
                surface.on_leave();
            }
            let state = surface.state();
            assert_eq!(state.is_active, state.depth() > 0, "state: {state:?}");
        }
    }

    #[test]
    fn enter_with_only_unacceptable_files_is_rejected() {
        let mut surface = images_surface();
        surface.on_enter(&[DragItem::file("text/plain"), DragItem::file("application/zip")]);
        assert!(surface.is_active());
        assert!(surface.is_rejected());
    }

    #[test]
    fn enter_with_one_acceptable_file_is_not_rejected() {
        let mut surface = images_surface();
        surface.on_enter(&[DragItem::file("text/plain"), DragItem::file("image/jpeg")]);
        assert!(surface.is_active());
        assert!(!surface.is_rejected());
    }

    #[test]
    fn untyped_and_text_items_are_not_rejected() {
        let mut surface = images_surface();
        surface.on_enter(&[
            DragItem {
                kind: DragItemKind::File,
                mime_type: None,
            },
            DragItem::file(""),
        ]);
        assert!(!surface.is_rejected());

        let mut surface = images_surface();
        surface.on_enter(&[DragItem::text("text/uri-list")]);
        assert!(!surface.is_rejected());
    }

    #[test]
    fn rejection_is_evaluated_on_first_enter_only() {
        let mut surface = images_surface();
        surface.on_enter(&[DragItem::file("text/plain")]);
        surface.on_enter(&[DragItem::file("image/png")]);
        assert!(surface.is_rejected());
    }

    #[test]
    fn drop_resets_state_and_prefers_files() {
        let mut surface = images_surface();
        surface.on_enter(&[DragItem::file("image/png")]);
        surface.on_enter(&[DragItem::file("image/png")]);

        let mut transfer = FakeTransfer::with_data("text/plain", "https://x.com/cat.png");
        transfer.files = vec![file("a.txt", "text/plain"), file("b.png", "image/png")];

        let payload = surface.on_drop(&transfer);
        assert_eq!(payload, DropPayload::Files(transfer.files.clone()));
        assert_eq!(surface.state(), DragState::default());
    }

    #[test]
    fn uri_list_wins_over_plain_text() {
        let mut transfer = FakeTransfer::with_data(
            "text/uri-list",
            "# dragged from a tab\r\nhttps://cdn.example.com/cat.png\r\n",
        );
        transfer
            .data
            .insert("text/plain", "https://cdn.example.com/dog.png".to_string());
        assert_eq!(
            classify(&transfer).unwrap(),
            DropPayload::RemoteReference("https://cdn.example.com/cat.png".into())
        );
    }

    #[test]
    fn blank_formats_fall_through_to_url_field() {
        let mut transfer = FakeTransfer::with_data("text/uri-list", "# only a comment");
        transfer.data.insert("text/plain", "   ".to_string());
        transfer
            .data
            .insert("URL", "https://example.com/photos/42".to_string());
        assert_eq!(
            classify(&transfer).unwrap(),
            DropPayload::RemoteReference("https://example.com/photos/42".into())
        );
    }

    #[test]
    fn plain_text_that_is_not_a_url_is_empty() {
        let transfer = FakeTransfer::with_data("text/plain", "not a url");
        assert_eq!(classify(&transfer).unwrap(), DropPayload::empty());
    }

    #[test]
    fn non_image_url_is_never_classified_as_files() {
        let transfer = FakeTransfer::with_data("text/plain", "https://example.com/page.html");
        assert_eq!(
            classify(&transfer).unwrap(),
            DropPayload::Empty {
                discarded: Some("https://example.com/page.html".into())
            }
        );
    }

    #[test]
    fn nothing_dropped_is_empty() {
        assert_eq!(
            classify(&FakeTransfer::default()).unwrap(),
            DropPayload::empty()
        );
    }

    #[test]
    fn unreadable_transfer_degrades_to_empty() {
        let mut surface = images_surface();
        surface.on_enter(&[]);
        let transfer = FakeTransfer {
            broken: true,
            ..FakeTransfer::default()
        };
        assert_eq!(surface.on_drop(&transfer), DropPayload::empty());
        assert!(!surface.is_active());
    }

    #[test]
    fn over_requests_copy_effect() {
        assert_eq!(images_surface().on_over().as_str(), "copy");
    }
}
