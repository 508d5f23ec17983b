//! Turns a classified drop into something the caller can use.
//!
//! Local files only need partitioning against the policy. Remote references
//! are re-validated, downloaded once and wrapped as a [`FileLike`]. There is no
//! retry, deduplication or cancellation: overlapping calls run independently
//! and the caller decides what to do with a failure.

use std::future::Future;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::ingest::heuristics::{DEFAULT_CONTENT_TYPE, derive_file_name, looks_like_image_url};
use crate::ingest::policy::{AcceptancePolicy, FileHandle};
use crate::ingest::surface::DropPayload;

/// Delay between reporting `Success` and falling back to `Idle`.
pub const IDLE_RESET_DELAY_MS: u32 = 2000;

/// Raw outcome of an HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET capability used for remote references.
///
/// Network-level failures map to [`IngestError::FetchFailed`]; a non-success
/// status is still returned as a response.
pub trait HttpClient {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, IngestError>>;
}

pub trait Timer {
    fn sleep(&self, millis: u32) -> impl Future<Output = ()>;
}

/// In-memory file: binary content plus a name and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLike {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle for FileLike {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.content_type.clone()
    }
}

/// Observable phases of a remote download, for UI feedback only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadPhase {
    #[default]
    Idle,
    Downloading,
    Success,
}

/// Outcome of handling local files.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionResult<F> {
    pub accepted: Vec<F>,
    pub rejected: Vec<F>,
    pub error: Option<String>,
}

impl<F> IngestionResult<F> {
    pub fn empty() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
            error: None,
        }
    }
}

/// What the caller has to do next with a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<F> {
    /// Report the partition (possibly empty) to `on_files_drop`.
    Files(IngestionResult<F>),
    /// Report the URL to `on_url_drop` and download it.
    Remote(String),
    /// Report the error to `on_error` only.
    Failed(IngestError),
}

/// Partitions `files` against `policy`.
///
/// Pure: the same input always yields the same partition. An empty accepted
/// list is a valid result.
pub fn handle_files<F: FileHandle + Clone>(
    files: &[F],
    policy: &AcceptancePolicy,
) -> IngestionResult<F> {
    let (accepted, rejected) = policy.partition(files);
    IngestionResult {
        accepted,
        rejected,
        error: None,
    }
}

/// Routes a classified payload.
pub fn dispatch<F: FileHandle + Clone>(
    payload: DropPayload<F>,
    policy: &AcceptancePolicy,
) -> Dispatch<F> {
    match payload {
        DropPayload::Files(files) => {
            let mut result = handle_files(&files, policy);
            if result.accepted.is_empty() {
                warn!(
                    "no dropped file satisfies the policy (rejected {})",
                    result.rejected.len()
                );
                result.error = Some(IngestError::PolicyRejection.user_message());
            }
            Dispatch::Files(result)
        }
        DropPayload::RemoteReference(url) => Dispatch::Remote(url),
        DropPayload::Empty {
            discarded: Some(url),
        } => Dispatch::Failed(IngestError::InvalidReference(url)),
        DropPayload::Empty { discarded: None } => Dispatch::Files(IngestionResult::empty()),
    }
}

/// Downloads remote references through an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct IngestionOrchestrator<C, T> {
    client: C,
    timer: T,
}

impl<C: HttpClient, T: Timer> IngestionOrchestrator<C, T> {
    pub fn new(client: C, timer: T) -> Self {
        Self { client, timer }
    }

    /// Validates, downloads and materializes `url`.
    ///
    /// The file is handed to `on_file` as soon as it is complete, then
    /// `on_phase` sees `Success` and, after [`IDLE_RESET_DELAY_MS`], `Idle`.
    /// A failed download reports `Idle` right away and returns the error;
    /// nothing partial reaches `on_file`.
    pub async fn handle_remote_reference(
        &self,
        url: &str,
        mut on_phase: impl FnMut(DownloadPhase),
        on_file: impl FnOnce(FileLike),
    ) -> Result<(), IngestError> {
        let url = url.trim();
        if !looks_like_image_url(url) {
            return Err(IngestError::InvalidReference(url.to_string()));
        }

        on_phase(DownloadPhase::Downloading);
        let file = match self.download(url).await {
            Ok(file) => file,
            Err(err) => {
                warn!("download of {url} failed: {err}");
                on_phase(DownloadPhase::Idle);
                return Err(err);
            }
        };

        info!(
            "downloaded {} ({} bytes, {})",
            file.name,
            file.bytes.len(),
            file.content_type
        );
        on_file(file);
        on_phase(DownloadPhase::Success);
        self.timer.sleep(IDLE_RESET_DELAY_MS).await;
        on_phase(DownloadPhase::Idle);
        Ok(())
    }

    async fn download(&self, url: &str) -> Result<FileLike, IngestError> {
        debug!("fetching remote reference {url}");
        let response = self.client.get(url).await?;
        if !response.is_success() {
            return Err(IngestError::fetch_failed(
                format!("HTTP {} {}", response.status, response.status_text)
                    .trim_end()
                    .to_string(),
            ));
        }

        let content_type = response
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            warn!("{url} answered with {content_type}, keeping it anyway");
        }

        Ok(FileLike {
            name: derive_file_name(url, &content_type),
            content_type,
            bytes: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::policy::tests::{TestFile, file};
    use crate::ingest::surface::DragSurface;
    use crate::ingest::surface::tests::FakeTransfer;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct FakeClient {
        result: Result<HttpResponse, IngestError>,
        calls: Cell<usize>,
    }

    impl FakeClient {
        fn ok(status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
            Self {
                result: Ok(HttpResponse {
                    status,
                    status_text: if status == 200 { "OK" } else { "Not Found" }.to_string(),
                    content_type: content_type.map(str::to_string),
                    body: body.to_vec(),
                }),
                calls: Cell::new(0),
            }
        }

        fn failing(err: IngestError) -> Self {
            Self {
                result: Err(err),
                calls: Cell::new(0),
            }
        }
    }

    impl HttpClient for FakeClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, IngestError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct FakeTimer {
        slept: RefCell<Vec<u32>>,
    }

    impl Timer for FakeTimer {
        async fn sleep(&self, millis: u32) {
            self.slept.borrow_mut().push(millis);
        }
    }

    fn orchestrator(client: FakeClient) -> IngestionOrchestrator<FakeClient, FakeTimer> {
        IngestionOrchestrator::new(client, FakeTimer::default())
    }

    /// Runs a remote drop to completion, returning the file (if any) and the phases seen.
    fn run(
        orchestrator: &IngestionOrchestrator<FakeClient, FakeTimer>,
        url: &str,
    ) -> (Result<FileLike, IngestError>, Vec<DownloadPhase>) {
        let mut phases = Vec::new();
        let mut delivered = None;
        let outcome = block_on(orchestrator.handle_remote_reference(
            url,
            |p| phases.push(p),
            |f| delivered = Some(f),
        ));
        let file = outcome.map(|()| delivered.expect("file delivered on success"));
        (file, phases)
    }

    #[test]
    fn single_item_policy_keeps_first_accepted() {
        let policy = AcceptancePolicy::images(1);
        let files = vec![file("a.txt", "text/plain"), file("b.png", "image/png")];
        let result = handle_files(&files, &policy);
        assert_eq!(result.accepted, vec![file("b.png", "image/png")]);
        assert_eq!(result.rejected, vec![file("a.txt", "text/plain")]);
        assert_eq!(result.error, None);
    }

    #[test]
    fn single_item_policy_truncates_many_images() {
        let policy = AcceptancePolicy::images(1);
        let files = vec![
            file("z.txt", "text/plain"),
            file("first.png", "image/png"),
            file("second.jpg", "image/jpeg"),
            file("y.md", "text/markdown"),
        ];
        let result = handle_files(&files, &policy);
        assert_eq!(result.accepted, vec![file("first.png", "image/png")]);
        assert_eq!(
            result.rejected,
            vec![file("z.txt", "text/plain"), file("y.md", "text/markdown")]
        );
    }

    #[test]
    fn handle_files_is_idempotent() {
        let policy = AcceptancePolicy::new(["image/png", "application/pdf"], 3);
        let files = vec![
            file("a.pdf", "application/pdf"),
            file("b.png", "image/png"),
            file("c.gif", "image/gif"),
        ];
        assert_eq!(handle_files(&files, &policy), handle_files(&files, &policy));
    }

    #[test]
    fn dispatch_flags_policy_rejection_but_keeps_lists() {
        let policy = AcceptancePolicy::images(1);
        let payload = DropPayload::Files(vec![file("a.txt", "text/plain")]);
        let Dispatch::Files(result) = dispatch(payload, &policy) else {
            panic!("expected files dispatch");
        };
        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected, vec![file("a.txt", "text/plain")]);
        assert_eq!(
            result.error.as_deref(),
            Some("No valid image files found")
        );
    }

    #[test]
    fn dispatch_of_plain_text_drop_is_empty_files_without_error() {
        let mut surface = DragSurface::new(AcceptancePolicy::images(1));
        let payload = surface.on_drop(&FakeTransfer::with_data("text/plain", "not a url"));
        assert_eq!(
            dispatch(payload, surface.policy()),
            Dispatch::<TestFile>::Files(IngestionResult::empty())
        );
    }

    #[test]
    fn dispatch_of_non_image_link_is_invalid_reference() {
        let mut surface = DragSurface::new(AcceptancePolicy::images(1));
        let payload = surface.on_drop(&FakeTransfer::with_data(
            "text/plain",
            "https://example.com/page.html",
        ));
        assert_eq!(
            dispatch(payload, surface.policy()),
            Dispatch::Failed(IngestError::InvalidReference(
                "https://example.com/page.html".into()
            ))
        );
    }

    #[test]
    fn dispatch_of_image_link_is_remote() {
        let payload: DropPayload<TestFile> =
            DropPayload::RemoteReference("https://cdn.example.com/cat.png".into());
        assert_eq!(
            dispatch(payload, &AcceptancePolicy::images(1)),
            Dispatch::Remote("https://cdn.example.com/cat.png".into())
        );
    }

    #[test]
    fn remote_png_is_downloaded_and_named() {
        let orchestrator = orchestrator(FakeClient::ok(200, Some("image/png"), b"\x89PNG"));
        let (file, phases) = run(&orchestrator, "https://cdn.example.com/cat.png");
        let file = file.unwrap();

        assert_eq!(file.name, "cat.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, b"\x89PNG".to_vec());
        assert_eq!(
            phases,
            vec![
                DownloadPhase::Downloading,
                DownloadPhase::Success,
                DownloadPhase::Idle
            ]
        );
        assert_eq!(*orchestrator.timer.slept.borrow(), vec![IDLE_RESET_DELAY_MS]);
    }

    #[test]
    fn missing_content_type_defaults_to_binary() {
        let orchestrator = orchestrator(FakeClient::ok(200, None, b"data"));
        let file = run(&orchestrator, "https://cdn.example.com/cat.png").0.unwrap();
        assert_eq!(file.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(file.name, "cat.png");
    }

    #[test]
    fn non_image_url_fails_fast_without_fetching() {
        let orchestrator = orchestrator(FakeClient::ok(200, Some("text/html"), b""));
        let (outcome, phases) = run(&orchestrator, "https://example.com/page.html");
        let err = outcome.unwrap_err();

        assert_eq!(
            err,
            IngestError::InvalidReference("https://example.com/page.html".into())
        );
        assert!(phases.is_empty());
        assert_eq!(orchestrator.client.calls.get(), 0);
    }

    #[test]
    fn non_success_status_is_fetch_failed() {
        let orchestrator = orchestrator(FakeClient::ok(404, Some("text/html"), b"nope"));
        let (outcome, phases) = run(&orchestrator, "https://cdn.example.com/gone.png");
        let err = outcome.unwrap_err();

        assert_eq!(err.user_message(), "HTTP 404 Not Found");
        assert_eq!(phases, vec![DownloadPhase::Downloading, DownloadPhase::Idle]);
        assert!(orchestrator.timer.slept.borrow().is_empty());
    }

    #[test]
    fn network_failure_surfaces_once() {
        let orchestrator =
            orchestrator(FakeClient::failing(IngestError::FetchFailed(None)));
        let err = run(&orchestrator, "https://cdn.example.com/cat.png").0.unwrap_err();

        assert_eq!(err, IngestError::FetchFailed(None));
        assert_eq!(orchestrator.client.calls.get(), 1);
    }

    #[test]
    fn downloaded_file_goes_through_the_same_policy() {
        let orchestrator = orchestrator(FakeClient::ok(200, Some("image/webp"), b"RIFF"));
        let file = run(&orchestrator, "https://img.example.com/a1b2").0.unwrap();
        assert_eq!(file.name, "a1b2.webp");
        assert!(AcceptancePolicy::images(1).accepts_file(&file));
    }
}
