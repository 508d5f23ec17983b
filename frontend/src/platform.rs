//! Browser implementations of the ingestion core's seams.
//!
//! - [`BrowserFile`]: a `gloo_file::File` seen through `FileHandle`.
//! - [`DomTransfer`]: snapshot of a `DataTransfer` taken inside the drop event.
//! - [`GlooHttpClient`] and [`GlooTimer`]: `fetch` and `setTimeout` for the orchestrator.

use common::ingest::{
    DragItem, DragItemKind, FileHandle, FileLike, HttpClient, HttpResponse, Timer, TransferSource,
};
use common::IngestError;
use gloo_net::http::Request;
use web_sys::{DataTransfer, DragEvent};

/// File handle delivered to `DropZone` callbacks, whether it was dropped,
/// picked or downloaded.
#[derive(Debug, Clone)]
pub struct BrowserFile(pub gloo_file::File);

impl BrowserFile {
    pub fn from_file_like(file: &FileLike) -> Self {
        BrowserFile(gloo_file::File::new_with_options(
            &file.name,
            file.bytes.as_slice(),
            Some(file.content_type.as_str()),
            None,
        ))
    }

    pub fn size(&self) -> u64 {
        self.0.size()
    }
}

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        BrowserFile(gloo_file::File::from(file))
    }
}

impl FileHandle for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.raw_mime_type()
    }
}

pub fn files_from_list(list: web_sys::FileList) -> Vec<BrowserFile> {
    gloo_file::FileList::from(list)
        .iter()
        .cloned()
        .map(BrowserFile)
        .collect()
}

/// Item list visible during `dragenter`. File contents are not readable yet,
/// only kinds and types.
pub fn drag_items(event: &DragEvent) -> Vec<DragItem> {
    let Some(transfer) = event.data_transfer() else {
        return Vec::new();
    };
    let items = transfer.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .map(|item| {
            let mime = item.type_();
            DragItem {
                kind: if item.kind() == "file" {
                    DragItemKind::File
                } else {
                    DragItemKind::Text
                },
                mime_type: (!mime.is_empty()).then_some(mime),
            }
        })
        .collect()
}

/// Everything a drop carries, read eagerly.
///
/// A `DataTransfer` is only readable while its drop event is being
/// dispatched, so the snapshot is built in the event handler and classified
/// later in `update`. Read failures are kept and surface as
/// `ClassificationFailure` during classification.
#[derive(Debug, Clone, Default)]
pub struct DomTransfer {
    files: Vec<BrowserFile>,
    formats: Vec<(&'static str, Result<String, String>)>,
}

impl DomTransfer {
    pub fn capture(event: &DragEvent) -> Self {
        match event.data_transfer() {
            Some(transfer) => Self::from_data_transfer(&transfer),
            None => Self::default(),
        }
    }

    fn from_data_transfer(transfer: &DataTransfer) -> Self {
        let files = transfer.files().map(files_from_list).unwrap_or_default();
        let formats = common::ingest::surface::URL_FORMATS
            .iter()
            .map(|format| {
                let value = transfer
                    .get_data(format)
                    .map_err(|e| format!("{format}: {:?}", e));
                (*format, value)
            })
            .collect();
        Self { files, formats }
    }
}

impl TransferSource for DomTransfer {
    type File = BrowserFile;

    fn files(&self) -> Result<Vec<BrowserFile>, IngestError> {
        Ok(self.files.clone())
    }

    fn data(&self, format: &str) -> Result<Option<String>, IngestError> {
        match self.formats.iter().find(|(f, _)| *f == format) {
            Some((_, Ok(value))) if !value.is_empty() => Ok(Some(value.clone())),
            Some((_, Ok(_))) | None => Ok(None),
            Some((_, Err(e))) => Err(IngestError::ClassificationFailure(e.clone())),
        }
    }
}

/// GET through the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

impl HttpClient for GlooHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, IngestError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| IngestError::fetch_failed(e.to_string()))?;
        let status = response.status();
        let status_text = response.status_text();
        let content_type = response.headers().get("content-type");
        let body = if response.ok() {
            response
                .binary()
                .await
                .map_err(|e| IngestError::fetch_failed(e.to_string()))?
        } else {
            Vec::new()
        };
        Ok(HttpResponse {
            status,
            status_text,
            content_type,
            body,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
