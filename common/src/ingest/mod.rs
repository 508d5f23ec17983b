//! Drag-and-drop ingestion pipeline.
//!
//! - `surface`: translates drag gestures into a classified [`DropPayload`].
//! - `orchestrator`: turns a payload into accepted/rejected files or a download.
//! - `policy`: MIME based acceptance rules shared by both.
//! - `heuristics`: URL sniffing and naming for remote references.

pub mod heuristics;
pub mod orchestrator;
pub mod policy;
pub mod surface;

pub use orchestrator::{
    Dispatch, DownloadPhase, FileLike, HttpClient, HttpResponse, IngestionOrchestrator,
    IngestionResult, Timer, dispatch, handle_files,
};
pub use policy::{AcceptancePolicy, FileHandle};
pub use surface::{DragItem, DragItemKind, DragState, DragSurface, DropPayload, TransferSource};
