use common::ingest::{DownloadPhase, DragItem, FileLike};
use common::model::preferences::Preferences;

use crate::platform::{BrowserFile, DomTransfer};

pub enum Msg {
    DragEnter(Vec<DragItem>),
    DragLeave,
    Drop(DomTransfer),
    OpenFileDialog,
    FilesPicked(Vec<BrowserFile>),
    Phase(DownloadPhase),
    RemoteReady(FileLike),
    RemoteFailed(String),
    PreferencesChanged(Preferences),
}
