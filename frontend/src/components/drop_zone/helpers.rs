//! Pure helpers for the drop zone view: status line and CSS classes.

use common::ingest::DownloadPhase;

/// Visual state of the zone, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    Rejected,
    Active,
    Downloading,
    Downloaded,
    Idle,
}

pub fn zone_status(is_active: bool, is_rejected: bool, phase: DownloadPhase) -> ZoneStatus {
    match (is_active, is_rejected, phase) {
        (true, true, _) => ZoneStatus::Rejected,
        (true, false, _) => ZoneStatus::Active,
        (false, _, DownloadPhase::Downloading) => ZoneStatus::Downloading,
        (false, _, DownloadPhase::Success) => ZoneStatus::Downloaded,
        (false, _, DownloadPhase::Idle) => ZoneStatus::Idle,
    }
}

impl ZoneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneStatus::Rejected => "Tipo de archivo no permitido",
            ZoneStatus::Active => "Suelta aquí para añadir la imagen",
            ZoneStatus::Downloading => "Descargando imagen...",
            ZoneStatus::Downloaded => "Imagen descargada",
            ZoneStatus::Idle => "Arrastra una imagen o un enlace, o haz clic para elegir un archivo",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ZoneStatus::Rejected => "block",
            ZoneStatus::Active => "file_download",
            ZoneStatus::Downloading => "cloud_download",
            ZoneStatus::Downloaded => "check_circle",
            ZoneStatus::Idle => "add_photo_alternate",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ZoneStatus::Rejected => "rejected",
            ZoneStatus::Active => "active",
            ZoneStatus::Downloading => "downloading",
            ZoneStatus::Downloaded => "success",
            ZoneStatus::Idle => "idle",
        }
    }
}
