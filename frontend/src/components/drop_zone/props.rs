//! Properties of the [`DropZone`](super::DropZone) component.
//!
//! The acceptance policy is built from `accept` and `max_items`; the four
//! callbacks are fire-and-forget notifications towards the parent.

use yew::prelude::*;

use crate::platform::BrowserFile;

fn default_accept() -> Vec<String> {
    vec!["image/*".to_string()]
}

#[derive(Properties, PartialEq, Clone)]
pub struct DropZoneProps {
    /// Accepted MIME patterns (`image/*`, `image/png`, `*`).
    #[prop_or_else(default_accept)]
    pub accept: Vec<String>,

    /// Maximum number of accepted files handed to `on_file_select`. `0` means no cap.
    #[prop_or(1)]
    pub max_items: usize,

    /// Every drop of local files (or of nothing usable) ends here as
    /// `(accepted, rejected)`, both possibly empty.
    #[prop_or_default]
    pub on_files_drop: Callback<(Vec<BrowserFile>, Vec<BrowserFile>)>,

    /// A dropped link that looks like an image, before it is downloaded.
    #[prop_or_default]
    pub on_url_drop: Callback<String>,

    /// User-facing message for any rejected drop or failed download.
    #[prop_or_default]
    pub on_error: Callback<String>,

    /// Files ready for upload: accepted local files or the downloaded image.
    #[prop_or_default]
    pub on_file_select: Callback<Vec<BrowserFile>>,

    /// Optional content rendered inside the zone, below the status line.
    #[prop_or_default]
    pub children: Html,
}
