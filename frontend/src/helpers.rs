//! Small DOM utilities shared by the application shell.

use base64::{engine::general_purpose, Engine as _};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// How long a toast stays on screen.
const TOAST_DURATION_MS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast is a styled `div` appended to `<body>` that removes itself after
/// a few seconds. Used for drop errors and download feedback.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name("toast");
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", "rgba(0, 0, 0, 0.8)"),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
        ("font-family", "Arial, sans-serif"),
    ] {
        style.set_property(property, value).ok();
    }

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            html_toast.remove();
        });
    }
}

/// `data:` URL for inline previews of an uploaded image.
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    let content_type = if content_type.is_empty() {
        "image/*"
    } else {
        content_type
    };
    format!(
        "data:{};base64,{}",
        content_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Human readable size, e.g. `1.5 MB`.
pub fn size_label(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
