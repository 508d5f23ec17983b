//! Load-at-startup / save-on-change persistence for [`Preferences`].
//!
//! Preferences live in `localStorage` as JSON. Storage being unavailable
//! (private mode, disabled cookies) is not an error for the user: loading
//! falls back to defaults and saving only logs.

use common::model::preferences::{Preferences, PREFERENCES_STORAGE_KEY};
use log::warn;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_preferences() -> Preferences {
    let Some(storage) = local_storage() else {
        return Preferences::default();
    };
    match storage.get_item(PREFERENCES_STORAGE_KEY) {
        Ok(Some(raw)) => Preferences::from_json(&raw),
        Ok(None) => Preferences::default(),
        Err(e) => {
            warn!("could not read preferences: {:?}", e);
            Preferences::default()
        }
    }
}

pub fn save_preferences(preferences: &Preferences) {
    let Some(storage) = local_storage() else {
        warn!("localStorage unavailable, preferences not saved");
        return;
    };
    let raw = match preferences.to_json() {
        Ok(raw) => raw,
        Err(e) => {
            warn!("could not serialize preferences: {e}");
            return;
        }
    };
    if let Err(e) = storage.set_item(PREFERENCES_STORAGE_KEY, &raw) {
        warn!("could not save preferences: {:?}", e);
    }
}
