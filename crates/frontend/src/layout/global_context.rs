use leptos::prelude::*;

const SIDEBAR_STORAGE_KEY: &str = "app_sidebar_open";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Layout state shared by the shell, provided once in `App`
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let left_open = storage()
            .and_then(|s| s.get_item(SIDEBAR_STORAGE_KEY).ok().flatten())
            .map(|v| v != "false")
            .unwrap_or(true);
        Self {
            left_open: RwSignal::new(left_open),
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
        let value = self.left_open.get_untracked().to_string();
        if let Some(s) = storage() {
            if let Err(e) = s.set_item(SIDEBAR_STORAGE_KEY, &value) {
                log::debug!("sidebar state not stored: {:?}", e);
            }
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The layout context, or a fresh one when rendered outside `App`
pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().unwrap_or_default()
}
