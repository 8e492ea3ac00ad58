//! Multi-file uploader posting each file as the raw body of one request.
//!
//! Files are sent in parallel. Files that fail validation are listed as
//! failed without a request.

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;
use wasm_bindgen::JsCast;

use crate::shared::api_utils::upload_file;
use crate::shared::icons::icon;
use crate::shared::model_utils::format_bytes;
use crate::shared::upload::{UploadStatus, UploadTracker, ACCEPTED_EXTENSIONS};

fn selected_files(ev: &leptos::ev::Event) -> Vec<web_sys::File> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
    // allow picking the same file again
    input.set_value("");
    files
}

#[component]
pub fn FileUploader(
    /// API path the files are posted to, e.g. `/sbom`
    endpoint: &'static str,

    /// Maximum accepted file size in bytes
    upload_limit: u64,

    /// Called with the file name after each successful upload
    #[prop(optional)]
    on_uploaded: Option<Callback<String>>,
) -> impl IntoView {
    let tracker = RwSignal::new(UploadTracker::default());

    let send = move |id: Uuid, file: web_sys::File, mime: &'static str| {
        let name = file.name();
        spawn_local(async move {
            match upload_file::<serde_json::Value>(endpoint, file, mime).await {
                Ok(_) => {
                    log::debug!("uploaded {}", name);
                    tracker.update(|t| t.mark_success(id));
                    if let Some(cb) = on_uploaded {
                        cb.run(name);
                    }
                }
                Err(e) => {
                    log::warn!("upload of {} failed: {}", name, e);
                    tracker.update(|t| t.mark_failed(id, e.to_string()));
                }
            }
        });
    };

    let on_files = move |ev: leptos::ev::Event| {
        for file in selected_files(&ev) {
            let size = file.size() as u64;
            let (id, content_type) = tracker
                .try_update(|t| t.add_file(&file.name(), size, upload_limit))
                .unwrap_or((Uuid::nil(), None));
            if let Some(content_type) = content_type {
                send(id, file, content_type.mime());
            }
        }
    };

    view! {
        <div class="file-uploader">
            <label class="file-uploader__dropzone">
                {icon("upload")}
                <span>"Select files to upload"</span>
                <span class="file-uploader__hint">
                    {format!("Accepted file types: .json, .json.bz2. Limit: {}", format_bytes(upload_limit))}
                </span>
                <input
                    type="file"
                    multiple=true
                    accept=ACCEPTED_EXTENSIONS
                    class="file-uploader__input"
                    on:change=on_files
                />
            </label>

            <Show when=move || tracker.with(|t| !t.entries().is_empty())>
                <div class="file-uploader__summary">
                    <span>{move || tracker.with(|t| t.summary_text())}</span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || tracker.with(|t| t.is_uploading()))
                        on_click=move |_| tracker.update(|t| t.clear())
                    >
                        "Clear"
                    </Button>
                </div>
                <ul class="file-uploader__list">
                    <For
                        each=move || tracker.with(|t| t.entries().to_vec())
                        key=|entry| (entry.id, entry.status.clone())
                        children=move |entry| {
                            let id = entry.id;
                            let (class, text) = match &entry.status {
                                UploadStatus::InProgress { percent } => {
                                    ("file-uploader__item--progress", format!("Uploading {}%", percent))
                                }
                                UploadStatus::Success => ("file-uploader__item--success", "Uploaded".to_string()),
                                UploadStatus::Danger { message } => ("file-uploader__item--danger", message.clone()),
                            };
                            let finished = entry.status.is_finished();
                            view! {
                                <li class=format!("file-uploader__item {}", class)>
                                    <span class="file-uploader__name">{entry.file_name.clone()}</span>
                                    <span class="file-uploader__size">{format_bytes(entry.size)}</span>
                                    <span class="file-uploader__status">{text}</span>
                                    <Show when=move || finished>
                                        <button
                                            class="file-uploader__remove"
                                            aria-label="Remove"
                                            on:click=move |_| tracker.update(|t| t.remove(id))
                                        >
                                            {icon("trash")}
                                        </button>
                                    </Show>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
