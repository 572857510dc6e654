use crate::codec::encode_image;
use crate::session::Session;
use dioxus::prelude::*;
use std::path::Path;

#[component]
pub fn ImageUploader(session: Signal<Session>) -> Element {
    let loading = session.read().is_loading();

    rsx! {
        div { class: "uploader",
            label { class: "dropzone",
                span { class: "dropzone-title", "Upload a photo of your room" }
                span { class: "text-muted", "Click to select an image file" }
                input {
                    r#type: "file",
                    class: "dropzone-input",
                    accept: "image/*",
                    multiple: false,
                    disabled: loading,
                    onchange: move |evt: FormEvent| async move {
                        let mut session = session;
                        let Some(engine) = evt.files() else {
                            return;
                        };
                        let Some(path) = engine.files().into_iter().next() else {
                            return;
                        };
                        let Some(bytes) = engine.read_file(&path).await else {
                            tracing::warn!(%path, "failed to read selected file");
                            return;
                        };
                        let name = Path::new(&path)
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or(path);
                        let Some(image) = encode_image(&name, &bytes) else {
                            return;
                        };
                        if let Err(err) = session.with_mut(|s| s.upload(image)) {
                            tracing::debug!(%err, "upload ignored");
                        }
                    },
                }
            }
        }
    }
}
