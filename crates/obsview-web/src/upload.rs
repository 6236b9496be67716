//! Observation upload: file picker -> ingestion -> scene, then texture loads in the background.

use crate::assets;
use crate::status;
use obsview_core::imaging::Rgba8Image;
use obsview_core::{ingest_document, ObservationId, Scene, TextureState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// A decoded observation image waiting for the next frame to upload it.
pub struct LoadedTexture {
    pub id: ObservationId,
    pub url: String,
    pub image: Rgba8Image,
}

pub type TextureInbox = Rc<RefCell<Vec<LoadedTexture>>>;

#[derive(Clone)]
pub struct UploadContext {
    pub document: web::Document,
    pub scene: Rc<RefCell<Scene>>,
    pub inbox: TextureInbox,
}

pub fn wire_upload(file_input: &web::HtmlInputElement, ctx: UploadContext) {
    let input = file_input.clone();
    crate::dom::add_event_listener(file_input, "change", move |_ev| {
        let file = input.files().and_then(|list| list.get(0));
        // Reset so picking the same file again still fires `change`.
        input.set_value("");
        let Some(file) = file else {
            return;
        };
        let ctx = ctx.clone();
        spawn_local(async move {
            handle_file(file, ctx).await;
        });
    });
}

async fn handle_file(file: web::File, ctx: UploadContext) {
    let name = file.name();
    log::info!("[upload] reading {}", name);
    let bundles = match assets::read_file_text(&file).await {
        Ok(text) => ingest_document(&text).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    let bundles = match bundles {
        Ok(b) => b,
        Err(e) => {
            let message = format!("Could not load observations from {}: {:#}", name, e);
            log::error!("[upload] {}", message);
            status::show_error(&ctx.document, &message);
            return;
        }
    };

    let presented: Vec<(ObservationId, String)> = {
        let mut scene = ctx.scene.borrow_mut();
        bundles
            .into_iter()
            .map(|bundle| {
                let url = bundle.texture.clone();
                (scene.present(bundle), url)
            })
            .collect()
    };
    log::info!(
        "[upload] {}: {} observation(s), {} in scene",
        name,
        presented.len(),
        ctx.scene.borrow().len()
    );
    status::clear(&ctx.document);

    for (id, url) in presented {
        let ctx = ctx.clone();
        spawn_local(async move {
            load_observation_texture(id, url, ctx).await;
        });
    }
}

async fn load_observation_texture(id: ObservationId, url: String, ctx: UploadContext) {
    match assets::load_rgba8(&url).await {
        Ok(image) => {
            log::info!(
                "[upload] texture {} for #{} ({}x{})",
                url,
                id.0,
                image.width,
                image.height
            );
            ctx.inbox.borrow_mut().push(LoadedTexture { id, url, image });
        }
        Err(e) => {
            log::warn!("[upload] texture {} for #{} failed: {:#}", url, id.0, e);
            ctx.scene
                .borrow_mut()
                .set_texture_state(id, TextureState::Failed);
            status::show_error(
                &ctx.document,
                &format!("Observation image {} could not be loaded: {:#}", url, e),
            );
        }
    }
}
