//! Fetching and decoding of static assets and uploaded files.

use obsview_core::imaging::{self, CubeFaces, HdrImage, Rgba8Image};
use obsview_core::mesh::{self, MeshData};
use obsview_core::{ENVIRONMENT_MAP_URL, MODEL_URL, SKYBOX_FACE_URLS};
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::js_err;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into::<web::Response>()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("HTTP {} {}", response.status(), response.status_text());
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub async fn read_file_text(file: &web::File) -> anyhow::Result<String> {
    let text = JsFuture::from(file.text()).await.map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("{} did not read as text", file.name()))
}

pub async fn load_rgba8(url: &str) -> anyhow::Result<Rgba8Image> {
    let bytes = fetch_bytes(url).await?;
    Ok(imaging::decode_rgba8(&bytes)?)
}

pub async fn load_model(url: &str) -> anyhow::Result<MeshData> {
    let bytes = fetch_bytes(url).await?;
    let mesh = mesh::parse_stl(&bytes)?.centered();
    log::info!("[assets] {}: {} triangles", url, mesh.triangle_count());
    Ok(mesh)
}

pub async fn load_environment(url: &str) -> anyhow::Result<HdrImage> {
    let bytes = fetch_bytes(url).await?;
    let hdr = imaging::decode_hdr(&bytes)?;
    log::info!("[assets] {}: {}x{} HDR", url, hdr.width, hdr.height);
    Ok(hdr)
}

/// Fetch the six faces, decoding each distinct URL once.
pub async fn load_skybox(urls: &[&str; 6]) -> anyhow::Result<CubeFaces> {
    let mut decoded: HashMap<&str, Rgba8Image> = HashMap::new();
    let mut faces = Vec::with_capacity(6);
    for url in urls.iter().copied() {
        if !decoded.contains_key(url) {
            let bytes = fetch_bytes(url)
                .await
                .map_err(|e| e.context(url.to_string()))?;
            let face = imaging::decode_cube_face(&bytes)
                .map_err(|e| anyhow::Error::from(e).context(url.to_string()))?;
            decoded.insert(url, face);
        }
        if let Some(face) = decoded.get(url) {
            faces.push(face.clone());
        }
    }
    Ok(CubeFaces::new(faces)?)
}

/// Everything the first frame needs. Failed loads fall back to placeholders.
pub struct StartupAssets {
    pub model: Option<MeshData>,
    pub environment: HdrImage,
    pub skybox: CubeFaces,
}

pub async fn load_startup_assets() -> StartupAssets {
    let model = match load_model(MODEL_URL).await {
        Ok(m) => Some(m),
        Err(e) => {
            log::error!("[assets] model {} failed: {:#}", MODEL_URL, e);
            None
        }
    };
    let environment = load_environment(ENVIRONMENT_MAP_URL)
        .await
        .unwrap_or_else(|e| {
            log::error!("[assets] environment {} failed: {:#}", ENVIRONMENT_MAP_URL, e);
            HdrImage::placeholder()
        });
    let skybox = load_skybox(&SKYBOX_FACE_URLS).await.unwrap_or_else(|e| {
        log::error!("[assets] skybox failed: {:#}", e);
        CubeFaces::placeholder()
    });
    StartupAssets {
        model,
        environment,
        skybox,
    }
}
