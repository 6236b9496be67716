use crate::constants::STATUS_BANNER_ID;
use crate::dom;
use web_sys as web;

const HIDDEN_STYLE: &str = "display:none";
const ERROR_STYLE: &str = "position:fixed;left:12px;bottom:12px;max-width:60ch;padding:8px 12px;\
     background:rgba(120,20,20,0.9);color:#fff;font:13px sans-serif;border-radius:4px";

/// Make sure the banner exists and starts hidden.
pub fn ensure(document: &web::Document) -> anyhow::Result<()> {
    let el = dom::ensure_element(document, STATUS_BANNER_ID, "div")?;
    if el.text_content().unwrap_or_default().is_empty() {
        let _ = el.set_attribute("style", HIDDEN_STYLE);
    }
    Ok(())
}

#[inline]
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_BANNER_ID) {
        el.set_text_content(Some(message));
        let _ = el.set_attribute("style", ERROR_STYLE);
    }
}

#[inline]
pub fn clear(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_BANNER_ID) {
        el.set_text_content(None);
        let _ = el.set_attribute("style", HIDDEN_STYLE);
    }
}

/// Report a failure on the page when possible, always in the log.
pub fn report(message: &str) {
    log::error!("{}", message);
    if let Some(doc) = dom::window_document() {
        show_error(&doc, message);
    }
}
