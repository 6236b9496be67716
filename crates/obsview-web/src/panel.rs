//! Settings panel: the two render toggles and the observation upload action.

use crate::constants::{
    FILE_INPUT_ID, HEAT_MAP_TOGGLE_ID, ROTATE_TOGGLE_ID, SETTINGS_PANEL_ID, UPLOAD_BUTTON_ID,
};
use crate::dom;
use obsview_core::{RenderParams, OBSERVATION_FILE_ACCEPT};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;top:12px;right:12px;padding:8px 12px;\
     background:rgba(20,20,28,0.85);color:#eee;font:13px sans-serif;border-radius:4px;\
     display:flex;flex-direction:column;gap:6px";

#[derive(Clone, Copy)]
enum Toggle {
    Rotate,
    HeatMap,
}

impl Toggle {
    fn id(self) -> &'static str {
        match self {
            Toggle::Rotate => ROTATE_TOGGLE_ID,
            Toggle::HeatMap => HEAT_MAP_TOGGLE_ID,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Toggle::Rotate => "rotate",
            Toggle::HeatMap => "heatMap",
        }
    }

    fn get(self, params: &RenderParams) -> bool {
        match self {
            Toggle::Rotate => params.rotate,
            Toggle::HeatMap => params.heat_map,
        }
    }

    fn set(self, params: &mut RenderParams, value: bool) {
        match self {
            Toggle::Rotate => params.rotate = value,
            Toggle::HeatMap => params.heat_map = value,
        }
    }
}

fn append_toggle(
    document: &web::Document,
    panel: &web::Element,
    toggle: Toggle,
    params: &Rc<RefCell<RenderParams>>,
) -> anyhow::Result<()> {
    let label: web::HtmlLabelElement = dom::create_element(document, "label")?;
    let input: web::HtmlInputElement = dom::create_element(document, "input")?;
    input.set_type("checkbox");
    input.set_id(toggle.id());
    input.set_checked(toggle.get(&params.borrow()));
    label.append_child(&input).map_err(dom::js_err)?;
    label
        .append_with_str_1(&format!(" {}", toggle.label()))
        .map_err(dom::js_err)?;
    panel.append_child(&label).map_err(dom::js_err)?;

    let params = params.clone();
    let input_for_change = input.clone();
    dom::add_event_listener(&input, "change", move |_ev| {
        let value = input_for_change.checked();
        toggle.set(&mut params.borrow_mut(), value);
        log::info!("[params] {} = {}", toggle.label(), value);
    });
    Ok(())
}

/// Build the panel and return the hidden file input behind the upload button.
pub fn build_settings_panel(
    document: &web::Document,
    params: Rc<RefCell<RenderParams>>,
) -> anyhow::Result<web::HtmlInputElement> {
    let panel = dom::ensure_element(document, SETTINGS_PANEL_ID, "div")?;
    panel.set_inner_html("");
    let _ = panel.set_attribute("style", PANEL_STYLE);

    append_toggle(document, &panel, Toggle::Rotate, &params)?;
    append_toggle(document, &panel, Toggle::HeatMap, &params)?;

    let file_input: web::HtmlInputElement = dom::create_element(document, "input")?;
    file_input.set_type("file");
    file_input.set_accept(OBSERVATION_FILE_ACCEPT);
    file_input.set_id(FILE_INPUT_ID);
    let _ = file_input.set_attribute("style", "display:none");
    panel.append_child(&file_input).map_err(dom::js_err)?;

    let button: web::HtmlButtonElement = dom::create_element(document, "button")?;
    button.set_id(UPLOAD_BUTTON_ID);
    button.set_type("button");
    button.set_text_content(Some("Upload observations"));
    panel.append_child(&button).map_err(dom::js_err)?;

    let picker = file_input.clone();
    dom::add_click_listener(document, UPLOAD_BUTTON_ID, move || picker.click());

    Ok(file_input)
}

