use glam::Vec2;
use web_sys as web;

// WheelEvent.deltaMode values
const DOM_DELTA_PIXEL: u32 = 0;
const DOM_DELTA_LINE: u32 = 1;

// Rough pixel sizes of one wheel "line" and "page"
const LINE_HEIGHT_PX: f32 = 33.0;
const PAGE_HEIGHT_PX: f32 = 800.0;

/// Pointer drag in progress on the canvas.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous event of the dragging pointer.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active && pointer_id == self.pointer_id {
            self.active = false;
            return true;
        }
        false
    }
}

/// Wheel delta in pixels, whatever unit the browser reported it in.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        DOM_DELTA_PIXEL => d,
        DOM_DELTA_LINE => d * LINE_HEIGHT_PX,
        _ => d * PAGE_HEIGHT_PX,
    }
}

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
