//! WASM bridge: page containers create particle fields by handle and drive
//! them from `requestAnimationFrame`.
//!
//! ```js
//! const h = field_create(rect.width, rect.height, el.dataset.particles, el.dataset.particleOptions ?? "");
//! const loop = (t) => { if (field_frame(h, t)) { draw(field_vertices_ptr(h), field_vertex_count(h)); requestAnimationFrame(loop); } };
//! requestAnimationFrame(loop);
//! ```

pub mod host;
pub mod runner;

use std::cell::RefCell;
use std::sync::Once;

use wasm_bindgen::prelude::*;

use particle_field::{InputEvent, CLICK_BURST_COUNT};

pub use host::{CanvasHost, CanvasSurface};
pub use runner::{FieldHandle, FieldRegistry, FieldRunner};

thread_local! {
    static REGISTRY: RefCell<FieldRegistry> = RefCell::new(FieldRegistry::new());
}

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// Run `f` on the field behind `handle`; unknown handles are a no-op.
fn with_field<R>(handle: u32, f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    REGISTRY.with(|cell| cell.borrow_mut().get_mut(FieldHandle(handle)).map(f))
}

fn fresh_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 20)
}

/// Create a field for a container. Returns its handle, or 0 when the
/// container could not be measured.
#[wasm_bindgen]
pub fn field_create(width: f32, height: f32, preset: &str, options_json: &str) -> u32 {
    init_logging();
    match FieldRunner::new(width, height, preset, options_json, fresh_seed()) {
        Some(runner) => REGISTRY.with(|cell| cell.borrow_mut().insert(runner).0),
        None => 0,
    }
}

/// Tick and render one frame. False means "stop requesting frames".
#[wasm_bindgen]
pub fn field_frame(handle: u32, now_ms: f64) -> bool {
    with_field(handle, |r| r.frame(now_ms)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn field_pointer_move(handle: u32, x: f32, y: f32) {
    with_field(handle, |r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn field_pointer_leave(handle: u32) {
    with_field(handle, |r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn field_click(handle: u32, x: f32, y: f32) {
    with_field(handle, |r| r.push_input(InputEvent::Click { x, y }));
}

#[wasm_bindgen]
pub fn field_burst(handle: u32, x: f32, y: f32, count: u32) -> bool {
    let count = if count == 0 { CLICK_BURST_COUNT } else { count as usize };
    with_field(handle, |r| r.burst(x, y, count).is_some()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn field_fireworks(handle: u32, x: f32, y: f32) {
    with_field(handle, |r| r.fireworks(x, y));
}

#[wasm_bindgen]
pub fn field_resize(handle: u32, width: f32, height: f32) {
    with_field(handle, |r| r.resize(width, height));
}

/// Merge JSON options onto the field's current configuration.
#[wasm_bindgen]
pub fn field_set_options(handle: u32, options_json: &str) -> bool {
    with_field(handle, |r| r.set_options(options_json)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn field_pause(handle: u32) {
    with_field(handle, |r| r.pause());
}

/// Resume a paused field. JS restarts its frame loop when this returns true.
#[wasm_bindgen]
pub fn field_resume(handle: u32) -> bool {
    with_field(handle, |r| {
        r.resume();
        r.is_running()
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn field_is_running(handle: u32) -> bool {
    with_field(handle, |r| r.is_running()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn field_destroy(handle: u32) -> bool {
    REGISTRY.with(|cell| cell.borrow_mut().destroy(FieldHandle(handle)))
}

#[wasm_bindgen]
pub fn field_destroy_all() -> u32 {
    REGISTRY.with(|cell| cell.borrow_mut().destroy_all() as u32)
}

// ---- Data accessors ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn field_vertices_ptr(handle: u32) -> *const f32 {
    with_field(handle, |r| r.vertices_ptr()).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn field_vertex_count(handle: u32) -> u32 {
    with_field(handle, |r| r.vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn field_particle_count(handle: u32) -> u32 {
    with_field(handle, |r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn field_width(handle: u32) -> f32 {
    with_field(handle, |r| r.width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn field_height(handle: u32) -> f32 {
    with_field(handle, |r| r.height()).unwrap_or(0.0)
}
