// Animated particle backdrop for DOM containers, drawn on a 2d canvas that
// tracks each container's size.
//
// The host page calls `initialize()` once after the module loads, then
// `attach_all()` when the document has been parsed; every element carrying
// the `particle-background` class gets its own independently disposable
// animator. Containers are configured through data attributes: data-count,
// data-speed, and data-color-1 through data-color-5.

pub mod config;
pub mod particle;
pub mod scene;
mod utils;

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

pub use crate::config::BackgroundConfig;
pub use crate::particle::Particle;
pub use crate::scene::Scene;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

const CONTAINER_SELECTOR: &str = ".particle-background";

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Builds one animator per matching container in the current document and
// hands them back as a JS array, so the page can dispose them individually.
#[wasm_bindgen]
pub fn attach_all() -> Result<js_sys::Array, JsValue> {
    let _timer = Timer::new("particle_background::attach_all");
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let containers = document.query_selector_all(CONTAINER_SELECTOR)?;
    let instances = js_sys::Array::new();
    for i in 0..containers.length() {
        let node = match containers.get(i) {
            Some(node) => node,
            None => continue,
        };
        if let Ok(container) = node.dyn_into::<HtmlElement>() {
            let background = ParticleBackground::new(container)?;
            instances.push(&JsValue::from(background));
        }
    }
    Ok(instances)
}

// Whether the frame callback should re-arm itself after drawing.
enum LoopState {
    Running,
    Stopped,
}

// Everything the frame and resize callbacks need to touch, shared with the
// owning handle through an Rc<RefCell>.
struct Inner {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    fill_styles: Vec<JsValue>,
    scene: Scene,
    state: LoopState,
    frame_handle: Option<i32>,
}

impl Inner {
    // Mirror the container's current box onto the canvas backing store and
    // the scene bounds. Particles left outside drift back via the bounce.
    fn sync_surface_size(&mut self) {
        let width = self.container.offset_width().max(0) as u32;
        let height = self.container.offset_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scene.resize(width as f64, height as f64);
    }

    fn draw(&self) {
        self.context
            .clear_rect(0.0, 0.0, self.scene.width(), self.scene.height());
        for particle in self.scene.particles() {
            #[allow(deprecated)]
            self.context.set_fill_style(&self.fill_styles[particle.color]);
            self.context.begin_path();
            let _ = self
                .context
                .arc(particle.x, particle.y, particle.size, 0.0, 2.0 * PI);
            self.context.fill();
        }
    }
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen]
pub struct ParticleBackground {
    inner: Rc<RefCell<Inner>>,
    on_frame: FrameClosure,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    // Reads the container's data attributes, appends a canvas sized to its
    // box, spawns the particle set, subscribes to window resize, and starts
    // the frame loop.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config = BackgroundConfig::from_element(&container);
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        container.append_child(&canvas)?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let width = container.offset_width().max(0) as u32;
        let height = container.offset_height().max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let scene = Scene::new(&config, width as f64, height as f64);
        let fill_styles = config
            .colors
            .iter()
            .map(|color| JsValue::from_str(color))
            .collect();

        let inner = Rc::new(RefCell::new(Inner {
            container,
            canvas,
            context,
            fill_styles,
            scene,
            state: LoopState::Running,
            frame_handle: None,
        }));

        let on_resize = {
            let inner = Rc::clone(&inner);
            Closure::wrap(Box::new(move || {
                inner.borrow_mut().sync_surface_size();
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        // The frame closure holds a handle to its own cell so it can re-arm
        // itself; `dispose` empties the cell to break the cycle.
        let on_frame: FrameClosure = Rc::new(RefCell::new(None));
        {
            let inner = Rc::clone(&inner);
            let rearm = Rc::clone(&on_frame);
            let window = window.clone();
            *on_frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let mut guard = inner.borrow_mut();
                if let LoopState::Stopped = guard.state {
                    return;
                }
                guard.scene.step();
                guard.draw();
                guard.frame_handle = match rearm.borrow().as_ref() {
                    Some(callback) => window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                    None => None,
                };
            }) as Box<dyn FnMut()>));
        }
        if let Some(callback) = on_frame.borrow().as_ref() {
            inner.borrow_mut().frame_handle = window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok();
        }

        Ok(ParticleBackground {
            inner,
            on_frame,
            on_resize: Some(on_resize),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 {
        self.inner.borrow().scene.particles().len() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        matches!(self.inner.borrow().state, LoopState::Running)
    }

    // Stops the frame loop and returns the page to its pre-construction
    // state: the pending frame is cancelled, the resize listener removed,
    // and the canvas detached. Safe to call more than once; dropping the
    // handle without calling it leaves the animation running until page
    // teardown, like the loop it replaces.
    pub fn dispose(&mut self) {
        {
            let mut inner = self.inner.borrow_mut();
            if let LoopState::Stopped = inner.state {
                return;
            }
            inner.state = LoopState::Stopped;
            let frame_handle = inner.frame_handle.take();
            if let Some(window) = web_sys::window() {
                if let Some(handle) = frame_handle {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
            if let Some(callback) = self.on_resize.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        callback.as_ref().unchecked_ref(),
                    );
                }
            }
            inner.canvas.remove();
        }
        self.on_frame.borrow_mut().take();
    }
}
