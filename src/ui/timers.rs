//! Browser timer handles that cancel themselves on drop.
//!
//! None of these may be dropped from inside their own callback; the board only
//! drops them from other callbacks (button clicks, a different timer, hashchange).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::UiError;

/// `setInterval` wrapper.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(ms: u32, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or(UiError::NoWindow)?;
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms as i32,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

type LoopClosure = RefCell<Option<Closure<dyn FnMut()>>>;

struct TimeoutInner {
    handle: Cell<Option<i32>>,
    closure: LoopClosure,
}

impl TimeoutInner {
    fn arm(&self, ms: u32) {
        let Some(w) = window() else { return };
        if let Some(c) = self.closure.borrow().as_ref() {
            let armed = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                c.as_ref().unchecked_ref(),
                ms as i32,
            );
            match armed {
                Ok(id) => self.handle.set(Some(id)),
                Err(e) => log::warn!("setTimeout failed: {:?}", e),
            }
        }
    }
}

/// `setTimeout` chain with a single callback. The body returns the delay until its
/// next run, or `None` to stop.
pub struct TimeoutLoop {
    inner: Rc<TimeoutInner>,
}

impl TimeoutLoop {
    pub fn start(first_ms: u32, mut body: impl FnMut() -> Option<u32> + 'static) -> Self {
        let inner = Rc::new(TimeoutInner {
            handle: Cell::new(None),
            closure: RefCell::new(None),
        });
        let weak: Weak<TimeoutInner> = Rc::downgrade(&inner);
        *inner.closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else { return };
            inner.handle.set(None);
            if let Some(ms) = body() {
                inner.arm(ms);
            }
        }) as Box<dyn FnMut()>));
        inner.arm(first_ms);
        Self { inner }
    }
}

impl Drop for TimeoutLoop {
    fn drop(&mut self) {
        if let (Some(w), Some(id)) = (window(), self.inner.handle.take()) {
            w.clear_timeout_with_handle(id);
        }
    }
}

struct FrameInner {
    handle: Cell<Option<i32>>,
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameInner {
    fn request(&self) {
        let Some(w) = window() else { return };
        if let Some(c) = self.closure.borrow().as_ref() {
            if let Ok(id) = w.request_animation_frame(c.as_ref().unchecked_ref()) {
                self.handle.set(Some(id));
            }
        }
    }
}

/// `requestAnimationFrame` loop, cancelled on drop.
pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

impl FrameLoop {
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(FrameInner {
            handle: Cell::new(None),
            closure: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        *inner.closure.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            let Some(inner) = weak.upgrade() else { return };
            frame(ts);
            inner.request();
        }) as Box<dyn FnMut(f64)>));
        inner.request();
        Self { inner }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(w), Some(id)) = (window(), self.inner.handle.take()) {
            w.cancel_animation_frame(id).ok();
        }
    }
}
