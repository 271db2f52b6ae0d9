// Small DOM helpers shared by the page views.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

/// Create an element with an id and inline style.
pub fn styled(doc: &Document, tag: &str, id: &str, style: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !id.is_empty() {
        el.set_id(id);
    }
    el.set_attribute("style", style)?;
    Ok(el)
}

/// [`styled`], cast to a concrete element type.
pub fn styled_as<T: JsCast>(
    doc: &Document,
    tag: &str,
    id: &str,
    style: &str,
) -> Result<T, JsValue> {
    let el = styled(doc, tag, id, style)?;
    Ok(el.dyn_into::<T>()?)
}

/// Event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            .ok();
    }
}
