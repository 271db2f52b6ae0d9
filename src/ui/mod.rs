//! Page shell: hash routing and the currently mounted view.

mod board;
mod dom;
mod timers;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window, window};

use crate::config::GameConfig;
use crate::error::UiError;
use crate::game::Session;
use crate::route::Route;
use board::GameBoard;

const HOME_STYLE: &str = "font-family:'Fira Code', monospace; text-align:center; margin-top:48px;";

enum Mounted {
    Game(Rc<RefCell<GameBoard>>),
    Page(Element),
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Mounted::Page(el) = self {
            el.remove();
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    static ROUTER_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Mount whatever the current hash selects and follow later hash changes.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or(UiError::NoWindow)?;
    mount_route(&win, &config)?;

    if !ROUTER_INSTALLED.with(|c| c.replace(true)) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            if let Err(e) = mount_route(&win, &config) {
                log::error!("route change failed: {:?}", e);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn mount_route(win: &Window, config: &GameConfig) -> Result<(), JsValue> {
    let doc = win.document().ok_or(UiError::NoDocument)?;
    let hash = win.location().hash().unwrap_or_default();
    let route = Route::from_hash(&hash);
    log::info!("route {:?} ({:?})", route, hash);

    // Drop the previous view outside the thread-local borrow; its destructors
    // clear timers and detach elements.
    let previous = MOUNTED.with(|m| m.borrow_mut().take());
    drop(previous);

    let mounted = match route {
        Route::Game => Mounted::Game(board::mount(&doc, config.clone())?),
        Route::Home => Mounted::Page(home_page(&doc)?),
        Route::NotFound => {
            log::warn!("no view for {:?}", hash);
            return Ok(());
        }
    };
    MOUNTED.with(|m| m.replace(Some(mounted)));
    Ok(())
}

fn home_page(doc: &Document) -> Result<Element, JsValue> {
    let body = doc.body().ok_or(UiError::NoBody)?;
    let page = dom::styled(doc, "div", "cp-home", HOME_STYLE)?;
    let heading = doc.create_element("h1")?;
    heading.set_text_content(Some("Home"));
    let link = doc.create_element("a")?;
    link.set_attribute("href", "#/game")?;
    link.set_text_content(Some("Play Clear Points"));
    page.append_child(&heading)?;
    page.append_child(&link)?;
    body.append_child(&page)?;
    Ok(page)
}

/// Read the mounted game session, if the game view is showing.
pub fn with_mounted_session<R>(f: impl FnOnce(&Session) -> R) -> Option<R> {
    MOUNTED.with(|m| match m.borrow().as_ref() {
        Some(Mounted::Game(board)) => board.try_borrow().ok().map(|b| f(b.session())),
        _ => None,
    })
}
