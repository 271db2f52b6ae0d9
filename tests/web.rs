// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use clear_points::view::{CircleVisual, hit_test};
use clear_points::{GameConfig, Status, ui};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn element<T: JsCast>(id: &str) -> T {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn text(id: &str) -> Option<String> {
    document().get_element_by_id(id).unwrap().text_content()
}

// Mounts the route synchronously; the real hashchange event may follow later.
fn open(hash: &str) {
    web_sys::window().unwrap().location().set_hash(hash).unwrap();
    ui::start(GameConfig::default()).unwrap();
}

fn type_points(value: &str) {
    let input: HtmlInputElement = element("cp-points");
    input.set_value(value);
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
}

fn press_play() {
    element::<HtmlElement>("cp-primary").click();
}

fn status() -> Option<Status> {
    ui::with_mounted_session(|s| s.status())
}

#[wasm_bindgen_test]
fn home_route_shows_placeholder() {
    open("");
    assert!(document().get_element_by_id("cp-home").is_some());
    assert!(document().get_element_by_id("cp-root").is_none());
}

#[wasm_bindgen_test]
fn game_route_mounts_board_and_starts() {
    open("#/game");
    assert!(document().get_element_by_id("cp-home").is_none());
    assert_eq!(status(), Some(Status::Ready));
    assert_eq!(text("cp-next").as_deref(), Some("Next: -"));

    press_play();
    assert_eq!(status(), Some(Status::Playing));
    assert_eq!(ui::with_mounted_session(|s| s.circles().len()), Some(5));
    assert_eq!(text("cp-primary").as_deref(), Some("Restart"));
}

#[wasm_bindgen_test]
fn points_input_sets_circle_count() {
    open("#/game");
    type_points("3");
    press_play();
    assert_eq!(ui::with_mounted_session(|s| s.circles().len()), Some(3));

    open("#/game");
    type_points("abc");
    press_play();
    assert_eq!(status(), Some(Status::Playing));
    assert_eq!(ui::with_mounted_session(|s| s.circles().len()), Some(0));
}

#[wasm_bindgen_test]
fn canvas_click_hits_circle() {
    open("#/game");
    type_points("2");
    press_play();

    // a board point where circle 1 is the topmost circle
    let (x, y) = ui::with_mounted_session(|s| {
        let v = CircleVisual::of(s.circle(1).unwrap(), s.config());
        let r = v.radius as i32 - 2;
        let (cx, cy) = (v.cx as i32, v.cy as i32);
        (-r..=r)
            .flat_map(|dx| (-r..=r).map(move |dy| (cx + dx, cy + dy)))
            .find(|&(x, y)| hit_test(s, x as f64, y as f64) == Some(1))
            .unwrap()
    })
    .unwrap();

    let canvas: HtmlElement = element("cp-board");
    let rect = canvas.get_bounding_client_rect();
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(rect.left() as i32 + canvas.client_left() + x);
    init.set_client_y(rect.top() as i32 + canvas.client_top() + y);
    let click = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    canvas.dispatch_event(&click).unwrap();

    assert_eq!(ui::with_mounted_session(|s| s.next_expected()), Some(2));
    let clicked = ui::with_mounted_session(|s| s.circle(1).unwrap().clicked);
    assert_eq!(clicked, Some(true));
    assert_eq!(status(), Some(Status::Playing));
}

#[wasm_bindgen_test]
fn hash_change_unmounts_board() {
    open("#/game");
    press_play();
    assert!(document().get_element_by_id("cp-root").is_some());

    let win = web_sys::window().unwrap();
    win.location().set_hash("#/").unwrap();
    win.dispatch_event(&Event::new("hashchange").unwrap()).unwrap();

    assert!(document().get_element_by_id("cp-root").is_none());
    assert!(document().get_element_by_id("cp-home").is_some());
    assert_eq!(status(), None);
}
