//! Browser game board.
//!
//! One [`GameBoard`] owns the [`Session`] and every timer and listener that touches
//! it. Callbacks hold a `Weak` back-reference and borrow the board for the length of
//! one event, so there is exactly one copy of the game state.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlButtonElement, HtmlCanvasElement,
    HtmlInputElement, MouseEvent,
};

use super::dom::{Listener, styled, styled_as};
use super::timers::{FrameLoop, Interval, TimeoutLoop};
use crate::config::GameConfig;
use crate::error::UiError;
use crate::game::autoplay::{AutoPlayTask, CancelFlag};
use crate::game::{ClickOutcome, Session, Status, parse_point_count};
use crate::view;

const ROOT_STYLE: &str = "font-family:'Fira Code', monospace; width:fit-content; margin:24px auto; padding:16px 20px; border:1px solid #333; border-radius:8px; background:#fff; color:#222;";
const CANVAS_STYLE: &str = "display:block; border:1px solid #222; cursor:pointer;";
const BUTTON_STYLE: &str = "padding:4px 14px;";
const TITLE_STYLE: &str = "margin:0 0 8px 0;";

struct Dom {
    root: Element,
    title: Element,
    points: HtmlInputElement,
    time: Element,
    primary: HtmlButtonElement,
    auto: HtmlButtonElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    next: Element,
}

impl Dom {
    fn build(doc: &Document, config: &GameConfig) -> Result<Self, JsValue> {
        let body = doc.body().ok_or(UiError::NoBody)?;
        let root = styled(doc, "div", "cp-root", ROOT_STYLE)?;

        let title = styled(doc, "h3", "cp-title", TITLE_STYLE)?;

        let points_row = styled(doc, "div", "", "margin-bottom:4px;")?;
        let label = styled(doc, "span", "", "display:inline-block; width:70px;")?;
        label.set_text_content(Some("Points:"));
        let points: HtmlInputElement = styled_as(doc, "input", "cp-points", "width:80px;")?;
        points.set_type("number");
        points.set_value(&config.default_points.to_string());
        points_row.append_child(&label)?;
        points_row.append_child(&points)?;

        let time = styled(doc, "div", "cp-time", "margin-bottom:8px;")?;

        let controls = styled(doc, "div", "", "display:flex; gap:8px; margin-bottom:12px;")?;
        let primary: HtmlButtonElement = styled_as(doc, "button", "cp-primary", BUTTON_STYLE)?;
        let auto: HtmlButtonElement = styled_as(doc, "button", "cp-auto", BUTTON_STYLE)?;
        controls.append_child(&primary)?;
        controls.append_child(&auto)?;

        let canvas: HtmlCanvasElement = styled_as(doc, "canvas", "cp-board", CANVAS_STYLE)?;
        let (w, h) = config.board_size();
        canvas.set_width(w.max(1.0) as u32);
        canvas.set_height(h.max(1.0) as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(UiError::NoCanvasContext)?
            .dyn_into()?;
        ctx.set_text_align("center");

        let next = styled(doc, "div", "cp-next", "margin-top:8px;")?;

        for child in [&title, &points_row, &time, &controls] {
            root.append_child(child)?;
        }
        root.append_child(&canvas)?;
        root.append_child(&next)?;
        body.append_child(&root)?;

        Ok(Self {
            root,
            title,
            points,
            time,
            primary,
            auto,
            canvas,
            ctx,
            next,
        })
    }
}

/// Running auto-play loop plus the switch that stops it.
struct AutoPlay {
    cancel: CancelFlag,
    _timer: Option<TimeoutLoop>,
}

impl Drop for AutoPlay {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub struct GameBoard {
    me: Weak<RefCell<GameBoard>>,
    session: Session,
    rng: StdRng,
    dom: Dom,
    _countdown: Option<Interval>,
    elapsed: Option<Interval>,
    auto: Option<AutoPlay>,
    _frame: Option<FrameLoop>,
    _listeners: Vec<Listener>,
}

/// Run `f` on the board if it is still mounted and not already borrowed.
fn with_board(board: &Weak<RefCell<GameBoard>>, f: impl FnOnce(&mut GameBoard)) {
    if let Some(rc) = board.upgrade() {
        if let Ok(mut b) = rc.try_borrow_mut() {
            f(&mut b);
        }
    }
}

pub fn mount(doc: &Document, config: GameConfig) -> Result<Rc<RefCell<GameBoard>>, JsValue> {
    let dom = Dom::build(doc, &config)?;
    let tick_ms = config.tick_ms;
    let board = Rc::new_cyclic(|me| {
        RefCell::new(GameBoard {
            me: me.clone(),
            session: Session::new(config),
            rng: StdRng::from_entropy(),
            dom,
            _countdown: None,
            elapsed: None,
            auto: None,
            _frame: None,
            _listeners: Vec::new(),
        })
    });
    let weak = Rc::downgrade(&board);

    let countdown = {
        let w = weak.clone();
        let tick = move || with_board(&w, GameBoard::on_countdown_tick);
        Interval::new(tick_ms, tick)?
    };

    let mut listeners = Vec::new();
    {
        let b = board.borrow();
        let w = weak.clone();
        let on_primary = move |_: Event| with_board(&w, GameBoard::start);
        listeners.push(Listener::new(&b.dom.primary, "click", on_primary)?);

        let w = weak.clone();
        let on_auto = move |_: Event| with_board(&w, GameBoard::toggle_auto_play);
        listeners.push(Listener::new(&b.dom.auto, "click", on_auto)?);

        let w = weak.clone();
        let on_points = move |_: Event| with_board(&w, GameBoard::on_points_input);
        listeners.push(Listener::new(&b.dom.points, "input", on_points)?);

        let w = weak.clone();
        let on_canvas = move |evt: Event| {
            if let Some(m) = evt.dyn_ref::<MouseEvent>() {
                let (x, y) = (m.offset_x() as f64, m.offset_y() as f64);
                with_board(&w, |b| b.on_board_click(x, y));
            }
        };
        listeners.push(Listener::new(&b.dom.canvas, "click", on_canvas)?);
    }

    let frame = {
        let w = weak.clone();
        FrameLoop::start(move |_ts| with_board(&w, |b| b.render()))
    };

    {
        let mut b = board.borrow_mut();
        b._countdown = Some(countdown);
        b._frame = Some(frame);
        b._listeners = listeners;
        b.on_points_input();
        b.render();
    }
    log::info!("board mounted");
    Ok(board)
}

impl GameBoard {
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn start(&mut self) {
        self.auto = None;
        let count = self.session.target_count();
        self.session.start(count, &mut self.rng);

        let me = self.me.clone();
        let tick = move || with_board(&me, GameBoard::on_elapsed_tick);
        match Interval::new(self.session.config().tick_ms, tick) {
            Ok(timer) => self.elapsed = Some(timer),
            Err(e) => log::error!("elapsed timer failed: {:?}", e),
        }
        self.render();
    }

    fn toggle_auto_play(&mut self) {
        if !self.session.toggle_auto_play() {
            return;
        }
        self.auto = None;
        if self.session.auto_play() {
            self.run_auto_play();
        }
        self.sync_timers();
        self.render();
    }

    // First poll runs right away; the timeout chain takes over from there.
    fn run_auto_play(&mut self) {
        let task = AutoPlayTask::new();
        let cancel = task.cancel_flag();
        let step = task.poll(&mut self.session);
        log::debug!("auto-play {:?}", step);
        let timer = step.delay_ms(self.session.config()).map(|ms| {
            let me = self.me.clone();
            TimeoutLoop::start(ms, move || {
                let mut next = None;
                with_board(&me, |b| {
                    let step = task.poll(&mut b.session);
                    log::debug!("auto-play {:?}", step);
                    next = step.delay_ms(b.session.config());
                    b.sync_timers();
                });
                next
            })
        });
        self.auto = Some(AutoPlay {
            cancel,
            _timer: timer,
        });
    }

    fn on_board_click(&mut self, x: f64, y: f64) {
        let Some(id) = view::hit_test(&self.session, x, y) else {
            return;
        };
        if self.session.click(id) == ClickOutcome::Wrong {
            log::debug!("wrong circle {}", id);
        }
        self.sync_timers();
        self.render();
    }

    fn on_points_input(&mut self) {
        let raw = self.dom.points.value();
        let count = parse_point_count(&raw).unwrap_or(0);
        self.session.set_target_count(count);
    }

    fn on_countdown_tick(&mut self) {
        self.session.tick_countdowns();
        self.sync_timers();
    }

    fn on_elapsed_tick(&mut self) {
        self.session.tick_elapsed();
    }

    // Stop the timers whose condition no longer holds. The auto-play loop is only
    // signalled here; it may be the caller and is dropped later from outside.
    fn sync_timers(&mut self) {
        if self.session.status() != Status::Playing {
            self.elapsed = None;
            if let Some(auto) = &self.auto {
                auto.cancel.cancel();
            }
        }
    }

    fn render(&self) {
        let s = &self.session;
        let dom = &self.dom;
        let status = s.status();

        let (text, modifier) = view::title(status);
        dom.title.set_text_content(Some(text));
        let color = match modifier {
            "win" => "#389e0d",
            "lose" => "#cf1322",
            _ => "#222",
        };
        let style = format!("{TITLE_STYLE} color:{color};");
        dom.title.set_attribute("style", &style).ok();

        dom.points.set_disabled(view::points_input_disabled(status));
        dom.time.set_text_content(Some(&view::time_label(s)));
        let primary = view::primary_button_label(status);
        dom.primary.set_text_content(Some(primary));
        match view::auto_play_button(s) {
            Some(label) => {
                dom.auto.set_text_content(Some(label));
                dom.auto.set_hidden(false);
            }
            None => dom.auto.set_hidden(true),
        }
        dom.next.set_text_content(Some(&view::next_label(s)));
        self.draw_circles();
    }

    fn draw_circles(&self) {
        let ctx = &self.dom.ctx;
        let w = self.dom.canvas.width() as f64;
        let h = self.dom.canvas.height() as f64;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#fafafa");
        ctx.fill_rect(0.0, 0.0, w, h);

        for v in view::draw_order(&self.session) {
            ctx.set_global_alpha(v.opacity);
            ctx.begin_path();
            let r = (v.radius - 1.0).max(1.0);
            ctx.arc(v.cx, v.cy, r, 0.0, TAU).ok();
            ctx.set_fill_style_str(if v.highlighted { "#ff7a45" } else { "#ffffff" });
            ctx.fill();
            ctx.set_line_width(2.0);
            ctx.set_stroke_style_str("#d4380d");
            ctx.stroke();

            ctx.set_fill_style_str("#222222");
            ctx.set_font("bold 14px 'Fira Code', monospace");
            match &v.countdown {
                Some(label) => {
                    ctx.fill_text(&v.id.to_string(), v.cx, v.cy - 2.0).ok();
                    ctx.set_font("11px 'Fira Code', monospace");
                    ctx.fill_text(label, v.cx, v.cy + 12.0).ok();
                }
                None => {
                    ctx.fill_text(&v.id.to_string(), v.cx, v.cy + 5.0).ok();
                }
            }
        }
        ctx.set_global_alpha(1.0);
    }
}

impl Drop for GameBoard {
    fn drop(&mut self) {
        self.dom.root.remove();
        log::info!("board unmounted");
    }
}
