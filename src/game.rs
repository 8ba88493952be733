//! Frame loop and browser wiring.
//!
//! [`Game`] is the host-testable part: it routes input events and runs one
//! update + draw per frame for whichever scene is active. The rest of this file
//! binds it to the page: element lookup, image loading, DOM listeners and the
//! `requestAnimationFrame` loop, with the live game kept in a `thread_local!`.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use rand::rngs::ThreadRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, HtmlImageElement, window};

use crate::canvas::CanvasSurface;
use crate::config::GameConfig;
use crate::input::{InputEvent, Key, KeyState};
use crate::main_scene::MainScene;
use crate::scene::{Notification, Scene, SceneStateMachine};
use crate::surface::Surface;

pub struct Game<R: Rng> {
    scenes: SceneStateMachine,
    main: MainScene,
    keys: KeyState,
    /// Enter pressed in the main scene, handled on the next frame.
    confirm_requested: bool,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Self {
        Self {
            scenes: SceneStateMachine::new(config, &mut rng),
            main: MainScene::new(config),
            keys: KeyState::default(),
            confirm_requested: false,
            rng,
        }
    }

    pub fn scenes(&self) -> &SceneStateMachine {
        &self.scenes
    }

    pub fn main_scene(&self) -> &MainScene {
        &self.main
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn handle_event<S: Surface + ?Sized>(&mut self, event: InputEvent, now: f64, surface: &mut S) {
        if let InputEvent::KeyDown(key @ (Key::Jump | Key::Confirm)) = event {
            // Auto-repeat of a held key must not act twice.
            if !self.keys.press(key) {
                log::debug!("ignoring repeated {key:?}");
                return;
            }
        }
        match (event, self.scenes.scene()) {
            (InputEvent::KeyUp(key), _) => self.keys.set(key, false),
            (InputEvent::KeyDown(Key::Jump), Scene::Main) => self.main.jump(),
            (InputEvent::KeyDown(Key::Confirm), Scene::Main) => self.confirm_requested = true,
            (InputEvent::KeyDown(key), Scene::Main) => self.keys.set(key, true),
            (InputEvent::KeyDown(Key::Confirm), Scene::Puzzle(_)) => {
                self.scenes.confirm_in_puzzle(surface);
            }
            (InputEvent::KeyDown(_), Scene::Puzzle(_)) => {}
            (InputEvent::PointerClick { x, y }, Scene::Puzzle(_)) => {
                self.scenes.click(x, y, now, surface);
            }
            (InputEvent::PointerClick { .. }, Scene::Main) => {}
        }
    }

    /// Runs one frame and returns a notification that became due, if any.
    pub fn frame<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> Option<Notification> {
        let notification = self.scenes.tick(now, surface);
        if self.scenes.scene() == Scene::Main {
            let width = self.scenes.main_size().0 as f64;
            self.main.update(&self.keys, width);
            if std::mem::take(&mut self.confirm_requested) {
                let x = self.main.player().x;
                self.scenes.confirm_in_main(x, surface, &mut self.rng);
            }
        }
        match self.scenes.scene() {
            Scene::Main => self.main.render(surface, &self.scenes),
            Scene::Puzzle(_) => self.scenes.render_puzzle(surface),
        }
        notification
    }
}

// --- Browser runner ----------------------------------------------------------

struct Runner {
    game: Game<ThreadRng>,
    surface: CanvasSurface,
    status_el: Option<Element>,
    heading_el: Option<Element>,
    shown_status: String,
    shown_heading: String,
}

impl Runner {
    /// Pushes changed status / heading text to the page.
    fn sync_text(&mut self) {
        let scenes = self.game.scenes();
        if scenes.status() != self.shown_status {
            self.shown_status = scenes.status().to_string();
            if let Some(el) = &self.status_el {
                el.set_text_content(Some(&self.shown_status));
            }
        }
        if scenes.heading() != self.shown_heading {
            self.shown_heading = scenes.heading().to_string();
            if let Some(el) = &self.heading_el {
                el.set_text_content(Some(&self.shown_heading));
            }
        }
    }
}

fn notify(notification: Notification) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(notification.message());
    }
}

thread_local! {
    static GAME: RefCell<Option<Runner>> = const { RefCell::new(None) };
}

fn with_runner(f: impl FnOnce(&mut Runner)) {
    GAME.with(|cell| {
        if let Some(runner) = cell.borrow_mut().as_mut() {
            f(runner);
        }
    });
}

fn dispatch(event: InputEvent) {
    let now = performance_now();
    with_runner(|r| {
        r.game.handle_event(event, now, &mut r.surface);
        r.sync_text();
    });
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(feature = "serde_json")]
pub(crate) fn session_snapshot() -> Option<crate::scene::SessionSnapshot> {
    GAME.with(|cell| cell.borrow().as_ref().map(|r| r.game.scenes().snapshot()))
}

/// Looks up the page elements and starts loading the picture; the game boots
/// once the image has loaded.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(config.canvas_id)
        .ok_or_else(|| JsValue::from_str("game canvas not found"))?
        .dyn_into()?;
    let status_el = doc.get_element_by_id(config.status_id);
    let heading_el = doc.get_element_by_id(config.heading_id);
    if status_el.is_none() {
        log::warn!("status element #{} missing", config.status_id);
    }

    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));
    let src = config.image_src;
    let onload = {
        let image = image.clone();
        Closure::once_into_js(move || {
            if let Err(err) = boot(config, canvas, image, status_el, heading_el) {
                log::error!("failed to start game: {err:?}");
            }
        })
    };
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_src(src);
    log::info!("loading {src}");
    Ok(())
}

fn boot(
    config: GameConfig,
    canvas: HtmlCanvasElement,
    image: HtmlImageElement,
    status_el: Option<Element>,
    heading_el: Option<Element>,
) -> Result<(), JsValue> {
    let (need_w, need_h) = config.puzzle_size();
    if image.natural_width() < need_w || image.natural_height() < need_h {
        log::warn!(
            "image is {}x{}, puzzles expect at least {need_w}x{need_h}",
            image.natural_width(),
            image.natural_height()
        );
    }
    let mut surface = CanvasSurface::new(canvas.clone(), image)?;
    let (w, h) = config.main_size();
    surface.resize(w, h);

    let mut runner = Runner {
        game: Game::new(&config, rand::thread_rng()),
        surface,
        status_el,
        heading_el,
        shown_status: String::new(),
        shown_heading: String::new(),
    };
    runner.sync_text();
    GAME.with(|cell| cell.replace(Some(runner)));

    install_listeners(&canvas)?;
    start_loop();
    log::info!("game started");
    Ok(())
}

fn install_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(key) = Key::from_dom(&evt.key()) {
                // Keep space / arrows from scrolling the page.
                evt.prevent_default();
                if evt.repeat() {
                    return;
                }
                dispatch(InputEvent::KeyDown(key));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(key) = Key::from_dom(&evt.key()) {
                dispatch(InputEvent::KeyUp(key));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            dispatch(InputEvent::PointerClick {
                x: evt.offset_x() as f64,
                y: evt.offset_y() as f64,
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), callback.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let mut due = None;
        with_runner(|r| {
            due = r.game.frame(ts, &mut r.surface);
            r.sync_text();
        });
        // Alert after releasing the game state; it blocks until dismissed.
        if let Some(notification) = due {
            notify(notification);
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
