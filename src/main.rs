//! Fun Zone entry point
//!
//! On the web this exposes a `FunZone` handle to the host page: it mounts the
//! pointer trail on an overlay canvas and routes game input to the selector.
//! Natively it plays every game headlessly with logging.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent};

    use funzone::games::{GameAction, GameId, GameSelector};
    use funzone::renderer::TrailRenderState;
    use funzone::sim::Outcome;
    use funzone::ui::{OverlayAction, menu};
    use funzone::{Catalog, Settings, Trail};

    /// A DOM listener that is removed again when dropped
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn attach(
            target: &EventTarget,
            kind: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Option<Self> {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
                Ok(()) => Some(Self {
                    target: target.clone(),
                    kind,
                    closure,
                }),
                Err(e) => {
                    log::warn!("could not listen for {}: {:?}", kind, e);
                    None
                }
            }
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        }
    }

    struct App {
        selector: GameSelector,
        trail: Trail,
        settings: Settings,
        canvas: HtmlCanvasElement,
        render_state: Option<TrailRenderState>,
        listeners: Vec<Listener>,
        frame_id: Option<i32>,
        last_time: f64,
    }

    impl App {
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let (width, height) = ((css_w * dpr) as u32, (css_h * dpr) as u32);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            // Particles live in CSS pixels; the renderer scales by the canvas
            self.trail.resize(css_w as u32, css_h as u32);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0).max(0.0)
            } else {
                0.0
            };
            self.last_time = time;

            self.trail.frame();
            for outcome in self.selector.advance(Duration::from_secs_f64(dt)) {
                if outcome == Outcome::Failed {
                    log::debug!("session ended on a timer");
                }
            }
            self.render();
        }

        fn render(&mut self) {
            let (css_w, css_h) = self.trail.viewport();
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let scale = if css_w > 0 && css_h > 0 {
                render_state.size.0 as f32 / css_w as f32
            } else {
                1.0
            };
            let mut vertices = self.trail.vertices(self.settings.quality.circle_segments());
            for v in vertices.iter_mut() {
                v.position = [v.position[0] * scale, v.position[1] * scale];
            }
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory, dropping the trail renderer");
                    self.render_state = None;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Detach listeners and stop the frame loop. Safe to call twice.
        fn teardown(&mut self) {
            if !self.trail.unmount() {
                return;
            }
            self.listeners.clear();
            if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            self.selector.back();
            log::info!("Fun Zone unmounted");
        }
    }

    fn schedule_frame(app: &Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = Rc::downgrade(app);
        let callback = Closure::once_into_js(move |time: f64| run_frame(&weak, time));
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => app.borrow_mut().frame_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn run_frame(app: &Weak<RefCell<App>>, time: f64) {
        let Some(app) = app.upgrade() else {
            return;
        };
        {
            let mut a = app.borrow_mut();
            a.frame_id = None;
            if !a.trail.is_mounted() {
                return;
            }
            a.frame(time);
        }
        schedule_frame(&app);
    }

    fn attach_listeners(app: &Rc<RefCell<App>>, window: &web_sys::Window) {
        let target: &EventTarget = window.as_ref();
        let mut listeners = Vec::new();

        let weak = Rc::downgrade(app);
        listeners.extend(Listener::attach(target, "mousemove", move |event| {
            let (Some(app), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            app.borrow_mut()
                .trail
                .pointer_moved(mouse.client_x() as f32, mouse.client_y() as f32);
        }));

        let weak = Rc::downgrade(app);
        listeners.extend(Listener::attach(target, "resize", move |_event| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().resize();
            }
        }));

        app.borrow_mut().listeners = listeners;
    }

    fn seed() -> u64 {
        let mut bytes = [0u8; 8];
        match getrandom::fill(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                log::warn!("getrandom failed ({}), seeding from the clock", e);
                js_sys::Date::now() as u64
            }
        }
    }

    async fn create_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<TrailRenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);
        TrailRenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| e.to_string())
    }

    fn outcome_name(outcome: Outcome) -> String {
        match outcome {
            Outcome::Ignored => "ignored",
            Outcome::Pending => "pending",
            Outcome::Scored { .. } => "scored",
            Outcome::NextRound => "next_round",
            Outcome::Failed => "failed",
        }
        .to_string()
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Handle owned by the host page
    #[wasm_bindgen]
    pub struct FunZone {
        app: Rc<RefCell<App>>,
    }

    #[wasm_bindgen]
    impl FunZone {
        /// Mount the trail on the canvas `canvas_id` and start the frame loop.
        /// `catalog_json` and `settings_json` override the built-in content.
        pub async fn mount(
            canvas_id: String,
            catalog_json: Option<String>,
            settings_json: Option<String>,
        ) -> Result<FunZone, JsValue> {
            let catalog = match catalog_json {
                Some(json) => Catalog::from_json(&json).map_err(js_err)?,
                None => Catalog::default(),
            };
            let settings = match settings_json {
                Some(json) => Settings::from_json(&json).map_err(js_err)?,
                None => Settings::default(),
            };

            let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
            let document = window.document().ok_or_else(|| js_err("no document"))?;
            let canvas: HtmlCanvasElement = document
                .get_element_by_id(&canvas_id)
                .ok_or_else(|| js_err(format!("no element #{}", canvas_id)))?
                .dyn_into()
                .map_err(|_| js_err(format!("#{} is not a canvas", canvas_id)))?;

            let mut trail = Trail::from_catalog(&catalog, &settings, seed()).map_err(js_err)?;
            trail.mount();
            let app = Rc::new(RefCell::new(App {
                selector: GameSelector::new(catalog, seed()),
                trail,
                settings,
                canvas: canvas.clone(),
                render_state: None,
                listeners: Vec::new(),
                frame_id: None,
                last_time: 0.0,
            }));
            app.borrow_mut().resize();

            let (width, height) = (canvas.width(), canvas.height());
            match create_renderer(&canvas, width, height).await {
                Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                Err(e) => log::warn!("Trail renderer unavailable, running without it: {}", e),
            }

            attach_listeners(&app, &window);
            schedule_frame(&app);
            log::info!("Fun Zone mounted on #{}", canvas_id);
            Ok(FunZone { app })
        }

        /// Menu cards as JSON
        pub fn menu_json(&self) -> Result<String, JsValue> {
            serde_json::to_string(&menu()).map_err(js_err)
        }

        /// Mount a fresh session. Returns false for an unknown id.
        pub fn select(&self, id: &str) -> bool {
            match GameId::parse(id) {
                Some(id) => {
                    self.app.borrow_mut().selector.select(id);
                    true
                }
                None => {
                    log::warn!("unknown game id {:?}", id);
                    false
                }
            }
        }

        pub fn back(&self) {
            self.app.borrow_mut().selector.back();
        }

        pub fn restart(&self) -> bool {
            self.app.borrow_mut().selector.restart()
        }

        pub fn flip(&self, index: usize) -> String {
            self.act(GameAction::Flip(index))
        }

        pub fn choose(&self, value: u32) -> String {
            self.act(GameAction::Choose(value))
        }

        pub fn pop(&self) -> String {
            self.act(GameAction::Pop)
        }

        pub fn pick(&self, index: usize) -> String {
            self.act(GameAction::Pick(index))
        }

        pub fn submit(&self, text: String) -> String {
            self.act(GameAction::Submit(text))
        }

        pub fn give_up(&self) -> String {
            self.act(GameAction::GiveUp)
        }

        pub fn next_word(&self) -> String {
            self.act(GameAction::NextWord)
        }

        /// The active session as JSON, `null` on the menu
        pub fn state_json(&self) -> Result<String, JsValue> {
            self.app.borrow().selector.snapshot_json().map_err(js_err)
        }

        /// The Game Over overlay as JSON, `null` while playing
        pub fn overlay_json(&self) -> Result<String, JsValue> {
            serde_json::to_string(&self.app.borrow().selector.overlay()).map_err(js_err)
        }

        pub fn overlay_restart(&self) {
            self.app.borrow_mut().selector.apply_overlay(OverlayAction::Restart);
        }

        pub fn overlay_back(&self) {
            self.app.borrow_mut().selector.apply_overlay(OverlayAction::Back);
        }

        /// Apply new preferences without remounting
        pub fn set_settings(&self, settings_json: &str) -> Result<(), JsValue> {
            let settings = Settings::from_json(settings_json).map_err(js_err)?;
            let mut app = self.app.borrow_mut();
            app.trail.apply_settings(&settings);
            app.settings = settings;
            Ok(())
        }

        /// Tear everything down. Further calls are no-ops.
        pub fn destroy(&self) {
            self.app.borrow_mut().teardown();
        }
    }

    impl FunZone {
        fn act(&self, action: GameAction) -> String {
            outcome_name(self.app.borrow_mut().selector.act(action))
        }
    }

    impl Drop for FunZone {
        fn drop(&mut self) {
            if let Ok(mut app) = self.app.try_borrow_mut() {
                app.teardown();
            }
        }
    }

    pub fn init_logging() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::init_logging();
    log::info!("Fun Zone loaded");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fun Zone (native) - headless demo");
    log::info!("The browser build is driven by the host page via `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::Duration;

    use funzone::games::{ActiveGame, GameAction, GameId, GameSelector};
    use funzone::sim::{Outcome, Phase};
    use funzone::ui::{OverlayAction, menu};
    use funzone::{Catalog, Settings, Trail};

    /// Right answers for the current round
    fn winning_moves(game: &ActiveGame) -> Vec<GameAction> {
        match game {
            ActiveGame::Memory(s) => {
                let cards = &s.round().cards;
                let Some(first) = cards.iter().position(|c| !c.face_up()) else {
                    return Vec::new();
                };
                cards
                    .iter()
                    .enumerate()
                    .skip(first + 1)
                    .find(|(_, c)| c.symbol == cards[first].symbol)
                    .map(|(second, _)| vec![GameAction::Flip(first), GameAction::Flip(second)])
                    .unwrap_or_default()
            }
            ActiveGame::Math(s) => vec![GameAction::Choose(s.round().answer)],
            ActiveGame::Pop(_) => vec![GameAction::Pop],
            ActiveGame::Spell(s) => vec![GameAction::Submit(s.round().word.to_lowercase())],
            ActiveGame::Color(s) => {
                let prompt = s.round();
                prompt
                    .swatches
                    .iter()
                    .position(|sw| sw.name == prompt.target.name)
                    .map(|i| vec![GameAction::Pick(i)])
                    .unwrap_or_default()
            }
            ActiveGame::Count(s) => vec![GameAction::Choose(s.round().count)],
        }
    }

    /// A move that ends the session, if the game has one
    fn losing_move(game: &ActiveGame) -> Option<Vec<GameAction>> {
        match game {
            ActiveGame::Memory(s) => {
                let cards = &s.round().cards;
                let hidden: Vec<usize> = (0..cards.len()).filter(|&i| !cards[i].face_up()).collect();
                let first = *hidden.first()?;
                let other = hidden
                    .iter()
                    .copied()
                    .find(|&i| cards[i].symbol != cards[first].symbol)?;
                Some(vec![GameAction::Flip(first), GameAction::Flip(other)])
            }
            ActiveGame::Math(s) => Some(vec![GameAction::Choose(s.round().answer + 100)]),
            ActiveGame::Pop(_) => None,
            ActiveGame::Spell(_) => Some(vec![GameAction::Submit("ZZZ".to_string())]),
            ActiveGame::Color(s) => {
                let prompt = s.round();
                let wrong = prompt.swatches.iter().position(|sw| sw.name != prompt.target.name)?;
                Some(vec![GameAction::Pick(wrong)])
            }
            ActiveGame::Count(_) => Some(vec![GameAction::Choose(0)]),
        }
    }

    fn play(selector: &mut GameSelector, moves: Vec<GameAction>) {
        for action in moves {
            let outcome = selector.act(action.clone());
            log::debug!("{:?} -> {:?}", action, outcome);
        }
        // Let delayed match/advance tasks fire
        selector.advance(Duration::from_millis(1000));
    }

    fn autoplay(selector: &mut GameSelector, id: GameId) {
        selector.select(id);
        for _ in 0..5 {
            let Some(moves) = selector.active().map(winning_moves) else {
                return;
            };
            play(selector, moves);
        }

        while selector.status().map(|s| s.phase) == Some(Phase::InProgress) {
            match selector.active().and_then(losing_move) {
                Some(moves) => play(selector, moves),
                None => {
                    if selector.active().map(ActiveGame::pending_tasks) == Some(0) {
                        // Board cleared, nothing left to lose
                        break;
                    }
                    // Only the clock ends this one
                    let fired = selector.advance(Duration::from_secs(1));
                    if fired.contains(&Outcome::Failed) {
                        break;
                    }
                }
            }
        }

        if let Some(overlay) = selector.overlay() {
            log::info!("{} {} {}", overlay.emoji, overlay.title, overlay.score_line());
        }
        selector.apply_overlay(OverlayAction::Back);
    }

    pub fn run(seed: u64) {
        let catalog = Catalog::default();
        let mut selector = GameSelector::new(catalog.clone(), seed);
        for entry in menu() {
            log::info!("{} {}: {}", entry.icon, entry.title, entry.tagline);
            autoplay(&mut selector, entry.id);
        }

        let settings = Settings::default();
        match Trail::from_catalog(&catalog, &settings, seed) {
            Ok(mut trail) => {
                trail.mount();
                trail.resize(800, 600);
                for step in 0..20 {
                    trail.pointer_moved(100.0 + step as f32 * 10.0, 300.0);
                    trail.frame();
                }
                let vertices = trail.vertices(settings.quality.circle_segments());
                log::info!(
                    "trail: {} particles, {} vertices",
                    trail.len(),
                    vertices.len()
                );
                trail.unmount();
            }
            Err(e) => log::error!("bad trail palette: {}", e),
        }
    }
}
