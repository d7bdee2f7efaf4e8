//! Beacon Guardian entry point
//!
//! Handles platform-specific initialization and runs the two loops: the
//! per-frame game/render loop and the coarse radar feed timer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use beacon_guardian::consts::*;
    use beacon_guardian::radar::{Navigator, SignalFilter};
    use beacon_guardian::renderer::{RenderState, game_frame, radar_frame};
    use beacon_guardian::sim::{self, Direction, GameEvent, GamePhase, GameState};
    use beacon_guardian::{HighScore, Settings};
    use glam::Vec2;

    /// Application state shared across event callbacks
    struct App {
        game: GameState,
        navigator: Navigator,
        high_score: HighScore,
        settings: Settings,
        game_surface: Option<RenderState>,
        radar_surface: Option<RenderState>,
        last_time: f64,
        /// Pending animation-frame handle; None once torn down
        raf_handle: Option<i32>,
        /// Feed refresh interval handle; None once torn down
        feed_timer: Option<i32>,
        torn_down: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(seed: u64, now_ms: f64) -> Self {
            Self {
                game: GameState::new(seed),
                navigator: Navigator::new(seed ^ 0x5EED, now_ms),
                high_score: HighScore::load(),
                settings: Settings::load(),
                game_surface: None,
                radar_surface: None,
                last_time: 0.0,
                raf_handle: None,
                feed_timer: None,
                torn_down: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation and react to its events
        fn update(&mut self, now_ms: f64, dt: f32) {
            let events = sim::tick(&mut self.game, now_ms, dt);
            for event in events {
                match event {
                    GameEvent::Collected { .. } => {}
                    GameEvent::LevelUp { level } => {
                        log::info!("Level up: {}", level);
                    }
                    GameEvent::GameOver { final_score } => {
                        log::info!("Game over at {} points", final_score);
                        if self.high_score.record(final_score) {
                            self.high_score.save();
                        }
                    }
                }
            }

            // FPS from a 60-frame window
            self.frame_times[self.frame_index] = now_ms;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && now_ms > oldest {
                self.fps = (60_000.0 / (now_ms - oldest)).round() as u32;
            }
        }

        /// Render both surfaces
        fn render(&mut self) {
            let game_vertices = game_frame(&self.game);
            if let Some(ref mut surface) = self.game_surface {
                present(surface, &game_vertices);
            }
            let radar_vertices = radar_frame(self.navigator.feed(), self.settings.filter);
            if let Some(ref mut surface) = self.radar_surface {
                present(surface, &radar_vertices);
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.game.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-level") {
                el.set_text_content(Some(&self.game.level.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-highscore") {
                el.set_text_content(Some(&self.high_score.best().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Game-over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.game.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.game.score.to_string()));
                    }
                    if let Some(level_el) = document.get_element_by_id("final-level") {
                        level_el.set_text_content(Some(&self.game.level.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Stop both loops; nothing fires against the surfaces afterwards
        fn teardown(&mut self) {
            self.torn_down = true;
            let window = web_sys::window().unwrap();
            if let Some(handle) = self.raf_handle.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            if let Some(handle) = self.feed_timer.take() {
                window.clear_interval_with_handle(handle);
            }
            log::info!("Loops halted");
        }
    }

    fn present(surface: &mut RenderState, vertices: &[beacon_guardian::renderer::Vertex]) {
        match surface.render(vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                surface.resize(surface.size.0, surface.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beacon Guardian starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let game_canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no game canvas")
            .dyn_into()
            .expect("not a canvas");
        let radar_canvas: HtmlCanvasElement = document
            .get_element_by_id("radar-canvas")
            .expect("no radar canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        for canvas in [&game_canvas, &radar_canvas] {
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let now = js_sys::Date::now();
        let seed = now as u64;
        let app = Rc::new(RefCell::new(App::new(seed, now)));
        log::info!("Initialized with seed: {}", seed);

        // Initialize WebGPU, one surface per canvas
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let game_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(game_canvas.clone()))
            .expect("Failed to create game surface");
        let radar_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(radar_canvas.clone()))
            .expect("Failed to create radar surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&game_surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        {
            let mut a = app.borrow_mut();
            a.game_surface = Some(
                RenderState::new(
                    game_surface,
                    &adapter,
                    game_canvas.width(),
                    game_canvas.height(),
                    GAME_SIZE,
                )
                .await,
            );
            a.radar_surface = Some(
                RenderState::new(
                    radar_surface,
                    &adapter,
                    radar_canvas.width(),
                    radar_canvas.height(),
                    RADAR_SIZE,
                )
                .await,
            );
        }

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_radar_selection(&radar_canvas, app.clone());
        setup_filter_buttons(app.clone());
        setup_teardown(app.clone());
        start_feed_timer(app.clone());

        request_frame(app);

        log::info!("Beacon Guardian running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "ArrowUp" => {
                    event.prevent_default();
                    a.game.move_beacon(Direction::Up);
                }
                "ArrowDown" => {
                    event.prevent_default();
                    a.game.move_beacon(Direction::Down);
                }
                "ArrowLeft" => {
                    event.prevent_default();
                    a.game.move_beacon(Direction::Left);
                }
                "ArrowRight" => {
                    event.prevent_default();
                    a.game.move_beacon(Direction::Right);
                }
                " " | "Enter" => a.game.start(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.start();
                log::info!("Run started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("skip-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                if let Some(event) = sim::skip_level(&mut a.game) {
                    log::info!("Skipped: {:?}", event);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_radar_selection(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let a = app.borrow();
            // CSS pixels -> logical radar coordinates
            let scale = RADAR_SIZE / canvas_clone.client_width() as f32;
            let point = Vec2::new(
                event.offset_x() as f32 * scale,
                event.offset_y() as f32 * scale,
            );
            let center = Vec2::splat(RADAR_SIZE / 2.0);

            match a.navigator.select_at(point, center, a.settings.filter) {
                Some(record) => show_record_details(record),
                None => log::debug!("No signal under pointer"),
            }
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn show_record_details(record: &beacon_guardian::radar::BlockRecord) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(el) = document.get_element_by_id("block-details") {
            let _ = el.set_attribute("class", "");
        }
        if let Some(el) = document.get_element_by_id("block-id") {
            el.set_text_content(Some(&format!("{:016x}", record.id)));
        }
        if let Some(el) = document.get_element_by_id("block-txs") {
            el.set_text_content(Some(&record.tx_count.to_string()));
        }
        if let Some(el) = document.get_element_by_id("block-size") {
            el.set_text_content(Some(&format!("{} KB", record.size_bytes / 1024)));
        }
        if let Some(el) = document.get_element_by_id("block-fee") {
            el.set_text_content(Some(&format!("{:.6}", record.fee_sol)));
        }
    }

    fn setup_filter_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let filters = [
            ("filter-all", SignalFilter::All),
            ("filter-transaction", SignalFilter::Transaction),
            ("filter-block", SignalFilter::Block),
            ("filter-validator", SignalFilter::Validator),
        ];

        for (id, filter) in filters {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut a = app.borrow_mut();
                    a.settings.filter = filter;
                    a.settings.save();
                    log::info!("Radar filter: {:?}", filter);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Cancel both loops when the page goes away
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().teardown();
        });
        let _ =
            window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// The radar feed refreshes on its own clock, decoupled from the frame loop
    fn start_feed_timer(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let app_for_timer = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut a = app_for_timer.borrow_mut();
            a.navigator.refresh(js_sys::Date::now());
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                FEED_REFRESH_MS as i32,
            )
            .expect("Failed to start feed timer");
        closure.forget();
        app.borrow_mut().feed_timer = Some(handle);
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let app_for_cb = app.clone();
        let closure = Closure::once(move |time: f64| {
            frame(app_for_cb, time);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("Failed to request animation frame");
        closure.forget();
        app.borrow_mut().raf_handle = Some(handle);
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.torn_down {
                return;
            }

            let dt = if a.last_time > 0.0 {
                (((time - a.last_time) / 1000.0) as f32).min(0.1)
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(js_sys::Date::now(), dt);
            a.render();
            a.update_hud();
        }

        request_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beacon Guardian (native) starting...");
    log::info!("Run with `trunk serve` for the web version; native runs a headless demo");

    demo_game();
    demo_radar();
}

/// Headless scripted run: an auto-pilot chases good blocks for ten seconds
/// of simulated time on a synthetic 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
fn demo_game() {
    use beacon_guardian::consts::SIM_DT;
    use beacon_guardian::sim::{BlockKind, Direction, GameEvent, GamePhase, GameState, tick};
    use beacon_guardian::HighScore;

    let mut state = GameState::new(7);
    let mut high_score = HighScore::load();
    state.start();

    let mut now_ms = 0.0;
    for _ in 0..600 {
        now_ms += f64::from(SIM_DT) * 1000.0;

        // Steer toward the nearest good block, if any
        let target = state
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Good)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(state.beacon)
                    .total_cmp(&b.pos.distance_squared(state.beacon))
            })
            .map(|b| b.pos);
        if let Some(target) = target {
            let delta = target - state.beacon;
            let dir = if delta.x.abs() > delta.y.abs() {
                if delta.x > 0.0 { Direction::Right } else { Direction::Left }
            } else if delta.y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            };
            state.move_beacon(dir);
        }

        for event in tick(&mut state, now_ms, SIM_DT) {
            match event {
                GameEvent::Collected { score } => log::info!("collected ({} points)", score),
                GameEvent::LevelUp { level } => log::info!("level {}", level),
                GameEvent::GameOver { final_score } => {
                    log::info!("game over at {} points", final_score);
                    if high_score.record(final_score) {
                        high_score.save();
                    }
                }
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "demo run: score {} level {} ({} blocks live at end)",
        state.score,
        state.level,
        state.live_blocks()
    );
}

/// Seed a navigator, refresh it a few times, print the freshest records
#[cfg(not(target_arch = "wasm32"))]
fn demo_radar() {
    use beacon_guardian::consts::FEED_REFRESH_MS;
    use beacon_guardian::radar::{Navigator, SignalFilter};

    let mut now_ms = 1_000_000.0;
    let mut nav = Navigator::new(42, now_ms);
    for _ in 0..3 {
        now_ms += FEED_REFRESH_MS;
        nav.refresh(now_ms);
    }

    println!("radar feed: {} signals retained", nav.feed().len());
    println!(
        "  of which {} transactions",
        nav.feed().filtered(SignalFilter::Transaction).count()
    );
    for record in nav.records().iter().take(3) {
        println!(
            "  block {:016x}: {} txs, {} KB, fee {:.6}",
            record.id,
            record.tx_count,
            record.size_bytes / 1024,
            record.fee_sol
        );
    }
}
