//! Street Hoops entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent, TouchEvent};

    use street_hoops::consts::*;
    use street_hoops::remark::coach_comment;
    use street_hoops::sim::{
        ChangeTracker, GameEvent, GamePhase, GameState, Hud, PointerEvent, RoundSummary, Scene,
        TickInput, Viewport, tick,
    };
    use street_hoops::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        tracker: ChangeTracker,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        viewport: Viewport,
        /// setInterval handle of the running countdown and its callback
        countdown: Option<(i32, Closure<dyn FnMut()>)>,
        /// Pending requestAnimationFrame handle; `None` once the loop has stopped
        frame: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, viewport: Viewport) -> Self {
            let mut state = GameState::new(Tuning::default(), viewport);
            state.reduced_motion = settings.reduced_motion;
            Self {
                state,
                settings,
                tracker: ChangeTracker::new(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                viewport,
                countdown: None,
                frame: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, self.viewport);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Pointer events are consumed by the first tick that sees them
                self.input.clear();
            }
            // Drop backlog we could not simulate
            self.accumulator = self.accumulator.min(SIM_DT);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Push changed values to the page
        fn render(&mut self, document: &Document) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::Scored { score } => {
                        log::debug!("Score pop at {}", score);
                        restart_animation(document, "hud-score", "pop");
                    }
                    GameEvent::RoundStarted => self.tracker.invalidate(),
                    _ => {}
                }
            }

            if let Some(hud) = self.tracker.hud(&self.state) {
                draw_hud(document, &hud);
            }
            if let Some(scene) = self.tracker.scene(&self.state) {
                draw_scene(document, &scene, self.settings.show_swipe_indicator);
            }
            if self.settings.show_fps {
                set_text(document, "hud-fps", &self.fps.to_string());
            }
        }

        /// Clear the interval and release its callback
        fn stop_countdown(&mut self) {
            if let Some((handle, _callback)) = self.countdown.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Street Hoops starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let viewport = read_viewport(&window);
        let game = Rc::new(RefCell::new(Game::new(settings, viewport)));
        log::info!("Game initialized at {}x{}", viewport.width, viewport.height);

        if !game.borrow().settings.show_fps {
            show(&document, "hud-fps-item", false);
        }
        show_screen(&document, GamePhase::Menu);

        setup_input_handlers(&document, game.clone());
        setup_resize_handler(game.clone());
        setup_buttons(&document, game);

        log::info!("Street Hoops running!");
    }

    fn read_viewport(window: &web_sys::Window) -> Viewport {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32)
    }

    fn start_round(game: &Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let loop_stopped = {
            let mut g = game.borrow_mut();
            g.stop_countdown();
            g.state.start_round();
            g.input.clear();
            g.tracker.invalidate();
            g.accumulator = 0.0;
            g.last_time = 0.0;
            g.frame.is_none()
        };
        show_screen(&document, GamePhase::Playing);
        start_countdown(game);
        if loop_stopped {
            request_animation_frame(game.clone());
        }
    }

    fn start_countdown(game: &Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game_for_tick = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let summary = {
                let mut g = game_for_tick.borrow_mut();
                let summary = g.state.countdown_second();
                if summary.is_some() {
                    g.stop_countdown();
                }
                summary
            };
            if let Some(summary) = summary {
                finish_round(game_for_tick.clone(), summary);
            }
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .ok();
        game.borrow_mut().countdown = handle.map(|handle| (handle, closure));
    }

    fn finish_round(game: Rc<RefCell<Game>>, summary: RoundSummary) {
        let document = web_sys::window().unwrap().document().unwrap();

        show_screen(&document, GamePhase::GameOver);
        set_text(&document, "final-score", &summary.score.to_string());
        set_text(&document, "coach-comment", "");
        show(&document, "coach-loading", true);

        let (remark, round_seconds) = {
            let g = game.borrow();
            (g.settings.remark.clone(), g.state.tuning.round_seconds)
        };
        wasm_bindgen_futures::spawn_local(async move {
            let comment = coach_comment(&remark, summary, round_seconds).await;

            // A new round may have started while we waited
            if game.borrow().state.phase != GamePhase::GameOver {
                return;
            }
            let document = web_sys::window().unwrap().document().unwrap();
            show(&document, "coach-loading", false);
            set_text(&document, "coach-comment", &format!("\u{201c}{}\u{201d}", comment));
        });
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(court) = document.get_element_by_id("court") else {
            log::error!("No #court element, input disabled");
            return;
        };

        // Mouse
        for (name, kind) in [("mousedown", 0u8), ("mousemove", 1), ("mouseup", 2), ("mouseleave", 3)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let p = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let pointer = match kind {
                    0 => PointerEvent::Down(p),
                    1 => PointerEvent::Move(p),
                    2 => PointerEvent::Up,
                    _ => PointerEvent::Cancel,
                };
                game.borrow_mut().input.pointer.push(pointer);
            });
            let _ = court.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (first finger only)
        for (name, kind) in [("touchstart", 0u8), ("touchmove", 1), ("touchend", 2), ("touchcancel", 3)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let point = event
                    .touches()
                    .get(0)
                    .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32));
                let pointer = match (kind, point) {
                    (0, Some(p)) => PointerEvent::Down(p),
                    (1, Some(p)) => PointerEvent::Move(p),
                    (2, _) => PointerEvent::Up,
                    (3, _) => PointerEvent::Cancel,
                    _ => return,
                };
                game.borrow_mut().input.pointer.push(pointer);
            });
            let _ = court.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            // Applied by the next tick
            game.borrow_mut().viewport = read_viewport(&window_clone);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["play-btn", "again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_round(&game);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game_for_frame = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_for_frame, time);
        });
        let handle = window.request_animation_frame(closure.as_ref().unchecked_ref()).ok();
        closure.forget();
        game.borrow_mut().frame = handle;
    }

    /// One frame; re-arms itself only while a round is running
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let playing = {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();
            g.frame = None;

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            // Flush the final state before the loop stops
            g.render(&document);
            g.state.is_playing()
        };

        if playing {
            request_animation_frame(game);
        } else {
            log::debug!("Frame loop stopped");
        }
    }

    // --- DOM helpers ---

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(document: &Document, id: &str, property: &str, value: &str) {
        if let Some(el) = element(document, id) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn restart_animation(document: &Document, id: &str, class: &str) {
        if let Some(el) = element(document, id) {
            let _ = el.class_list().remove_1(class);
            // Force reflow so the animation replays
            let _ = el.offset_width();
            let _ = el.class_list().add_1(class);
        }
    }

    fn show_screen(document: &Document, phase: GamePhase) {
        show(document, "menu", phase == GamePhase::Menu);
        show(document, "court", phase == GamePhase::Playing);
        show(document, "results", phase == GamePhase::GameOver);
    }

    fn draw_hud(document: &Document, hud: &Hud) {
        set_text(document, "hud-score", &hud.score.to_string());
        set_text(document, "hud-time", &hud.time_left.to_string());
        if let Some(el) = document.get_element_by_id("hud-time") {
            let _ = el.class_list().toggle_with_force("hurry", hud.hurry);
        }
    }

    fn draw_scene(document: &Document, scene: &Scene, show_swipe: bool) {
        let r = scene.ball_radius;
        let ball_size = format!("{}px", r * 2);
        set_style(document, "ball", "width", &ball_size);
        set_style(document, "ball", "height", &ball_size);
        set_style(document, "ball", "left", &format!("{}px", scene.ball_x - r));
        set_style(document, "ball", "top", &format!("{}px", scene.ball_y - r));
        set_style(
            document,
            "ball",
            "transform",
            &format!(
                "rotate({}deg) scale({})",
                scene.ball_rotation,
                if scene.dragging { 0.98 } else { 1.0 }
            ),
        );

        let hoop_left = format!("{}px", scene.hoop_x - scene.hoop_radius);
        let hoop_top = format!("{}px", scene.hoop_y);
        let hoop_width = format!("{}px", scene.hoop_radius * 2);
        for id in ["hoop-back", "hoop-front"] {
            set_style(document, id, "left", &hoop_left);
            set_style(document, id, "top", &hoop_top);
            set_style(document, id, "width", &hoop_width);
        }
        set_style(document, "net", "transform", &format!("scaleY({})", scene.net_scale));

        match scene.swipe {
            Some((start, current)) if show_swipe => {
                if let Some(line) = document.get_element_by_id("swipe-line") {
                    let _ = line.set_attribute("x1", &start.x.to_string());
                    let _ = line.set_attribute("y1", &start.y.to_string());
                    let _ = line.set_attribute("x2", &current.x.to_string());
                    let _ = line.set_attribute("y2", &current.y.to_string());
                }
                show(document, "swipe", true);
            }
            _ => show(document, "swipe", false),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Scripted round for running without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use street_hoops::consts::SIM_DT;
    use street_hoops::sim::{
        GameEvent, GameState, PointerEvent, RoundSummary, TickInput, Viewport, tick,
    };
    use street_hoops::Tuning;

    /// Environment variable naming a JSON tuning override file
    const TUNING_ENV: &str = "STREET_HOOPS_TUNING";

    pub fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Tuning::default();
        };
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Swipe for the `n`th shot: straight up, nudged sideways a little per shot
    fn scripted_swipe(n: u32, rest: Vec2) -> [PointerEvent; 3] {
        let wobble = (n % 5) as f32 - 2.0;
        [
            PointerEvent::Down(rest),
            PointerEvent::Move(rest + Vec2::new(wobble * 4.0, -80.0)),
            PointerEvent::Up,
        ]
    }

    /// Play one full round, throwing whenever the ball is back in hand
    pub fn play_round(tuning: Tuning, viewport: Viewport, reduced_motion: bool) -> RoundSummary {
        let ticks_per_second = (1.0 / SIM_DT).round() as u32;
        let mut state = GameState::new(tuning, viewport);
        state.reduced_motion = reduced_motion;
        state.start_round();

        let mut input = TickInput::default();
        let mut ticks = 0u32;
        loop {
            if state.ball.is_idle() {
                let n = state.session.shots_taken;
                input.pointer.extend(scripted_swipe(n, state.ball.pos));
            }
            tick(&mut state, &input, viewport);
            input.clear();

            for event in state.take_events() {
                match event {
                    GameEvent::Scored { score } => log::info!("Swish! ({})", score),
                    GameEvent::RimHit => log::debug!("Clank"),
                    _ => {}
                }
            }

            ticks += 1;
            if ticks % ticks_per_second == 0 {
                if let Some(summary) = state.countdown_second() {
                    return summary;
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use street_hoops::Settings;
    use street_hoops::remark::coach_comment;
    use street_hoops::sim::Viewport;

    env_logger::init();
    log::info!("Street Hoops (native) starting...");
    log::info!("Native mode plays a scripted round - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let tuning = headless::load_tuning();
    let round_seconds = tuning.round_seconds;
    let summary = headless::play_round(tuning, Viewport::default(), settings.reduced_motion);

    println!(
        "Round over: {} points, {} shots ({}%)",
        summary.score,
        summary.shots_taken,
        summary.accuracy_percent()
    );

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Could not start async runtime: {}", e);
            return;
        }
    };
    let comment = runtime.block_on(coach_comment(&settings.remark, summary, round_seconds));
    println!("Coach: \"{}\"", comment);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
