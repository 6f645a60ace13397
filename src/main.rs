//! Vault Heist entry point
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
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlSelectElement, KeyboardEvent};

    use vault_heist::audio::AudioManager;
    use vault_heist::persistence::LocalStorageStore;
    use vault_heist::platform::{Clock, KeyState, SystemClock};
    use vault_heist::renderer::CanvasRenderer;
    use vault_heist::{Command, Game, Settings};

    /// Page-level state shared by the event closures
    struct App {
        game: Game<AudioManager, LocalStorageStore>,
        renderer: CanvasRenderer,
        keys: KeyState,
        clock: SystemClock,
        settings: Settings,
        /// Whether a requestAnimationFrame callback is pending
        loop_active: bool,
    }

    impl App {
        /// Apply a command and refresh the page around it
        fn command(&mut self, command: Command) -> Result<(), vault_heist::ConfigError> {
            let now = self.clock.now_ms();
            let result = self.game.handle(command, now);
            self.game.render(&mut self.renderer);
            self.update_controls();
            result
        }

        /// Reset button is only usable once a run has finished
        fn update_controls(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(btn) = document
                .get_element_by_id("resetBtn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!self.game.reset_available());
            }
        }

        /// Show this frame's notifications in the message banner
        fn show_notifications(&mut self) {
            let notes = self.game.drain_notifications();
            if notes.is_empty() {
                return;
            }
            for note in &notes {
                log::info!("{}", note.message());
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("message") {
                let text: Vec<String> = notes.iter().map(|n| n.message()).collect();
                el.set_text_content(Some(&text.join(" ")));
                let ended = notes.iter().any(|n| n.is_terminal());
                let _ = el.set_attribute("class", if ended { "ended" } else { "" });
            }
        }

        fn clear_message(&self) {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("message"))
            {
                el.set_text_content(None);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Vault Heist starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = CanvasRenderer::new(&canvas).expect("no 2d context");
        let arena = Vec2::new(canvas.width() as f32, canvas.height() as f32);

        let settings = Settings::default();
        let audio = AudioManager::new(&settings);
        let game = Game::new(settings.difficulty, arena, audio, LocalStorageStore);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            keys: KeyState::new(),
            clock: SystemClock,
            settings,
            loop_active: false,
        }));

        {
            let mut a = app.borrow_mut();
            let App { game, renderer, .. } = &mut *a;
            game.render(renderer);
            a.update_controls();
        }

        setup_input_handlers(app.clone());
        setup_buttons(app);

        log::info!("Vault Heist ready - press Play");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if a.keys.press(&event.key()) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                }
                // Browsers only allow audio after a gesture
                a.game.audio().resume();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().keys.release(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (keyup events are lost while unfocused)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Play
        if let Some(btn) = document.get_element_by_id("playBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let start_loop = {
                    let mut a = app.borrow_mut();
                    a.game.audio().resume();
                    let _ = a.command(Command::Play);
                    a.clear_message();
                    let start = a.game.state.is_running() && !a.loop_active;
                    if start {
                        a.loop_active = true;
                    }
                    start
                };
                if start_loop {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset
        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let _ = a.command(Command::Reset);
                a.clear_message();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute
        if let Some(btn) = document
            .get_element_by_id("muteBtn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            let app = app.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let muted = a.settings.toggle_mute();
                let App { game, settings, .. } = &mut *a;
                game.apply_settings(settings);
                btn_clone.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Difficulty select (applies at the next reset)
        if let Some(select) = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                let id = select_clone.value();
                if a.command(Command::SelectDifficulty(id)).is_err() {
                    // Put the control back on the selection still in force
                    select_clone.set_value(a.game.state.difficulty.as_str());
                }
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_running = {
            let mut a = app.borrow_mut();
            let now = a.clock.now_ms();
            let App {
                game,
                renderer,
                keys,
                ..
            } = &mut *a;
            let keep_running = game.frame(&*keys, renderer, now);

            a.show_notifications();
            if !keep_running {
                a.loop_active = false;
                a.update_controls();
            }
            keep_running
        };

        if keep_running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Vault Heist (native) starting...");
    log::info!("The playable version runs in the browser - build for wasm32 with `trunk serve`");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session that exercises the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use vault_heist::audio::SilentAudio;
    use vault_heist::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use vault_heist::persistence::MemoryStore;
    use vault_heist::platform::{Clock, FixedClock};
    use vault_heist::renderer::{Frame, Renderer};
    use vault_heist::sim::{GameState, TickInput};
    use vault_heist::{Difficulty, Game};

    /// ~60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 120;

    /// Logs the HUD once a second
    #[derive(Default)]
    struct LogRenderer {
        frames: u32,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &Frame) {
            if self.frames % 60 == 0 {
                let hud: Vec<&str> = frame.labels.iter().map(|l| l.text.as_str()).collect();
                log::debug!("{}", hud.join(" | "));
            }
            self.frames += 1;
        }
    }

    /// Head straight for the nearest vault still standing
    fn steer(state: &GameState) -> TickInput {
        let player = state.player.pos + state.player.size / 2.0;
        let Some(target) = state
            .vaults
            .iter()
            .filter(|v| !v.stolen)
            .map(|v| v.pos + v.size / 2.0)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
        else {
            return TickInput::default();
        };

        let delta = target - player;
        let dead_zone = state.player.speed;
        TickInput {
            up: delta.y < -dead_zone,
            down: delta.y > dead_zone,
            left: delta.x < -dead_zone,
            right: delta.x > dead_zone,
        }
    }

    pub fn run() {
        let mut clock = FixedClock::new(0.0);
        let mut renderer = LogRenderer::default();

        for difficulty in Difficulty::ALL {
            let mut game = Game::new(
                difficulty,
                Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
                SilentAudio,
                MemoryStore::new(),
            );
            game.play(clock.now_ms());

            let mut frames = 0;
            while frames < MAX_FRAMES {
                clock.advance(FRAME_MS);
                let input = steer(&game.state);
                if !game.frame(&input, &mut renderer, clock.now_ms()) {
                    break;
                }
                frames += 1;
            }

            for note in game.drain_notifications() {
                log::info!("[{}] {}", difficulty, note.message());
            }
            log::info!(
                "[{}] finished in {:?} after {} frames, score {}",
                difficulty,
                game.state.outcome,
                frames,
                game.state.score
            );
        }
    }
}
