//! Track Titans entry point
//!
//! Browser builds run the interactive game; native builds run one headless
//! autopilot run and record it on the leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use track_titans::audio::AudioManager;
    use track_titans::clock::{FixedStep, FpsCounter};
    use track_titans::consts::*;
    use track_titans::input::{HeldKeys, map_key};
    use track_titans::persistence::LocalStorage;
    use track_titans::platform;
    use track_titans::renderer::SdfRenderState;
    use track_titans::{Game, Screen};

    /// Everything the page needs between frames
    struct App {
        game: Game,
        held: HeldKeys,
        clock: FixedStep,
        fps: FpsCounter,
        audio: AudioManager,
        render_state: SdfRenderState,
        document: Document,
        last_time: f64,
        last_screen: Option<Screen>,
        /// Set once the loop must not be scheduled again
        stopped: bool,
    }

    impl App {
        /// Run simulation ticks, cues, rendering and DOM updates for one frame
        fn frame(&mut self, time: f64) -> anyhow::Result<()> {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            for _ in 0..self.clock.advance(dt) {
                self.game.update(&self.held)?;
            }
            self.audio.play_events(&self.game.drain_events());
            self.fps.record(time);

            self.render(time);
            self.update_dom();
            Ok(())
        }

        fn render(&mut self, time: f64) {
            let run = self.game.run();
            match self.render_state.render(run, self.game.settings(), time) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    self.render_state
                        .resize(self.render_state.size.0, self.render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Sync overlays and HUD text with the game
        fn update_dom(&mut self) {
            let doc = &self.document;
            let screen = self.game.screen();

            if self.last_screen != Some(screen) {
                log::debug!("Screen: {screen:?}");
                platform::show_screen(doc, screen);
                self.clock.reset();
                self.last_screen = Some(screen);
            }

            match screen {
                Screen::HighScores => {
                    platform::set_text(doc, "score-list", &self.game.high_scores().format_board());
                }
                Screen::NameEntry => {
                    platform::set_text(doc, "name-input", self.game.player_name());
                }
                Screen::GameOver => {
                    let score = self.game.run().map_or(0, |run| run.score);
                    platform::set_text(doc, "final-score", &score.to_string());
                    let rank = match self.game.last_rank() {
                        Some(rank) => format!("Rank #{rank}"),
                        None => "Not ranked".to_string(),
                    };
                    platform::set_text(doc, "final-rank", &rank);
                }
                _ => {}
            }

            if let Some(run) = self.game.run() {
                platform::set_text(doc, "hud-score", &run.score.to_string());
                platform::set_text(doc, "hud-lives", &run.lives.to_string());
            }
            let settings = self.game.settings();
            platform::set_visible(doc, "hud-fps", settings.show_fps);
            if settings.show_fps {
                platform::set_text(doc, "hud-fps", &format!("{} fps", self.fps.fps()));
            }
            platform::set_visible(doc, "hud-autopilot", self.game.autopilot());
            platform::set_visible(doc, "hud-muted", settings.muted);
        }

        fn key_down(&mut self, event: &KeyboardEvent) {
            let key = event.key();
            self.held.key_down(&key);

            let screen = self.game.screen();
            if event.repeat() && screen != Screen::NameEntry {
                return;
            }
            let Some(command) = map_key(screen, &key) else {
                return;
            };
            event.prevent_default();
            self.game.handle(command);
            self.audio.apply_settings(self.game.settings());

            if self.game.should_quit() {
                self.stopped = true;
                platform::show_message("farewell", "Thanks for playing Track Titans!");
                log::info!("Session ended");
            }
        }

        fn focus_lost(&mut self) {
            self.held.clear();
            self.game.pause_if_playing();
        }
    }

    pub async fn run() -> anyhow::Result<()> {
        log::info!("Track Titans starting...");

        let window = platform::window()?;
        let document = platform::document()?;

        // Hide loading indicator
        platform::set_visible(&document, "loading", false);

        let canvas = platform::require_canvas(&document, "canvas")?;
        platform::check_overlays(&document)?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| anyhow::anyhow!("failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow::anyhow!("no GPU adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(surface, &adapter, width, height).await?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(Box::new(LocalStorage), seed);
        let audio = AudioManager::new(game.settings());

        let app = Rc::new(RefCell::new(App {
            game,
            held: HeldKeys::default(),
            clock: FixedStep::new(),
            fps: FpsCounter::default(),
            audio,
            render_state,
            document: document.clone(),
            last_time: 0.0,
            last_screen: None,
            stopped: false,
        }));

        setup_keyboard(&window, app.clone());
        setup_auto_pause(&window, &document, app.clone());

        request_animation_frame(app);

        log::info!("Track Titans running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().key_down(&event);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().held.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, app: Rc<RefCell<App>>) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().focus_lost();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().focus_lost();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.stopped {
                return;
            }
            if let Err(e) = a.frame(time) {
                a.stopped = true;
                log::error!("Fatal: {e:#}");
                platform::show_message("fatal", &format!("Something went wrong: {e:#}"));
                return;
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:#}");
        track_titans::platform::show_message("fatal", &format!("Failed to start: {e:#}"));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated time after which a headless run gives up (ten minutes)
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_TICKS: u64 = track_titans::consts::TICK_RATE as u64 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use track_titans::audio::AudioManager;
    use track_titans::input::HeldKeys;
    use track_titans::persistence::FileStorage;
    use track_titans::sim::VehicleKind;
    use track_titans::{Command, Game, Screen};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Track Titans (native) starting...");
    log::info!("Interactive play needs the web build - running one autopilot run instead");

    let storage = FileStorage::current_dir()?;
    let mut game = Game::new(Box::new(storage), rand::random());
    let audio = AudioManager::new(game.settings());

    game.handle(Command::Begin);
    for c in "Autopilot".chars() {
        game.handle(Command::Type(c));
    }
    game.handle(Command::Confirm);
    game.handle(Command::SelectVehicle(VehicleKind::default()));
    game.handle(Command::ToggleAutopilot);

    let held = HeldKeys::default();
    let mut ticks = 0;
    while game.screen() != Screen::GameOver && ticks < MAX_HEADLESS_TICKS {
        game.update(&held)?;
        audio.play_events(&game.drain_events());
        ticks += 1;
    }

    if game.screen() != Screen::GameOver {
        log::warn!("Autopilot still alive after {ticks} ticks, run not recorded");
        return Ok(());
    }

    let score = game.run().map_or(0, |run| run.score);
    println!("\nRun over after {ticks} ticks: score {score}");
    match game.last_rank() {
        Some(rank) => println!("Ranked #{rank}"),
        None => println!("Not ranked"),
    }
    println!("\n{}", game.high_scores().format_board());

    game.handle(Command::Quit);
    Ok(())
}
