//! Arcade Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{FocusEvent, HtmlCanvasElement, KeyboardEvent};

    use arcade_pong::platform::web::{CanvasSurface, canvas_and_context, fit_canvas, window_size};
    use arcade_pong::renderer::{Overlay, render};
    use arcade_pong::sim::{GameState, InputState, handle_key_down, handle_key_up};
    use arcade_pong::{FrameDriver, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        driver: FrameDriver,
        settings: Settings,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Run the updates due this frame, then redraw
        fn frame(&mut self, time: f64) {
            let report = self.driver.frame(&mut self.state, &self.input, time);
            for event in &report.events {
                log::debug!("{:?}", event);
            }

            let overlay = Overlay {
                fps: self.settings.show_fps.then(|| self.driver.fps()),
            };
            render(&mut self.surface, &self.state, &self.settings.theme, &overlay);
        }

        fn resize(&mut self, width: f32, height: f32) {
            fit_canvas(&self.canvas, width, height);
            self.state.resize(width, height);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Arcade Pong starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let (canvas, ctx) = canvas_and_context(&window)?;

        let (width, height) = window_size(&window);
        fit_canvas(&canvas, width, height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, width, height),
            input: InputState::new(),
            driver: FrameDriver::new(settings.timestep),
            settings,
            surface: CanvasSurface::new(ctx),
            canvas,
        }));

        setup_input_handlers(&window, game.clone());
        setup_resize_handler(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Arcade Pong running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: mark held, then menu transitions
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                let debounce = g.settings.debounce_key_repeat;
                handle_key_down(&mut g.state, &mut g.input, &event.key(), debounce);
            });
            listen(window, "keydown", closure);
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                handle_key_up(&mut game.borrow_mut().input, &event.key());
            });
            listen(window, "keyup", closure);
        }

        // Window blur: key-ups sent while unfocused never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                game.borrow_mut().input.clear();
                log::debug!("Window blurred; released held keys");
            });
            listen(window, "blur", closure);
        }
    }

    /// Register a window listener for the lifetime of the page
    fn listen<T: ?Sized + WasmClosure>(window: &web_sys::Window, event: &str, closure: Closure<T>) {
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to register {} listener: {:?}", event, e);
        }
        closure.forget();
    }

    fn setup_resize_handler(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = window_size(&window);
            game.borrow_mut().resize(width, height);
        });
        listen(window, "resize", closure);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; animation loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Arcade Pong failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{env, fs, path::PathBuf};

    use anyhow::{Context, Result, anyhow};

    use arcade_pong::renderer::{Overlay, RecordingSurface, render};
    use arcade_pong::sim::{GameEvent, GameMode, GameState, InputState, autopilot, handle_key_down};
    use arcade_pong::{FrameDriver, Settings};

    /// Simulated frame interval (60 Hz display)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEMO_WIDTH: f32 = 800.0;
    const DEMO_HEIGHT: f32 = 600.0;

    #[derive(Debug)]
    struct Cli {
        settings_path: Option<PathBuf>,
        seed: Option<u64>,
        max_frames: u64,
        dump_frame: bool,
    }

    impl Cli {
        fn parse() -> Result<Self> {
            let mut args = env::args().skip(1);

            let mut settings_path = None;
            let mut seed = None;
            let mut max_frames = 100_000u64;
            let mut dump_frame = false;

            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--settings" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--settings requires a file path"))?;
                        settings_path = Some(PathBuf::from(value));
                    }
                    "--seed" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--seed requires a number"))?;
                        seed = Some(
                            value
                                .parse::<u64>()
                                .with_context(|| format!("invalid --seed value: {value}"))?,
                        );
                    }
                    "--frames" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--frames requires a number"))?;
                        max_frames = value
                            .parse::<u64>()
                            .with_context(|| format!("invalid --frames value: {value}"))?;
                    }
                    "--dump-frame" => dump_frame = true,
                    other => return Err(anyhow!("unknown argument: {other}")),
                }
            }

            Ok(Self {
                settings_path,
                seed,
                max_frames,
                dump_frame,
            })
        }
    }

    fn load_settings(cli: &Cli) -> Result<Settings> {
        let Some(path) = &cli.settings_path else {
            return Ok(Settings::load());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        Settings::from_json(&json).with_context(|| format!("invalid settings {}", path.display()))
    }

    /// Headless attract mode: the autopilot plays one game against the computer
    pub fn run() -> Result<()> {
        let cli = Cli::parse()?;
        let settings = load_settings(&cli)?;
        let seed = cli.seed.or(settings.seed).unwrap_or(0);

        let mut state = GameState::new(seed, DEMO_WIDTH, DEMO_HEIGHT);
        let mut input = InputState::new();
        let mut driver = FrameDriver::new(settings.timestep);
        log::info!(
            "Arcade Pong (native) demo starting with seed {} ({:?})",
            seed,
            driver.mode()
        );

        handle_key_down(&mut state, &mut input, "Enter", settings.debounce_key_repeat);

        let mut paddle_hits = 0u32;
        let mut frames = 0u64;
        while state.mode == GameMode::Playing && frames < cli.max_frames {
            autopilot(&state, &mut input);
            frames += 1;
            let report = driver.frame(&mut state, &input, frames as f64 * FRAME_MS);
            paddle_hits += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PaddleHit(_)))
                .count() as u32;
        }

        if state.mode == GameMode::GameOver {
            log::info!(
                "{} won {}-{} after {} frames ({} paddle hits)",
                state.scores.leader().as_str(),
                state.scores.player,
                state.scores.computer,
                frames,
                paddle_hits
            );
        } else {
            log::warn!("Frame limit reached after {} frames", frames);
        }

        println!("{}", serde_json::to_string_pretty(&state)?);

        if cli.dump_frame {
            let mut surface = RecordingSurface::new();
            let overlay = Overlay {
                fps: settings.show_fps.then(|| driver.fps()),
            };
            render(&mut surface, &state, &settings.theme, &overlay);
            for command in &surface.commands {
                println!("{:?}", command);
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}
