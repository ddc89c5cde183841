//! Circle Shooter entry point
//!
//! Web: wires the canvas, pointer events, the paint loop and the spawn timer.
//! Native: runs a seeded headless session driven by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

    use circle_shooter::GameConfig;
    use circle_shooter::render::draw_list;
    use circle_shooter::sim::{GameState, TickInput, spawn_enemy, tick};

    /// Game instance shared by the paint loop, the spawn timer and input handlers
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        score_el: Option<Element>,
        /// `setInterval` handle of the spawn timer, cleared on game over
        spawn_handle: Option<i32>,
    }

    impl Game {
        fn update(&mut self) {
            tick(&mut self.state, &TickInput::default());
        }

        fn render(&self) {
            let config = &self.state.config;
            let ctx = &self.ctx;

            // Translucent clear leaves motion trails
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str(&config.trail_fill);
            ctx.fill_rect(
                0.0,
                0.0,
                config.canvas_width as f64,
                config.canvas_height as f64,
            );

            for circle in draw_list(&self.state) {
                ctx.set_global_alpha(circle.alpha as f64);
                ctx.begin_path();
                let _ = ctx.arc(
                    circle.center.x as f64,
                    circle.center.y as f64,
                    circle.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_fill_style_str(&circle.color.to_css());
                ctx.fill();
                ctx.close_path();
            }
            ctx.set_global_alpha(1.0);
        }

        fn update_hud(&mut self) {
            let events = self.state.take_events();
            if events.iter().any(|e| e.points() > 0) {
                if let Some(el) = &self.score_el {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }

        fn stop_spawner(&mut self) {
            if let Some(handle) = self.spawn_handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
                log::info!("Spawn timer cleared");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Circle Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::load();

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(config.canvas_width as u32);
        canvas.set_height(config.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let score_el = document.query_selector(".score__value").ok().flatten();

        let seed = js_sys::Date::now() as u64;
        let interval_ms = config.spawn_interval_ms;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(config, seed),
            ctx,
            score_el,
            spawn_handle: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        start_spawner(game.clone(), interval_ms);

        // Start game loop
        request_animation_frame(game);

        log::info!("Circle Shooter running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Track the pointer for aiming
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let aim = glam::Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().state.aim = Some(aim);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click fires one missile toward the tracked pointer
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let aim = glam::Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.state.aim = Some(aim);
                g.state.fire_at_aim();
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_spawner(game: Rc<RefCell<Game>>, interval_ms: u32) {
        let window = web_sys::window().expect("no window");
        let spawner_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            spawn_enemy(&mut spawner_game.borrow_mut().state);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => game.borrow_mut().spawn_handle = Some(handle),
            Err(err) => log::error!("Failed to start spawn timer: {:?}", err),
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let over = {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();

            if g.state.is_over() {
                g.stop_spawner();
                log::info!("Game over, final score {}", g.state.score);
            }
            g.state.is_over()
        };

        if !over {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use circle_shooter::GameConfig;
    use circle_shooter::consts::FRAME_MS;
    use circle_shooter::sim::{
        GamePhase, GameState, SessionStats, SpawnTimer, autopilot_input, spawn_enemy, tick,
    };

    /// Default cap so a lucky autopilot cannot run forever (10 minutes at 60 Hz)
    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;
    const FIRE_EVERY: u64 = 12;

    /// Headless Circle Shooter session driven by the autopilot
    #[derive(Parser, Debug)]
    #[command(name = "circle-shooter")]
    #[command(about = "Play one seeded Circle Shooter session headless and print a JSON summary")]
    pub struct Cli {
        /// JSON config overriding any subset of the defaults
        pub config: Option<PathBuf>,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Stop after this many frames even if the player is still alive
        #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
        pub frames: u64,
    }

    /// What the run prints when it ends
    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub frames: u64,
        pub score: u64,
        pub phase: GamePhase,
        pub stats: SessionStats,
    }

    /// Run one session: spawn timer and paint loop advanced in lockstep
    pub fn run_session(config: GameConfig, seed: u64, max_frames: u64) -> Summary {
        let mut timer = SpawnTimer::new(config.spawn_interval_ms);
        let mut state = GameState::new(config, seed);

        while !state.is_over() && state.frame < max_frames {
            advance_frame(&mut state, &mut timer);

            for event in state.take_events() {
                if event.points() > 0 {
                    log::debug!("Frame {}: {:?}, score {}", state.frame, event, state.score);
                }
            }

            if state.frame % 600 == 0 {
                log::info!(
                    "Frame {}: score {}, {} enemies, {} missiles, {} particles",
                    state.frame,
                    state.score,
                    state.enemies.len(),
                    state.missiles.len(),
                    state.particles.len()
                );
            }
        }

        Summary {
            seed,
            frames: state.frame,
            score: state.score,
            phase: state.phase,
            stats: state.stats,
        }
    }

    /// One paint: tick, then let the spawn timer fire for the elapsed time.
    /// The timer is cleared as soon as the session ends.
    fn advance_frame(state: &mut GameState, timer: &mut SpawnTimer) {
        let input = autopilot_input(state, FIRE_EVERY);
        tick(state, &input);

        if state.is_over() {
            timer.stop();
            return;
        }

        // The spawn timer fires between paints; new enemies move next frame
        for _ in 0..timer.advance(FRAME_MS) {
            spawn_enemy(state);
        }
    }

    pub fn main() {
        env_logger::init();
        log::info!("Circle Shooter (native, headless) starting...");

        let cli = Cli::parse();

        let config = match &cli.config {
            Some(path) => match GameConfig::load_from_path(path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("{}; using default config", err);
                    GameConfig::default()
                }
            },
            None => GameConfig::default(),
        };

        let seed = cli.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Seed: {}", seed);

        let summary = run_session(config, seed, cli.frames);
        log::info!(
            "Session ended after {} frames with score {}",
            summary.frames,
            summary.score
        );

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to serialize summary: {}", err),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use circle_shooter::render::Color;
        use circle_shooter::sim::Enemy;

        #[test]
        fn test_parse_cli() {
            let cli =
                Cli::try_parse_from(["circle-shooter", "cfg.json", "--seed", "7", "--frames", "100"])
                    .unwrap();
            assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
            assert_eq!(cli.seed, Some(7));
            assert_eq!(cli.frames, 100);

            let cli = Cli::try_parse_from(["circle-shooter"]).unwrap();
            assert!(cli.config.is_none());
            assert!(cli.seed.is_none());
            assert_eq!(cli.frames, DEFAULT_MAX_FRAMES);

            assert!(Cli::try_parse_from(["circle-shooter", "--seed"]).is_err());
            assert!(Cli::try_parse_from(["circle-shooter", "--seed", "x"]).is_err());
            assert!(Cli::try_parse_from(["circle-shooter", "--verbose"]).is_err());
        }

        #[test]
        fn test_spawn_timer_stops_at_game_over() {
            let config = GameConfig {
                spawn_interval_ms: 1,
                ..GameConfig::default()
            };
            let mut timer = SpawnTimer::new(config.spawn_interval_ms);
            let mut state = GameState::new(config, 3);
            let center = state.player.pos;
            state.enemies.push(Enemy::new(1, center, center, 1.0, 10.0, Color::WHITE));

            advance_frame(&mut state, &mut timer);

            assert_eq!(state.phase, GamePhase::GameOver);
            assert!(timer.is_stopped());
            assert_eq!(state.stats.enemies_spawned, 0);
            assert_eq!(timer.advance(FRAME_MS), 0);
        }

        #[test]
        fn test_run_session_is_reproducible() {
            let a = run_session(GameConfig::default(), 5, 900);
            let b = run_session(GameConfig::default(), 5, 900);
            assert_eq!(a.frames, b.frames);
            assert_eq!(a.score, b.score);
            assert_eq!(a.stats, b.stats);
            assert!(a.frames <= 900);
            assert!(a.stats.enemies_spawned > 0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
