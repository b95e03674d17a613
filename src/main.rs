//! SSU-RUN entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use ssu_run::Tuning;
    use ssu_run::audio::AudioManager;
    use ssu_run::consts::*;
    use ssu_run::sim::{
        Aabb, EntityKind, FrameView, GamePhase, GameState, LevelDefinition, Posture, TickInput,
        TickStatus, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        status: TickStatus,
    }

    impl Game {
        fn new(state: GameState, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state,
                audio: AudioManager::new(),
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                status: TickStatus::Loading,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                self.status = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Jump is edge-triggered; down stays until keyup
                self.input.jump = false;

                let events = self.state.drain_events();
                self.audio.play_events(&events);
            }
        }

        fn restart(&mut self) {
            self.state.reset();
            self.input = TickInput::default();
            self.accumulator = 0.0;
            log::info!("Game restarted");
        }

        /// Draw the current frame with placeholder shapes
        fn render(&mut self) {
            let view = self.state.frame_view();
            let ctx = &self.ctx;

            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#8ecae6");
            ctx.fill_rect(0.0, 0.0, VIEWPORT_WIDTH as f64, VIEWPORT_HEIGHT as f64);

            if self.status == TickStatus::Loading {
                ctx.set_fill_style_str("#023047");
                ctx.set_font("32px sans-serif");
                let _ = ctx.fill_text("Loading...", 320.0, 300.0);
                return;
            }

            for entity in &view.entities {
                let color = match entity.kind {
                    EntityKind::Platform => "#6a994e",
                    EntityKind::Obstacle(_) => "#bc4749",
                    EntityKind::PowerUp => "#ffb703",
                    EntityKind::HealthRecovery => "#f28482",
                };
                fill_box(ctx, color, &entity.display);
            }

            if let Some(flag) = view.flag {
                fill_box(ctx, "#ffffff", &flag);
            }

            if let Some(pursuer) = &view.pursuer {
                let color = if pursuer.running { "#540b0e" } else { "#9e2a2b" };
                let body = Aabb::new(pursuer.x, GROUND_Y - 150.0, 150.0, 150.0);
                fill_box(ctx, color, &body);
            }

            let player_color = match view.player.posture {
                Posture::Normal => "#219ebc",
                Posture::Giant => "#fb8500",
                Posture::Sliding => "#126782",
            };
            fill_box(ctx, player_color, &view.player.display);

            draw_hud(ctx, &view);
        }
    }

    fn fill_box(ctx: &CanvasRenderingContext2d, color: &str, b: &Aabb) {
        ctx.set_fill_style_str(color);
        ctx.fill_rect(
            b.left() as f64,
            b.top() as f64,
            b.size.x as f64,
            b.size.y as f64,
        );
    }

    fn draw_hud(ctx: &CanvasRenderingContext2d, view: &FrameView) {
        ctx.set_fill_style_str("#023047");
        ctx.set_font("24px sans-serif");
        let _ = ctx.fill_text(&format!("Score: {}", view.score), 20.0, 40.0);

        if let Some(delta) = view.score_delta {
            ctx.set_global_alpha(delta.opacity as f64);
            let _ = ctx.fill_text(&format!("+{}", delta.value), 180.0, 40.0);
            ctx.set_global_alpha(1.0);
        }

        // Health bar
        let fraction = if view.max_health > 0 {
            view.health as f64 / view.max_health as f64
        } else {
            0.0
        };
        ctx.set_fill_style_str("#555555");
        ctx.fill_rect(560.0, 20.0, 200.0, 20.0);
        ctx.set_fill_style_str("#e63946");
        ctx.fill_rect(560.0, 20.0, 200.0 * fraction, 20.0);

        let banner = match view.phase {
            GamePhase::Celebrating { .. } => Some("Level clear!"),
            GamePhase::Won => Some("You win! Press Enter"),
            GamePhase::Lost(_) => Some("Game over. Press Enter"),
            GamePhase::Loading | GamePhase::Playing => None,
        };
        if let Some(text) = banner {
            ctx.set_font("40px sans-serif");
            let _ = ctx.fill_text(text, 220.0, 250.0);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("SSU-RUN starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(VIEWPORT_WIDTH as u32);
        canvas.set_height(VIEWPORT_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context query failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(LevelDefinition::level_one(), Tuning::default(), seed)
            .expect("built-in level is valid");
        let game = Rc::new(RefCell::new(Game::new(state, ctx)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    "ArrowUp" | " " => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.input.jump = true;
                        }
                    }
                    "ArrowDown" => {
                        event.prevent_default();
                        g.input.down_held = true;
                    }
                    "Enter" if g.state.phase.is_finished() => g.restart(),
                    "m" | "M" => g.audio.toggle_muted(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "ArrowDown" {
                    game.borrow_mut().input.down_held = false;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("SSU-RUN (native) starting...");
    log::info!("Native mode runs the level headless - build for wasm32 to play");

    let level_path = std::env::args().nth(1);
    let tuning_path = std::env::args().nth(2);
    match headless::run(level_path.as_deref(), tuning_path.as_deref()) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use ssu_run::Tuning;
    use ssu_run::sim::{GameState, LevelDefinition, TickInput, TickStatus, tick};

    /// Two minutes of simulated time
    const MAX_TICKS: u32 = 60 * 120;

    /// Play a level with no input and report how it ended
    pub fn run(
        level_path: Option<&str>,
        tuning_path: Option<&str>,
    ) -> Result<String, Box<dyn Error>> {
        let level = match level_path {
            Some(path) => LevelDefinition::from_json(&std::fs::read_to_string(path)?)?,
            None => LevelDefinition::level_one(),
        };
        let tuning = match tuning_path {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let mut state = GameState::new(level, tuning, 0x5eed)?;
        let mut status = TickStatus::Loading;
        let mut ticks = 0;
        while ticks < MAX_TICKS && !state.phase.is_finished() {
            status = tick(&mut state, &TickInput::default());
            for event in state.drain_events() {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }
            ticks += 1;
        }

        Ok(format!(
            "{:?} after {} ticks: score {}, health {}/{}, scroll {}",
            status,
            ticks,
            state.score.score(),
            state.health.current(),
            state.health.max(),
            state.world.scroll_offset()
        ))
    }
}
