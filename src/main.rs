//! Skyhop entry point
//!
//! Browser: two stacked canvases driven by requestAnimationFrame.
//! Native: a headless scripted run for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use skyhop::platform::assets::web::preload_images;
    use skyhop::platform::{AssetCache, REQUIRED_ASSETS};
    use skyhop::renderer::CanvasSurface;
    use skyhop::{Game, GameConfig};

    /// One stacked canvas and its 2D context
    struct Layer {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Layer {
        fn from_id(document: &Document, id: &str) -> Result<Self, JsValue> {
            let canvas: HtmlCanvasElement = document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("no #{id} canvas")))?
                .dyn_into()?;
            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")?
                .ok_or("2d context unavailable")?
                .dyn_into()?;
            Ok(Self { canvas, ctx })
        }

        /// Match the backing store to the displayed size
        fn fit(&self) -> (f32, f32) {
            let width = self.canvas.client_width().max(1) as u32;
            let height = self.canvas.client_height().max(1) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            (width as f32, height as f32)
        }
    }

    /// A DOM listener kept alive until teardown
    struct Listener {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn remove(&self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }

    fn listen<E: JsCast + 'static>(
        target: &EventTarget,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<Listener, JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            event,
            closure,
        })
    }

    struct App {
        game: Game,
        images: AssetCache<HtmlImageElement>,
        fg: Layer,
        bg: Layer,
        listeners: Vec<Listener>,
        quit: bool,
    }

    impl App {
        fn resize(&mut self) {
            let (width, height) = self.fg.fit();
            self.bg.fit();
            self.game.resize(width, height);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Skyhop starting...");
        if let Err(e) = start().await {
            log::error!("Skyhop failed to start: {:?}", e);
        }
    }

    async fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let bg = Layer::from_id(&document, "background")?;
        let fg = Layer::from_id(&document, "foreground")?;

        let mut images = AssetCache::new();
        if let Err(e) = preload_images(&mut images, REQUIRED_ASSETS).await {
            return Err(JsValue::from_str(&e.to_string()));
        }

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(GameConfig::default(), seed);
        log::info!("Game initialized with seed: {}", seed);

        game.start(&images)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app = Rc::new(RefCell::new(App {
            game,
            images,
            fg,
            bg,
            listeners: Vec::new(),
            quit: false,
        }));
        app.borrow_mut().resize();

        let listeners = setup_listeners(&app)?;
        app.borrow_mut().listeners = listeners;

        request_animation_frame(app);
        log::info!("Skyhop running!");
        Ok(())
    }

    fn setup_listeners(app: &Rc<RefCell<App>>) -> Result<Vec<Listener>, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas: EventTarget = app.borrow().fg.canvas.clone().into();
        let mut listeners = Vec::new();

        // Mouse move
        {
            let app = app.clone();
            listeners.push(listen(&canvas, "mousemove", move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .input_mut()
                    .pointer_move(event.offset_x() as f32, event.offset_y() as f32);
            })?);
        }

        // Mouse down (jump)
        {
            let app = app.clone();
            listeners.push(listen(&canvas, "mousedown", move |_event: MouseEvent| {
                app.borrow_mut().game.input_mut().pointer_down();
            })?);
        }

        // Touch move / touch start share the position handling
        for (event_name, is_down) in [("touchmove", false), ("touchstart", true)] {
            let app = app.clone();
            listeners.push(listen(&canvas, event_name, move |event: TouchEvent| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let rect = app.fg.canvas.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    app.game.input_mut().pointer_move(x, y);
                }
                if is_down {
                    app.game.input_mut().pointer_down();
                }
            })?);
        }

        // Keyboard
        {
            let app = app.clone();
            listeners.push(listen(&window, "keydown", move |event: KeyboardEvent| {
                app.borrow_mut().game.input_mut().key_down(&event.key());
            })?);
        }
        {
            let app = app.clone();
            listeners.push(listen(&window, "keyup", move |_event: KeyboardEvent| {
                app.borrow_mut().game.input_mut().key_up();
            })?);
        }

        // Resize
        {
            let app = app.clone();
            listeners.push(listen(&window, "resize", move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            })?);
        }

        // Page going away: the loop tears down on its next frame
        {
            let app = app.clone();
            listeners.push(listen(&window, "pagehide", move |_event: web_sys::Event| {
                app.borrow_mut().quit = true;
            })?);
        }

        Ok(listeners)
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
            let mut guard = app.borrow_mut();
            if guard.quit {
                teardown(guard);
                return;
            }

            let app = &mut *guard;
            let mut fg = CanvasSurface::new(&app.fg.ctx, &app.images);
            let mut bg = CanvasSurface::new(&app.bg.ctx, &app.images);
            if let Some(report) = app.game.frame(time, &mut fg, &mut bg) {
                if report.planet_hits > 0 {
                    log::debug!("Hit {} planet(s)", report.planet_hits);
                }
            }
        }

        request_animation_frame(app);
    }

    /// End the session and unregister every listener
    fn teardown(mut app: std::cell::RefMut<'_, App>) {
        app.game.end();
        let listeners = std::mem::take(&mut app.listeners);
        drop(app);
        for listener in &listeners {
            listener.remove();
        }
        log::info!("Skyhop stopped, {} listeners removed", listeners.len());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyhop (native) starting...");
    log::info!("Native mode runs a headless scripted session - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => match skyhop::GameConfig::load(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => skyhop::GameConfig::default(),
    };

    if let Err(e) = headless::run(config, 42, 60.0) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against recording surfaces
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyhop::error::AssetError;
    use skyhop::platform::{AssetCache, REQUIRED_ASSETS};
    use skyhop::renderer::RecordingSurface;
    use skyhop::sim::height_percent;
    use skyhop::{Game, GameConfig};

    /// Run `seconds` of play with a pointer sweeping back and forth and a
    /// jump whenever the hero lands
    pub fn run(config: GameConfig, seed: u64, seconds: f64) -> Result<(), AssetError> {
        let mut assets = AssetCache::new();
        assets.preload_with(REQUIRED_ASSETS, |path| Ok(path.to_string()))?;

        let mut game = Game::new(config, seed);
        game.start(&assets)?;

        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        // 144 Hz display: most callbacks are gated out
        let step = 1000.0 / 144.0;

        let (mut ticks, mut jumps, mut hits, mut spawns) = (0u64, 0u32, 0u32, 0u32);
        let mut best_height = 0.0f32;
        let mut now = 0.0;
        while now <= seconds * 1000.0 {
            let width = game.config.canvas.width;
            let sweep = ((now / 2000.0).sin() as f32 * 0.5 + 0.5) * width;
            let y = game.config.ground;
            game.input_mut().pointer_move(sweep, y);
            if game.state.player.on_ground(game.config.ground) {
                game.input_mut().pointer_down();
            }

            if let Some(report) = game.frame(now, &mut fg, &mut bg) {
                ticks += 1;
                jumps += report.jumped as u32;
                hits += report.planet_hits;
                spawns += report.spawned.is_some() as u32;
                best_height = best_height
                    .max(height_percent(game.state.player.body.pos.y, game.config.ground));
            }
            fg.clear_log();
            bg.clear_log();
            now += step;
        }

        game.end();
        log::info!(
            "{} ticks, {} jumps, {} planets spawned, {} bounces, best altitude {:.0}%",
            ticks,
            jumps,
            spawns,
            hits,
            best_height
        );
        Ok(())
    }
}
