use thiserror::Error;
use three_d::{
    FrameInput, FrameOutput,
    window::{Window, WindowError, WindowSettings},
};

use self::cfg::Config;
use self::gui::Hud;
use self::keybinds::KeyState;
use self::projection::Projection;
use self::raster::gl_backend::GlBackend;
use self::scene::Scene;

mod assets;
mod asteroids;
mod body;
mod catalog;
mod cfg;
mod control;
mod gui;
mod keybinds;
mod kinematics;
mod logging;
mod projection;
mod raster;
mod scene;

fn main() {
    let (config, config_error) = Config::load();
    logging::init_logging(&config.log.level);

    match (config_error, Config::path()) {
        (Some(error), _) => tracing::warn!(%error, "using default configuration"),
        (None, Some(path)) => tracing::info!(path = %path.display(), "configuration loaded"),
        (None, None) => tracing::info!("using default configuration"),
    }

    match Program::new(config) {
        Ok(program) => program.run(),
        Err(error) => {
            tracing::error!(%error, "could not start");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum InitError {
    #[error("could not create the window: {0}")]
    Window(#[from] WindowError),
}

pub(crate) struct Program {
    window: Option<Window>,
    scene: Scene,
    backend: GlBackend,
    projection: Projection,
    keys: KeyState,
    hud: Hud,
}

impl Program {
    fn new_window(config: &Config) -> Result<Window, InitError> {
        Ok(Window::new(WindowSettings {
            title: config.window.title.clone(),
            min_size: (64, 64),
            initial_size: Some((config.window.width, config.window.height)),
            ..Default::default()
        })?)
    }

    pub(crate) fn new(config: Config) -> Result<Self, InitError> {
        let window = Self::new_window(&config)?;
        let context = window.gl();
        let viewport = window.viewport();
        let projection = Projection::new(viewport.width, viewport.height);

        let mut backend = GlBackend::new(&context, &projection);
        let mut scene = Scene::new(config.asteroids.count, config.asteroids.seed);
        scene.load_textures(&mut backend, &config.assets.directory);

        tracing::info!(
            bodies = scene.catalog().entries().len(),
            asteroids = scene.asteroids().len(),
            "scene ready"
        );

        Ok(Self {
            window: Some(window),
            scene,
            backend,
            projection,
            keys: KeyState::default(),
            hud: Hud::new(&context, config.hud.show_fps),
        })
    }

    pub(crate) fn run(mut self) {
        if let Some(window) = self.window.take() {
            window.render_loop(move |frame_input| self.tick(frame_input));
        }
    }

    fn tick(&mut self, mut frame_input: FrameInput) -> FrameOutput {
        self.hud.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            frame_input.elapsed_time,
            *self.scene.camera().state(),
        );

        self.keys.handle_events(&mut frame_input.events);
        self.scene.update_camera(self.keys.camera_input());

        if self
            .projection
            .resize(frame_input.viewport.width, frame_input.viewport.height)
        {
            self.backend.set_projection(&self.projection);
        }

        let time = frame_input.accumulated_time / 1000.0;
        self.scene.render_frame(self.backend.frame(), time);

        let screen = frame_input.screen();
        self.backend.present(&screen);
        if let Err(error) = screen.write(|| self.hud.render()) {
            tracing::error!(%error, "could not draw the HUD");
        }

        FrameOutput {
            exit: self.keys.exit_requested(),
            ..Default::default()
        }
    }
}
