//! Ramp Descent entry point
//!
//! Computes descent times for the configured track sweep, prints them, then
//! opens a viewer window that animates the balls until it is closed.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use ramp_descent::Settings;
use ramp_descent::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use ramp_descent::renderer::{DrawLayout, RenderError, RenderState, build_frame};
use ramp_descent::settings::SettingsError;
use ramp_descent::sim::{FixedStep, SimError, SimState, report_line, run_batch};

const WINDOW_TITLE: &str = "Ramp Descent";

/// Fatal startup and runtime errors
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("GPU ran out of memory")]
    OutOfMemory,
}

/// Viewer holding all window-side state
struct Viewer {
    settings: Settings,
    state: SimState,
    stepper: FixedStep,
    layout: DrawLayout,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    last_frame: Instant,
    /// First fatal error; stops the event loop
    error: Option<AppError>,
}

impl Viewer {
    fn new(settings: Settings, state: SimState) -> Self {
        Self {
            settings,
            state,
            stepper: FixedStep::default(),
            layout: DrawLayout::default(),
            window: None,
            render_state: None,
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn restart(&mut self) {
        self.state.reset();
        self.stepper.reset();
        log::info!("Animation restarted");
    }

    /// Run simulation ticks for the time since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if !self.settings.animate {
            return;
        }
        self.stepper.advance(&mut self.state, dt);

        if self.settings.loop_animation && self.state.all_settled() {
            self.restart();
        }
    }

    /// Render the current frame
    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let vertices = build_frame(&self.state, &self.layout, self.settings.animate);
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        match render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => self.fail(event_loop, AppError::OutOfMemory),
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(RenderState::for_window(window.clone(), self.layout)) {
            Ok(render_state) => self.render_state = Some(render_state),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        log::info!("Viewer running ({} tracks)", self.state.tracks.len());
        self.last_frame = Instant::now();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character("r") | Key::Character("R") => self.restart(),
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.render(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = Settings::load()?;
    let body = settings.rolling_body()?;
    let gravity = settings.checked_gravity()?;
    let tracks = settings.build_tracks()?;

    log::info!(
        "Simulating {} tracks (deflection ±{}, size {} m, {} samples)",
        tracks.len(),
        settings.max_deflection,
        settings.track_size,
        settings.resolution
    );
    let outcomes = run_batch(&tracks, &body, gravity);
    for (index, outcome) in outcomes.iter().enumerate() {
        println!("{}", report_line(index, outcome));
    }

    if !settings.window {
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let state = SimState::new(tracks, body, gravity);
    let mut viewer = Viewer::new(settings, state);
    event_loop.run_app(&mut viewer)?;

    match viewer.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ramp Descent starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
