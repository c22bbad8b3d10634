//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use plyview::{point_cloud::Point, viewer::Viewer};
//! # fn main() -> Result<(), plyview::error::ViewerError> {
//! let points = vec![Point::new(0.0, 0.0, 0.0, 255.0)];
//! Viewer::builder().with_points(points).build().run()
//! # }
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::PointCloudEngine,
    error::ViewerError,
    input::{InputEvent, Modifiers, MouseButton},
    options::Options,
    point_cloud::Point,
    renderer::GpuFrontend,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    points: Vec<Point>,
    options: Options,
    adapter: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            points: Vec::new(),
            options: Options::default(),
            adapter: None,
        }
    }

    /// Set the raw (not yet normalized) points to display.
    #[must_use]
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Prefer the first adapter whose name contains `name`.
    #[must_use]
    pub fn with_adapter(mut self, name: Option<String>) -> Self {
        self.adapter = name;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            points: self.points,
            options: self.options,
            adapter: self.adapter,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing one point cloud with orbit, pan, and zoom controls.
pub struct Viewer {
    points: Vec<Point>,
    options: Options,
    adapter: Option<String>,
}

impl Viewer {
    /// Start building a viewer.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and block until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Viewer`] if the event loop or window cannot be
    /// created, [`ViewerError::Device`] if GPU initialization fails or the
    /// points do not fit on the device, and
    /// [`ViewerError::Frame`] if the device is lost while rendering.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            modifiers: Modifiers::default(),
            points: self.points,
            options: self.options,
            adapter: self.adapter,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Application handler ──────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<PointCloudEngine<GpuFrontend>>,
    modifiers: Modifiers,
    points: Vec<Point>,
    options: Options,
    adapter: Option<String>,
    /// First fatal error; returned from [`Viewer::run`].
    error: Option<ViewerError>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_options = &self.options.window;
        let attrs = Window::default_attributes()
            .with_title(&window_options.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_options.width,
                window_options.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| ViewerError::Viewer(format!("failed to create window: {e}")))?,
        );

        let inner = window.inner_size();
        let frontend = pollster::block_on(GpuFrontend::new(
            Arc::clone(&window),
            (inner.width, inner.height),
            self.adapter.as_deref(),
            &self.options.display,
        ))?;

        let mut engine = PointCloudEngine::new(frontend, &self.options);
        let _ = engine.load_points(&self.points)?;
        self.points = Vec::new();

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if let Err(e) = engine.render() {
            self.fail(event_loop, e);
            return;
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let _ = engine.handle_input(event);
        if engine.exit_requested() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = Modifiers::from(modifiers.state());
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let event = InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                    modifiers: self.modifiers,
                };
                self.dispatch(event_loop, event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(
                    event_loop,
                    InputEvent::CursorMoved {
                        x: position.x,
                        y: position.y,
                    },
                );
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.dispatch(event_loop, InputEvent::Scroll { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.dispatch(
                    event_loop,
                    InputEvent::KeyPressed {
                        key: format!("{code:?}"),
                    },
                );
            }

            _ => (),
        }
    }
}
