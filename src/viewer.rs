//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use cubeview::Viewer;
//! Viewer::builder().with_title("Tree").build().run().unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::CubeviewError, options::Options, CubeEngine, InputEvent,
    MouseButton, TouchPhase,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Cubeview", default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Cubeview".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the shape and feeds it gestures.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), CubeviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| CubeviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CubeviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<CubeEngine>,
    options: Option<Options>,
    title: String,
}

/// Surface size for a window. A minimized window reports zero, which the
/// engine ignores.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width, inner.height)
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    /// Forward an input event and redraw if it changed the pose.
    fn forward(&mut self, event: InputEvent) {
        let changed = self
            .engine
            .as_mut()
            .is_some_and(|engine| engine.handle_input(event));
        if changed {
            self.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(CubeEngine::new(
            window.clone(),
            viewport_size(window.inner_size()),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            // Drop the engine (and its GPU resources) before the window.
            self.engine = None;
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                let mut retry = false;
                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(_) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(inner) = inner {
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.resize(vp_w, vp_h);
                            }
                            retry = true;
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if retry {
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let moved = InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                };
                self.forward(moved);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.forward(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::Touch(touch) => {
                #[allow(clippy::cast_possible_truncation)]
                let contact = InputEvent::Touch {
                    id: touch.id,
                    phase: TouchPhase::from(touch.phase),
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                };
                self.forward(contact);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.forward(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                let key_str = format!("{code:?}");
                let handled = self
                    .engine
                    .as_mut()
                    .is_some_and(|engine| engine.handle_key_press(&key_str));
                if handled {
                    self.request_redraw();
                }
            }

            _ => (),
        }
    }
}
