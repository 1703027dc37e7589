//! The host-facing engine: owns the GPU context, the shape renderer, the
//! camera controller, and the input processor.

/// Gesture command vocabulary.
pub mod command;
mod input;

use crate::camera::controller::CameraController;
use crate::error::CubeviewError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::RenderTarget;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::{DrawStats, ShapeMesh, ShapeRenderer};

/// Renders one shape and lets gestures move it around.
///
/// Lifecycle maps onto the host's callbacks: construction is "init
/// graphics", [`resize`](Self::resize) handles size/orientation changes,
/// [`render`](Self::render) draws a frame, and dropping the engine releases
/// every GPU resource.
pub struct CubeEngine {
    context: RenderContext,
    shape: ShapeRenderer,
    camera: CameraController,
    input: InputProcessor,
    options: Options,
    /// Color target when there is no presentation surface.
    offscreen: Option<RenderTarget>,
    /// GPU error count already reported to the log.
    reported_errors: u32,
}

impl CubeEngine {
    /// Create an engine drawing into the given window surface.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError`] if GPU setup or shader compilation fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, CubeviewError> {
        let context = RenderContext::new(window, size).await?;
        Self::with_mesh(context, &ShapeMesh::tree(), options).await
    }

    /// Create an engine that renders into an off-screen texture.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError`] if no GPU is available or shader
    /// compilation fails.
    pub async fn new_headless(
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, CubeviewError> {
        let context = RenderContext::headless(size.0, size.1).await?;
        Self::with_mesh(context, &ShapeMesh::tree(), options).await
    }

    /// Create an engine on an existing context with a custom mesh.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Shader`] if shader compilation fails.
    pub async fn with_mesh(
        context: RenderContext,
        mesh: &ShapeMesh,
        options: Options,
    ) -> Result<Self, CubeviewError> {
        let mut composer = ShaderComposer::new()?;
        let shape =
            ShapeRenderer::new(&context, &mut composer, mesh, &options.display)
                .await?;

        let (width, height) = (context.width(), context.height());
        let camera = CameraController::new(&options.camera, width, height);
        let input = InputProcessor::new(&options);
        let offscreen = (!context.has_surface()).then(|| {
            RenderTarget::new(&context.device, width, height, context.format())
        });
        log::info!("engine initialized at {width}x{height}");

        Ok(Self {
            reported_errors: context.error_count(),
            context,
            shape,
            camera,
            input,
            options,
            offscreen,
        })
    }

    /// Handle a viewport size or orientation change.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera.set_viewport(width, height);
        self.shape.resize(&self.context.device, width, height);
        let stale = self
            .offscreen
            .as_ref()
            .is_some_and(|target| target.size() != (width, height));
        if stale {
            self.offscreen = Some(RenderTarget::new(
                &self.context.device,
                width,
                height,
                self.context.format(),
            ));
        }
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Draw one frame: upload the current MVP matrix, clear, and draw.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired. GPU validation errors are logged, not returned.
    pub fn render(&mut self) -> Result<DrawStats, wgpu::SurfaceError> {
        self.shape
            .update_mvp(&self.context.queue, self.camera.mvp());

        let stats = if let Some(target) = &self.offscreen {
            let mut encoder = self.context.create_encoder();
            let stats = self.shape.draw(&mut encoder, &target.view);
            self.context.submit(encoder);
            stats
        } else {
            let frame = self.context.get_next_frame()?;
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            let mut encoder = self.context.create_encoder();
            let stats = self.shape.draw(&mut encoder, &view);
            self.context.submit(encoder);
            frame.present();
            stats
        };

        self.check_gpu_errors();
        Ok(stats)
    }

    /// Log any GPU errors raised since the last check.
    fn check_gpu_errors(&mut self) {
        let count = self.context.error_count();
        if count > self.reported_errors {
            log::warn!(
                "{} GPU error(s) reported while rendering",
                count - self.reported_errors
            );
            self.reported_errors = count;
        }
    }

    /// The camera/pose controller.
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The shape renderer.
    pub fn shape(&self) -> &ShapeRenderer {
        &self.shape
    }

    /// The GPU context.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Off-screen color target (headless engines only).
    pub fn offscreen_target(&self) -> Option<&RenderTarget> {
        self.offscreen.as_ref()
    }

    /// Read the last rendered off-screen frame as RGBA8 texels, row-major
    /// from the top-left.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Readback`] if the engine draws to a window
    /// surface or the copy fails.
    pub fn read_frame(&self) -> Result<Vec<u8>, CubeviewError> {
        let target = self.offscreen.as_ref().ok_or_else(|| {
            CubeviewError::Readback(
                "engine renders to a window surface".to_owned(),
            )
        })?;
        target.read_texels(&self.context.device, &self.context.queue)
    }

    /// Total GPU errors reported by the device so far.
    pub fn gpu_error_count(&self) -> u32 {
        self.context.error_count()
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options. Camera, gesture, keybinding, and clear-color
    /// changes take effect immediately; `display.depth_test` is baked into
    /// the pipeline and applies to the next engine created.
    pub fn set_options(&mut self, options: Options) {
        if options.display.depth_test != self.options.display.depth_test {
            log::info!("depth_test change applies on next engine creation");
        }
        self.camera.apply_options(&options.camera);
        self.input.set_options(&options);
        self.shape.set_clear_color(&options.display);
        self.options = options;
    }
}

impl Drop for CubeEngine {
    fn drop(&mut self) {
        log::debug!("releasing GPU resources");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::engine::command::GestureCommand;

    const WIDTH: u32 = 320;
    const HEIGHT: u32 = 240;

    /// Blue background and an unrotated tree facing the camera.
    fn facing_options() -> Options {
        let mut options = Options::default();
        options.camera.default_pose = [0.0; 6];
        options.display.clear_color = [0.0, 0.0, 1.0];
        options
    }

    /// Returns `None` on machines with neither a hardware nor a software
    /// wgpu adapter, unless `CUBEVIEW_REQUIRE_GPU` is set.
    fn headless_engine(options: Options) -> Option<CubeEngine> {
        match pollster::block_on(CubeEngine::new_headless(
            (WIDTH, HEIGHT),
            options,
        )) {
            Ok(engine) => Some(engine),
            Err(CubeviewError::Gpu(e)) => {
                assert!(
                    std::env::var_os("CUBEVIEW_REQUIRE_GPU").is_none(),
                    "no GPU adapter: {e}"
                );
                log::warn!("skipping GPU test: {e}");
                None
            }
            Err(e) => panic!("engine setup failed: {e}"),
        }
    }

    /// RGBA texel at pixel `(x, y)` of a frame `width` pixels wide.
    fn texel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    /// Pixel row covering world height `y` at the focus plane.
    fn row_for(engine: &CubeEngine, y: f32) -> u32 {
        let camera = &engine.camera().camera;
        let half = camera.focus_distance() * (camera.fovy.to_radians() * 0.5).tan();
        ((1.0 - y / half) * 0.5 * HEIGHT as f32) as u32
    }

    #[test]
    fn renders_tree_pixels_with_one_draw_call() {
        let Some(mut engine) = headless_engine(facing_options()) else {
            return;
        };
        assert_eq!(engine.shape().vertex_count(), 15);

        let stats = engine.render().unwrap();
        assert_eq!(
            stats,
            DrawStats {
                draw_calls: 1,
                vertices: 15
            }
        );

        let frame = engine.read_frame().unwrap();
        assert_eq!(frame.len(), (WIDTH * HEIGHT * 4) as usize);
        // Corners keep the clear color
        let blue = [0, 0, 255, 255];
        assert_eq!(texel(&frame, WIDTH, 0, 0), blue);
        assert_eq!(texel(&frame, WIDTH, WIDTH - 1, HEIGHT - 1), blue);

        // Top canopy triangle is green
        let canopy = texel(&frame, WIDTH, WIDTH / 2, row_for(&engine, 0.05));
        assert_eq!(canopy, [0, 255, 0, 255]);

        // Trunk is brown
        let [r, g, b, a] =
            texel(&frame, WIDTH, WIDTH / 2, row_for(&engine, -0.5));
        assert!(r > g && g.abs_diff(b) <= 1 && a == 255, "trunk {r} {g} {b}");

        assert_eq!(engine.gpu_error_count(), 0);
    }

    #[test]
    fn scaled_down_tree_leaves_canopy_row_clear() {
        let Some(mut engine) = headless_engine(facing_options()) else {
            return;
        };
        let row = row_for(&engine, 0.15);
        let _ = engine.render().unwrap();
        let frame = engine.read_frame().unwrap();
        assert_eq!(texel(&frame, WIDTH, WIDTH / 2, row), [0, 255, 0, 255]);

        engine.execute(GestureCommand::Scale { factor: 0.25 });
        let _ = engine.render().unwrap();
        let frame = engine.read_frame().unwrap();
        assert_eq!(texel(&frame, WIDTH, WIDTH / 2, row), [0, 0, 255, 255]);
    }

    #[test]
    fn uploaded_matrix_follows_gestures() {
        let Some(mut engine) = headless_engine(Options::default()) else {
            return;
        };
        engine.execute(GestureCommand::Scale { factor: 1.5 });
        engine.execute(GestureCommand::Translate {
            delta: Vec2::new(20.0, 0.0),
        });
        let _ = engine.render().unwrap();
        assert_eq!(
            engine.shape().uniform().mvp_mat,
            engine.camera().mvp().to_cols_array_2d()
        );
    }

    #[test]
    fn resize_updates_aspect_and_targets() {
        let Some(mut engine) = headless_engine(Options::default()) else {
            return;
        };
        engine.resize(640, 200);
        assert_eq!(engine.camera().camera.aspect, 3.2);
        assert_eq!(
            engine.offscreen_target().map(RenderTarget::size),
            Some((640, 200))
        );
        let stats = engine.render().unwrap();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(engine.read_frame().unwrap().len(), 640 * 200 * 4);
        assert_eq!(engine.gpu_error_count(), 0);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let Some(mut engine) = headless_engine(Options::default()) else {
            return;
        };
        engine.resize(0, 0);
        engine.resize(500, 0);
        assert_eq!(engine.camera().camera.aspect, 320.0 / 240.0);
        assert_eq!(engine.context().width(), WIDTH);
        assert_eq!(
            engine.offscreen_target().map(RenderTarget::size),
            Some((WIDTH, HEIGHT))
        );
    }
}
