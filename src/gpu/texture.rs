//! Framework-agnostic render-target and depth texture abstractions.

use crate::error::CubeviewError;

/// Depth format used by the shape pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Bytes per texel accepted by [`RenderTarget::read_texels`].
const TEXEL_BYTES: u32 = 4;

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` usage so it
/// can be drawn into off-screen and read back or composited afterwards.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = create_2d(
            device,
            "RenderTarget",
            width,
            height,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Texture size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    /// Copy the texture back to the CPU as tightly packed 4-byte texels,
    /// row-major from the top-left corner. Blocks until the GPU is idle.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Readback`] if the format is not 4 bytes per
    /// texel or the staging buffer cannot be mapped.
    pub fn read_texels(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<u8>, CubeviewError> {
        let format = self.texture.format();
        if format.block_copy_size(None) != Some(TEXEL_BYTES) {
            return Err(CubeviewError::Readback(format!(
                "unsupported texel format {format:?}"
            )));
        }

        let (width, height) = self.size();
        let unpadded_row = width * TEXEL_BYTES;
        let padded_row = unpadded_row
            .div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            self.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            self.texture.size(),
        );
        let _ = queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| CubeviewError::Readback(e.to_string()))?;
        rx.recv()
            .map_err(|e| CubeviewError::Readback(e.to_string()))?
            .map_err(|e| CubeviewError::Readback(e.to_string()))?;

        let mapped = slice.get_mapped_range();
        let mut texels =
            Vec::with_capacity(unpadded_row as usize * height as usize);
        for row in mapped.chunks_exact(padded_row as usize) {
            texels.extend_from_slice(&row[..unpadded_row as usize]);
        }
        drop(mapped);
        staging.unmap();
        Ok(texels)
    }
}

/// Depth attachment matching the color target size.
pub struct DepthTarget {
    /// The underlying depth texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    /// Create a depth texture of the given size.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = create_2d(
            device,
            "Depth Texture",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Texture size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

fn create_2d(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    })
}
