use glam::Mat4;

use super::{FrameError, Frontend, PointCloudRenderer};
use crate::{
    gpu::{DepthTexture, DeviceError, RenderContext},
    options::DisplayOptions,
    point_cloud::Point,
};

/// wgpu-backed [`Frontend`] presenting to a window surface.
pub struct GpuFrontend {
    context: RenderContext,
    renderer: PointCloudRenderer,
    depth: Option<DepthTexture>,
    clear_color: wgpu::Color,
}

impl GpuFrontend {
    /// Initialize the device and build the point pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the GPU context cannot be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        preferred_adapter: Option<&str>,
        display: &DisplayOptions,
    ) -> Result<Self, DeviceError> {
        let context = RenderContext::new(window, size, preferred_adapter).await?;
        let adapter = context.adapter();
        log::info!(
            "adapter: {} ({:?}), surface {:?}, max buffer {} bytes",
            adapter.name,
            adapter.backend,
            context.format(),
            adapter.max_buffer_size
        );
        let renderer = PointCloudRenderer::new(&context.device, context.format(), display);
        let depth = renderer.uses_depth().then(|| {
            DepthTexture::new(&context.device, context.config.width, context.config.height)
        });
        let [r, g, b, a] = display.clear_color;
        Ok(Self {
            context,
            renderer,
            depth,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, FrameError> {
        if self.context.is_device_lost() {
            return Err(FrameError::DeviceLost("device-lost callback fired".into()));
        }
        match self.context.get_next_frame() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(FrameError::DeviceLost("out of memory".into()))
            }
            Err(e @ (wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost)) => {
                self.context.reconfigure();
                Err(FrameError::SurfaceUnavailable(e.to_string()))
            }
            Err(other) => Err(FrameError::SurfaceUnavailable(other.to_string())),
        }
    }
}

impl Frontend for GpuFrontend {
    fn load_geometry(&mut self, points: &[Point]) -> Result<(), DeviceError> {
        self.renderer.load(&self.context.device, points)?;
        log::debug!("uploaded {} points", self.renderer.vertex_count());
        Ok(())
    }

    fn update_camera(&mut self, mvp: &Mat4) {
        self.renderer.update_camera(&self.context.queue, mvp);
    }

    fn draw_frame(&mut self) -> Result<(), FrameError> {
        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Cloud Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth.as_ref().map(|depth| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.draw(&mut pass);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        if self
            .depth
            .as_ref()
            .is_some_and(|depth| depth.size() != (width, height))
        {
            self.depth = Some(DepthTexture::new(&self.context.device, width, height));
        }
    }

    fn viewport_size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}
