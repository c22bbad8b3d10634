use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::adapter::{self, AdapterSummary};

/// Errors that can occur during GPU context initialization.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Failed to create a wgpu surface from the window handle.
    #[error("surface creation failed: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// GPU device request failed (limits or features not met).
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    /// Surface configuration not supported by the selected adapter.
    #[error("surface configuration not supported by adapter")]
    UnsupportedSurface,
    /// The point cloud does not fit in one vertex buffer on this device.
    #[error("{points} points need {bytes} bytes, device buffers are limited to {limit} bytes")]
    GeometryTooLarge {
        /// Points requested.
        points: usize,
        /// Vertex buffer size required.
        bytes: u64,
        /// Device `max_buffer_size`.
        limit: u64,
    },
}

/// Owns the core wgpu resources: device, queue, surface, and configuration.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    /// The window surface for presentation.
    pub surface: wgpu::Surface<'static>,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
    adapter: AdapterSummary,
    device_lost: Arc<AtomicBool>,
}

impl RenderContext {
    /// Create a render context presenting to `window`.
    ///
    /// Adapters that cannot present to the surface are skipped. Among the
    /// rest, the first whose name contains `preferred` is used, falling back
    /// to the first one with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if surface creation, adapter selection,
    /// device request, or surface configuration fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        preferred: Option<&str>,
    ) -> Result<Self, DeviceError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let mut candidates: Vec<wgpu::Adapter> = instance
            .enumerate_adapters(wgpu::Backends::all())
            .into_iter()
            .filter(|adapter| adapter.is_surface_supported(&surface))
            .collect();
        let names: Vec<String> = candidates.iter().map(|a| a.get_info().name).collect();
        let choice = adapter::select_adapter(&names, String::as_str, preferred)
            .ok_or(DeviceError::NoAdapter)?;
        match preferred {
            Some(wanted) if !choice.matched => log::warn!(
                "no adapter matching {wanted:?}, falling back to {}",
                names[choice.index]
            ),
            None if candidates.len() > 1 => log::info!(
                "{} adapters available, using the first (see --list-adapters)",
                candidates.len()
            ),
            _ => {}
        }
        let adapter = candidates.swap_remove(choice.index);
        let summary = adapter::describe(&adapter);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits {
                    max_buffer_size: summary.max_buffer_size,
                    ..wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await?;

        let device_lost = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&device_lost);
        device.set_device_lost_callback(move |reason, message| {
            log::error!("GPU device lost ({reason:?}): {message}");
            flag.store(true, Ordering::Relaxed);
        });

        let (width, height) = (initial_size.0.max(1), initial_size.1.max(1));
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(DeviceError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            adapter: summary,
            device_lost,
        })
    }

    /// The surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Description of the adapter in use.
    #[must_use]
    pub fn adapter(&self) -> &AdapterSummary {
        &self.adapter
    }

    /// Whether the device-lost callback has fired.
    #[must_use]
    pub fn is_device_lost(&self) -> bool {
        self.device_lost.load(Ordering::Relaxed)
    }

    /// Reconfigure the surface for the new window size. Ignores zero-sized
    /// dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the current configuration, e.g. after the surface went
    /// outdated or lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain texture for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface is lost, outdated,
    /// timed out, or out of memory.
    pub fn get_next_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Create a new command encoder for recording GPU commands.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// Finish the encoder and submit its command buffer to the GPU queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}
