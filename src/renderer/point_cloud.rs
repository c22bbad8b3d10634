use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::{
    camera::CameraUniform, gpu::DeviceError, options::DisplayOptions, point_cloud::Point,
};

/// Vertex count for `points` points if their buffer fits within `limit` bytes.
pub(crate) fn checked_vertex_count(points: usize, limit: u64) -> Result<u32, DeviceError> {
    let bytes = (points as u64).saturating_mul(Point::STRIDE as u64);
    let too_large = DeviceError::GeometryTooLarge {
        points,
        bytes,
        limit,
    };
    if bytes > limit {
        return Err(too_large);
    }
    u32::try_from(points).map_err(|_| too_large)
}

/// Point-list pipeline plus the GPU resources it draws from.
///
/// Holds at most one vertex buffer. Loading new geometry replaces it; wgpu
/// keeps the old buffer alive until in-flight submissions finish.
pub struct PointCloudRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    depth_test: bool,
}

impl PointCloudRenderer {
    /// Build the pipeline for `format` targets.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        display: &DisplayOptions,
    ) -> Self {
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/point_cloud.wgsl"));

        let uniform_size = size_of::<CameraUniform>() as u64;
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform"),
            contents: bytemuck::bytes_of(&CameraUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[pipeline_util::vertex_uniform_entry(0, uniform_size)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Cloud Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let constants = [("intensity_scale", f64::from(display.intensity_scale))];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Cloud Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[pipeline_util::point_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: display
                .depth_test
                .then(pipeline_util::depth_stencil_state),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer: None,
            vertex_count: 0,
            depth_test: display.depth_test,
        }
    }

    /// Replace the vertex buffer with one holding `points`.
    ///
    /// An empty slice drops the buffer; later draws clear only.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::GeometryTooLarge`] if the buffer would exceed
    /// the device's `max_buffer_size`; the current buffer is kept.
    pub fn load(&mut self, device: &wgpu::Device, points: &[Point]) -> Result<(), DeviceError> {
        self.vertex_count = checked_vertex_count(points.len(), device.limits().max_buffer_size)?;
        self.vertex_buffer = (!points.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Point Vertex Buffer"),
                contents: bytemuck::cast_slice(points),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Ok(())
    }

    /// Write the camera matrix into the uniform buffer.
    pub fn update_camera(&self, queue: &wgpu::Queue, mvp: &Mat4) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform::new(mvp)),
        );
    }

    /// Number of points in the current vertex buffer.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Whether the pipeline expects a depth attachment.
    #[must_use]
    pub fn uses_depth(&self) -> bool {
        self.depth_test
    }

    /// Record the point draw into an open render pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(vertex_buffer) = &self.vertex_buffer else {
            return;
        };
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
