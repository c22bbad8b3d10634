//! The viewer core: the single owner of camera, input, and frontend.
//!
//! Input events flow through the [`InputProcessor`] into
//! [`ViewerCommand`]s, which are the only way camera state changes.
//! Camera changes only mark the uniform dirty; [`PointCloudEngine::render`]
//! uploads it at most once per frame, reading the aspect ratio from the
//! frontend's live viewport.

use crate::{
    camera::CameraController,
    error::ViewerError,
    input::{InputEvent, InputProcessor, ViewerCommand},
    options::Options,
    point_cloud::{normalize, Normalized, Point},
    renderer::Frontend,
    util::FrameTiming,
};

/// Outcome of one [`PointCloudEngine::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame was drawn and presented.
    Presented,
    /// The surface had no image this frame; try again next frame.
    Skipped,
}

/// Point cloud viewer driving a [`Frontend`].
pub struct PointCloudEngine<F: Frontend> {
    frontend: F,
    camera: CameraController,
    input: InputProcessor,
    camera_dirty: bool,
    point_count: usize,
    exit_requested: bool,
    frame_timing: FrameTiming,
}

impl<F: Frontend> PointCloudEngine<F> {
    /// Wrap `frontend`. The camera uniform is uploaded on the first render.
    pub fn new(frontend: F, options: &Options) -> Self {
        Self {
            frontend,
            camera: CameraController::new(&options.camera),
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            camera_dirty: true,
            point_count: 0,
            exit_requested: false,
            frame_timing: FrameTiming::new(),
        }
    }

    /// Normalize `points` and upload them as the current geometry.
    ///
    /// Returns the normalization result (bounds, center, scale, and the
    /// uploaded points).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Device`] if the frontend cannot hold the
    /// points. The previous geometry stays loaded.
    pub fn load_points(&mut self, points: &[Point]) -> Result<Normalized, ViewerError> {
        let normalized = normalize(points);
        self.frontend.load_geometry(&normalized.points)?;
        self.point_count = normalized.points.len();
        if let Some(bounds) = normalized.bounds {
            log::info!(
                "loaded {} points, bounds {:?}..{:?}, scale {:.4}",
                self.point_count,
                bounds.min,
                bounds.max,
                normalized.scale
            );
        }
        Ok(normalized)
    }

    /// Route one raw input event. Returns the command it produced, if any,
    /// after applying it.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        let command = self.input.handle_event(event)?;
        let _ = self.execute(command);
        Some(command)
    }

    /// Apply a command. Returns `true` if the camera changed.
    pub fn execute(&mut self, command: ViewerCommand) -> bool {
        let changed = match command {
            ViewerCommand::Rotate { dx, dy } => self.camera.rotate(dx, dy),
            ViewerCommand::Pan { dx, dy } => {
                self.camera.pan(dx, dy, self.frontend.viewport_size())
            }
            ViewerCommand::Zoom { delta } => self.camera.zoom(delta),
            ViewerCommand::ResetCamera => self.camera.reset(),
            ViewerCommand::Exit => {
                self.exit_requested = true;
                false
            }
        };
        self.camera_dirty |= changed;
        changed
    }

    /// Return the camera to its initial state.
    pub fn reset_camera(&mut self) -> bool {
        self.execute(ViewerCommand::ResetCamera)
    }

    /// Resize the surface. The new aspect ratio is picked up on the next
    /// render. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.frontend.resize(width, height);
        self.camera_dirty = true;
    }

    /// Upload the camera if it changed, then draw one frame.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Frame`] when the device is lost. A frame
    /// without a surface image is reported as [`FrameStatus::Skipped`].
    pub fn render(&mut self) -> Result<FrameStatus, ViewerError> {
        if self.camera_dirty {
            let mvp = self.camera.mvp(self.frontend.viewport_size());
            self.frontend.update_camera(&mvp);
            self.camera_dirty = false;
        }

        match self.frontend.draw_frame() {
            Ok(()) => {
                if let Some(fps) = self.frame_timing.end_frame() {
                    log::debug!("{fps:.1} fps ({} points)", self.point_count);
                }
                Ok(FrameStatus::Presented)
            }
            Err(e) if e.is_transient() => {
                log::debug!("frame skipped: {e}");
                Ok(FrameStatus::Skipped)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether an [`ViewerCommand::Exit`] has been executed.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Whether a camera upload is pending.
    #[must_use]
    pub fn camera_dirty(&self) -> bool {
        self.camera_dirty
    }

    /// Number of points currently uploaded.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The frontend.
    #[must_use]
    pub fn frontend(&self) -> &F {
        &self.frontend
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use approx::assert_abs_diff_eq;
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::{
        gpu::DeviceError,
        input::{Modifiers, MouseButton},
        renderer::FrameError,
    };

    #[derive(Default)]
    struct RecordingFrontend {
        size: (u32, u32),
        geometry: Vec<Vec<Point>>,
        uploads: Vec<Mat4>,
        draws: usize,
        results: VecDeque<Result<(), FrameError>>,
        max_points: Option<usize>,
    }

    impl RecordingFrontend {
        fn sized(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                ..Self::default()
            }
        }
    }

    impl Frontend for RecordingFrontend {
        fn load_geometry(&mut self, points: &[Point]) -> Result<(), DeviceError> {
            if let Some(limit) = self.max_points.filter(|&limit| points.len() > limit) {
                return Err(DeviceError::GeometryTooLarge {
                    points: points.len(),
                    bytes: points.len() as u64 * 16,
                    limit: limit as u64 * 16,
                });
            }
            self.geometry.push(points.to_vec());
            Ok(())
        }

        fn update_camera(&mut self, mvp: &Mat4) {
            self.uploads.push(*mvp);
        }

        fn draw_frame(&mut self) -> Result<(), FrameError> {
            self.draws += 1;
            self.results.pop_front().unwrap_or(Ok(()))
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn viewport_size(&self) -> (u32, u32) {
            self.size
        }
    }

    fn engine() -> PointCloudEngine<RecordingFrontend> {
        PointCloudEngine::new(RecordingFrontend::sized(800, 600), &Options::default())
    }

    fn left_drag(engine: &mut PointCloudEngine<RecordingFrontend>, to: (f64, f64)) {
        let _ = engine.handle_input(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = engine.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
            modifiers: Modifiers::default(),
        });
        let _ = engine.handle_input(InputEvent::CursorMoved { x: to.0, y: to.1 });
    }

    #[test]
    fn first_render_uploads_the_camera() {
        let mut engine = engine();
        assert_eq!(engine.render().ok(), Some(FrameStatus::Presented));
        assert_eq!(engine.frontend().uploads.len(), 1);
        assert_eq!(engine.frontend().uploads[0], engine.camera().mvp((800, 600)));
    }

    #[test]
    fn no_upload_without_a_change() {
        let mut engine = engine();
        for _ in 0..3 {
            let _ = engine.render();
        }
        assert_eq!(engine.frontend().uploads.len(), 1);
        assert_eq!(engine.frontend().draws, 3);

        // Zoom at the clamp bound does not count as a change.
        for _ in 0..200 {
            let _ = engine.execute(ViewerCommand::Zoom { delta: 1.0 });
        }
        let _ = engine.render();
        assert!(!engine.execute(ViewerCommand::Zoom { delta: 1.0 }));
        let _ = engine.render();
        assert_eq!(engine.frontend().uploads.len(), 2);
    }

    #[test]
    fn changes_between_frames_coalesce_into_one_upload() {
        let mut engine = engine();
        let _ = engine.render();
        for i in 1..=10 {
            let _ = engine.execute(ViewerCommand::Rotate {
                dx: i as f32,
                dy: 0.0,
            });
        }
        assert!(engine.camera_dirty());
        let _ = engine.render();
        assert!(!engine.camera_dirty());
        assert_eq!(engine.frontend().uploads.len(), 2);
        assert_eq!(
            engine.frontend().uploads[1],
            engine.camera().mvp((800, 600))
        );
    }

    #[test]
    fn drag_input_rotates_the_camera() {
        let mut engine = engine();
        left_drag(&mut engine, (10.0, -5.0));
        let state = engine.camera().state();
        assert_abs_diff_eq!(state.rotation_y, 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(state.rotation_x, -0.05, epsilon = 1e-6);
    }

    #[test]
    fn pan_uses_the_live_viewport() {
        let mut engine = engine();
        engine.resize(400, 200);
        let _ = engine.execute(ViewerCommand::Pan { dx: 100.0, dy: 50.0 });
        let t = engine.camera().state().translation;
        assert_abs_diff_eq!(t.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(t.y, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn resize_recomputes_aspect_on_next_render() {
        let mut engine = engine();
        let _ = engine.render();
        engine.resize(1000, 500);
        let _ = engine.render();
        let uploads = &engine.frontend().uploads;
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1], engine.camera().mvp((1000, 500)));
        assert_ne!(uploads[0], uploads[1]);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut engine = engine();
        let _ = engine.render();
        engine.resize(0, 600);
        assert_eq!(engine.frontend().viewport_size(), (800, 600));
        assert!(!engine.camera_dirty());
    }

    #[test]
    fn reset_key_restores_identity() {
        let mut engine = engine();
        let _ = engine.execute(ViewerCommand::Zoom { delta: 3.0 });
        let _ = engine.execute(ViewerCommand::Rotate { dx: 5.0, dy: 5.0 });
        assert_eq!(
            engine.handle_input(InputEvent::KeyPressed { key: "KeyR".into() }),
            Some(ViewerCommand::ResetCamera)
        );
        assert_eq!(*engine.camera().state(), crate::camera::CameraState::default());
        assert!(!engine.reset_camera());
    }

    #[test]
    fn exit_key_requests_exit() {
        let mut engine = engine();
        assert!(!engine.exit_requested());
        let _ = engine.handle_input(InputEvent::KeyPressed {
            key: "Escape".into(),
        });
        assert!(engine.exit_requested());
    }

    #[test]
    fn load_uploads_normalized_geometry() {
        let mut engine = engine();
        let raw = [
            Point::new(0.0, 0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0, 255.0),
        ];
        let normalized = engine.load_points(&raw).unwrap();
        assert_eq!(engine.point_count(), 2);
        assert_eq!(engine.frontend().geometry.len(), 1);

        let uploaded = engine.frontend().geometry[0].clone();
        assert_eq!(uploaded, normalized.points);
        assert!(uploaded[0]
            .position()
            .abs_diff_eq(Vec3::new(-0.9, 0.0, 0.0), 1e-6));
        assert!(uploaded[1]
            .position()
            .abs_diff_eq(Vec3::new(0.9, 0.0, 0.0), 1e-6));
        assert_eq!(uploaded[1].intensity, 255.0);

        // Identity camera: the far point lands right of center in clip space.
        let _ = engine.render();
        let clip = engine.frontend().uploads[0] * uploaded[1].position().extend(1.0);
        assert!(clip.x / clip.w > 0.0);
        assert_abs_diff_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn reloading_replaces_geometry() {
        let mut engine = engine();
        let _ = engine.load_points(&[Point::new(1.0, 1.0, 1.0, 1.0); 4]).unwrap();
        let _ = engine.load_points(&[]).unwrap();
        assert_eq!(engine.point_count(), 0);
        assert_eq!(engine.frontend().geometry.len(), 2);
        assert!(engine.frontend().geometry[1].is_empty());
        assert_eq!(engine.render().ok(), Some(FrameStatus::Presented));
    }

    #[test]
    fn oversized_cloud_is_a_device_error() {
        let mut engine = PointCloudEngine::new(
            RecordingFrontend {
                size: (800, 600),
                max_points: Some(2),
                ..RecordingFrontend::default()
            },
            &Options::default(),
        );
        let _ = engine.load_points(&[Point::new(1.0, 0.0, 0.0, 0.0); 2]).unwrap();
        let result = engine.load_points(&[Point::new(1.0, 0.0, 0.0, 0.0); 3]);
        assert!(matches!(
            result,
            Err(ViewerError::Device(DeviceError::GeometryTooLarge { points: 3, .. }))
        ));
        assert_eq!(engine.point_count(), 2);
        assert_eq!(engine.frontend().geometry.len(), 1);
    }

    #[test]
    fn unavailable_surface_skips_the_frame() {
        let mut engine = engine();
        engine
            .frontend
            .results
            .push_back(Err(FrameError::SurfaceUnavailable("Timeout".into())));
        assert_eq!(engine.render().ok(), Some(FrameStatus::Skipped));
        assert_eq!(engine.render().ok(), Some(FrameStatus::Presented));
    }

    #[test]
    fn device_loss_is_fatal() {
        let mut engine = engine();
        engine
            .frontend
            .results
            .push_back(Err(FrameError::DeviceLost("gone".into())));
        assert!(matches!(
            engine.render(),
            Err(ViewerError::Frame(FrameError::DeviceLost(_)))
        ));
    }
}
