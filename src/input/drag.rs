/// Transient state of one drag gesture.
///
/// Starts on button press at the current cursor position, yields a pixel
/// delta for every motion sample while active, and is cleared on release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    active: bool,
    last_cursor: (f64, f64),
}

impl DragSession {
    /// Whether the gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cursor position of the last sample seen while active.
    #[must_use]
    pub fn last_cursor(&self) -> (f64, f64) {
        self.last_cursor
    }

    /// Start the gesture at `cursor`.
    pub fn begin(&mut self, cursor: (f64, f64)) {
        self.active = true;
        self.last_cursor = cursor;
    }

    /// Feed a motion sample. Returns the delta since the previous sample,
    /// or `None` if the session is inactive.
    pub fn motion(&mut self, cursor: (f64, f64)) -> Option<(f64, f64)> {
        if !self.active {
            return None;
        }
        let delta = (cursor.0 - self.last_cursor.0, cursor.1 - self.last_cursor.1);
        self.last_cursor = cursor;
        Some(delta)
    }

    /// End the gesture.
    pub fn end(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_session_ignores_motion() {
        let mut drag = DragSession::default();
        assert_eq!(drag.motion((10.0, 10.0)), None);
    }

    #[test]
    fn deltas_are_relative_to_previous_sample() {
        let mut drag = DragSession::default();
        drag.begin((100.0, 50.0));
        assert_eq!(drag.motion((110.0, 45.0)), Some((10.0, -5.0)));
        assert_eq!(drag.motion((110.5, 45.0)), Some((0.5, 0.0)));
        assert_eq!(drag.last_cursor(), (110.5, 45.0));
        drag.end();
        assert!(!drag.is_active());
        assert_eq!(drag.motion((0.0, 0.0)), None);
    }
}
