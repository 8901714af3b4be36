use crate::{PathSegment, V2};

/// The pen state threaded through one secondary-backend compilation pass.
///
/// A fresh context is created for every pass and dropped at the end of it, so two compilations
/// never share one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompilationContext {
    /// Absolute location of the pen
    pub current_point: V2,
    /// Where the current subpath started; [`PathSegment::ClosePath`] returns here
    pub subpath_start_point: V2,
    /// Absolute last control point of the previous segment if it was a cubic Bézier, otherwise
    /// the previous segment's end point
    pub last_cubic_control_point: V2,
    /// Absolute control point of the previous segment if it was a quadratic Bézier, otherwise
    /// the previous segment's end point
    pub last_quadratic_control_point: V2,
}

impl CompilationContext {
    /// A context with every point at the path's local origin
    pub fn new() -> Self {
        let origin = V2::new(0.0, 0.0);
        Self {
            current_point: origin,
            subpath_start_point: origin,
            last_cubic_control_point: origin,
            last_quadratic_control_point: origin,
        }
    }

    /// Moves the context past `segment`, which must have just been emitted with this context.
    ///
    /// Control-point memory is reset to the new pen position for any segment of a different
    /// curve kind, so a smooth curve following e.g. a line has a zero-length first tangent.
    pub fn advance(&mut self, segment: &PathSegment) {
        let new_location = segment.resolve_endpoint(self);
        // Both control points must be computed against the pen position *before* the segment
        let cubic_ctrl = segment.cubic_control_point(self);
        let quadratic_ctrl = segment.quadratic_control_point(self);

        self.last_cubic_control_point = cubic_ctrl.unwrap_or(new_location);
        self.last_quadratic_control_point = quadratic_ctrl.unwrap_or(new_location);
        self.current_point = if segment.closes_subpath() {
            self.subpath_start_point
        } else {
            new_location
        };
        if segment.starts_new_subpath() {
            self.subpath_start_point = self.current_point;
        }
    }
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}
