//! The pen-movement commands which make up a [`Path`](super::Path).

use crate::{compile::CompilationContext, utils, V2};

/// Whether a segment's coordinates are absolute, or offsets from the pen position at the start
/// of the segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coords {
    Absolute,
    Relative,
}

impl Coords {
    /// Converts a point stored in a segment into the shape's local space, given the pen
    /// position at the start of the segment
    pub fn resolve(self, p: V2, current: V2) -> V2 {
        match self {
            Coords::Absolute => p,
            Coords::Relative => current + p,
        }
    }

    /// Picks the upper-case command letter for absolute segments and the lower-case one for
    /// relative segments
    pub(crate) fn letter(self, upper: char) -> char {
        match self {
            Coords::Absolute => upper,
            Coords::Relative => upper.to_ascii_lowercase(),
        }
    }
}

/// The shape parameters of an elliptical arc, excluding its end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Radius along the ellipse's own x-axis.  The sign is ignored.
    pub rx: f64,
    /// Radius along the ellipse's own y-axis.  The sign is ignored.
    pub ry: f64,
    /// Rotation of the ellipse's x-axis, in degrees
    pub x_axis_rotation: f64,
    /// If `true`, the arc sweeps through more than 180 degrees
    pub large_arc: bool,
    /// If `true`, the arc is drawn in the direction of increasing angle
    pub sweep: bool,
}

/// A single pen-movement command, using the vocabulary of the SVG path mini-language.
///
/// Segments are pure data.  They never store the pen's absolute position, which can only be
/// found by replaying the path from the start (see [`CompilationContext`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Lift the pen and put it down at `to`, starting a new subpath
    MoveTo { coords: Coords, to: V2 },
    LineTo { coords: Coords, to: V2 },
    /// A horizontal line.  `x` is an absolute x-coordinate or an x-offset.
    HorizontalLineTo { coords: Coords, x: f64 },
    /// A vertical line.  `y` is an absolute y-coordinate or a y-offset.
    VerticalLineTo { coords: Coords, y: f64 },
    CubicBezier {
        coords: Coords,
        ctrl1: V2,
        ctrl2: V2,
        to: V2,
    },
    /// A cubic Bézier whose first control point is the reflection of the previous cubic's last
    /// control point
    SmoothCubicBezier { coords: Coords, ctrl2: V2, to: V2 },
    QuadraticBezier { coords: Coords, ctrl: V2, to: V2 },
    /// A quadratic Bézier whose control point is the reflection of the previous quadratic's
    /// control point
    SmoothQuadraticBezier { coords: Coords, to: V2 },
    EllipticalArc {
        coords: Coords,
        arc: ArcParams,
        to: V2,
    },
    /// Draw a straight line back to the start of the current subpath
    ClosePath,
}

impl PathSegment {
    /* CONSTRUCTORS */

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::MoveTo {
            coords: Coords::Absolute,
            to: V2::new(x, y),
        }
    }

    pub fn rel_move_to(dx: f64, dy: f64) -> Self {
        Self::MoveTo {
            coords: Coords::Relative,
            to: V2::new(dx, dy),
        }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self::LineTo {
            coords: Coords::Absolute,
            to: V2::new(x, y),
        }
    }

    pub fn rel_line_to(dx: f64, dy: f64) -> Self {
        Self::LineTo {
            coords: Coords::Relative,
            to: V2::new(dx, dy),
        }
    }

    pub fn horizontal_line_to(x: f64) -> Self {
        Self::HorizontalLineTo {
            coords: Coords::Absolute,
            x,
        }
    }

    pub fn rel_horizontal_line_to(dx: f64) -> Self {
        Self::HorizontalLineTo {
            coords: Coords::Relative,
            x: dx,
        }
    }

    pub fn vertical_line_to(y: f64) -> Self {
        Self::VerticalLineTo {
            coords: Coords::Absolute,
            y,
        }
    }

    pub fn rel_vertical_line_to(dy: f64) -> Self {
        Self::VerticalLineTo {
            coords: Coords::Relative,
            y: dy,
        }
    }

    pub fn cubic_bezier(c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        Self::CubicBezier {
            coords: Coords::Absolute,
            ctrl1: V2::new(c1x, c1y),
            ctrl2: V2::new(c2x, c2y),
            to: V2::new(x, y),
        }
    }

    pub fn rel_cubic_bezier(c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        Self::CubicBezier {
            coords: Coords::Relative,
            ctrl1: V2::new(c1x, c1y),
            ctrl2: V2::new(c2x, c2y),
            to: V2::new(x, y),
        }
    }

    pub fn smooth_cubic_bezier(c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        Self::SmoothCubicBezier {
            coords: Coords::Absolute,
            ctrl2: V2::new(c2x, c2y),
            to: V2::new(x, y),
        }
    }

    pub fn rel_smooth_cubic_bezier(c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        Self::SmoothCubicBezier {
            coords: Coords::Relative,
            ctrl2: V2::new(c2x, c2y),
            to: V2::new(x, y),
        }
    }

    pub fn quadratic_bezier(cx: f64, cy: f64, x: f64, y: f64) -> Self {
        Self::QuadraticBezier {
            coords: Coords::Absolute,
            ctrl: V2::new(cx, cy),
            to: V2::new(x, y),
        }
    }

    pub fn rel_quadratic_bezier(cx: f64, cy: f64, x: f64, y: f64) -> Self {
        Self::QuadraticBezier {
            coords: Coords::Relative,
            ctrl: V2::new(cx, cy),
            to: V2::new(x, y),
        }
    }

    pub fn smooth_quadratic_bezier(x: f64, y: f64) -> Self {
        Self::SmoothQuadraticBezier {
            coords: Coords::Absolute,
            to: V2::new(x, y),
        }
    }

    pub fn rel_smooth_quadratic_bezier(dx: f64, dy: f64) -> Self {
        Self::SmoothQuadraticBezier {
            coords: Coords::Relative,
            to: V2::new(dx, dy),
        }
    }

    pub fn elliptical_arc(
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        Self::EllipticalArc {
            coords: Coords::Absolute,
            arc: ArcParams {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
            },
            to: V2::new(x, y),
        }
    }

    pub fn rel_elliptical_arc(
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    ) -> Self {
        Self::EllipticalArc {
            coords: Coords::Relative,
            arc: ArcParams {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
            },
            to: V2::new(dx, dy),
        }
    }

    pub fn close() -> Self {
        Self::ClosePath
    }

    /* PREDICATES */

    /// Returns `None` for [`PathSegment::ClosePath`], which has no coordinates
    pub fn coords(&self) -> Option<Coords> {
        match *self {
            Self::MoveTo { coords, .. }
            | Self::LineTo { coords, .. }
            | Self::HorizontalLineTo { coords, .. }
            | Self::VerticalLineTo { coords, .. }
            | Self::CubicBezier { coords, .. }
            | Self::SmoothCubicBezier { coords, .. }
            | Self::QuadraticBezier { coords, .. }
            | Self::SmoothQuadraticBezier { coords, .. }
            | Self::EllipticalArc { coords, .. } => Some(coords),
            Self::ClosePath => None,
        }
    }

    pub fn starts_new_subpath(&self) -> bool {
        matches!(self, Self::MoveTo { .. })
    }

    pub fn closes_subpath(&self) -> bool {
        matches!(self, Self::ClosePath)
    }

    /// `true` for plain and smooth cubic Béziers, i.e. the segments which leave a cubic control
    /// point behind for a following smooth cubic to reflect
    pub fn is_cubic_bezier(&self) -> bool {
        matches!(self, Self::CubicBezier { .. } | Self::SmoothCubicBezier { .. })
    }

    /// `true` for plain and smooth quadratic Béziers
    pub fn is_quadratic_bezier(&self) -> bool {
        matches!(
            self,
            Self::QuadraticBezier { .. } | Self::SmoothQuadraticBezier { .. }
        )
    }

    /* GEOMETRY */

    /// Absolute location of the pen after this segment has been drawn, given the state of the
    /// path just before it
    pub fn resolve_endpoint(&self, ctx: &CompilationContext) -> V2 {
        let current = ctx.current_point;
        match *self {
            Self::MoveTo { coords, to }
            | Self::LineTo { coords, to }
            | Self::CubicBezier { coords, to, .. }
            | Self::SmoothCubicBezier { coords, to, .. }
            | Self::QuadraticBezier { coords, to, .. }
            | Self::SmoothQuadraticBezier { coords, to }
            | Self::EllipticalArc { coords, to, .. } => coords.resolve(to, current),
            Self::HorizontalLineTo { coords, x } => match coords {
                Coords::Absolute => V2::new(x, current.y),
                Coords::Relative => V2::new(current.x + x, current.y),
            },
            Self::VerticalLineTo { coords, y } => match coords {
                Coords::Absolute => V2::new(current.x, y),
                Coords::Relative => V2::new(current.x, current.y + y),
            },
            Self::ClosePath => ctx.subpath_start_point,
        }
    }

    /// The absolute first control point of a cubic segment.  For smooth cubics this is the
    /// reflection of the previous cubic control point about the pen.
    pub fn first_cubic_control_point(&self, ctx: &CompilationContext) -> Option<V2> {
        match *self {
            Self::CubicBezier { coords, ctrl1, .. } => {
                Some(coords.resolve(ctrl1, ctx.current_point))
            }
            Self::SmoothCubicBezier { .. } => Some(utils::reflect_about(
                ctx.last_cubic_control_point,
                ctx.current_point,
            )),
            _ => None,
        }
    }

    /// The absolute last control point of a cubic segment, which a following smooth cubic will
    /// reflect.  `None` for every other kind of segment.
    pub fn cubic_control_point(&self, ctx: &CompilationContext) -> Option<V2> {
        match *self {
            Self::CubicBezier { coords, ctrl2, .. } | Self::SmoothCubicBezier { coords, ctrl2, .. } => {
                Some(coords.resolve(ctrl2, ctx.current_point))
            }
            _ => None,
        }
    }

    /// The absolute control point of a quadratic segment (reflected for smooth quadratics),
    /// which a following smooth quadratic will reflect.  `None` for every other kind of segment.
    pub fn quadratic_control_point(&self, ctx: &CompilationContext) -> Option<V2> {
        match *self {
            Self::QuadraticBezier { coords, ctrl, .. } => {
                Some(coords.resolve(ctrl, ctx.current_point))
            }
            Self::SmoothQuadraticBezier { .. } => Some(utils::reflect_about(
                ctx.last_quadratic_control_point,
                ctx.current_point,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_at(x: f64, y: f64) -> CompilationContext {
        let mut ctx = CompilationContext::new();
        ctx.current_point = V2::new(x, y);
        ctx.last_cubic_control_point = ctx.current_point;
        ctx.last_quadratic_control_point = ctx.current_point;
        ctx
    }

    #[test]
    fn predicates() {
        assert!(PathSegment::move_to(1.0, 2.0).starts_new_subpath());
        assert!(PathSegment::rel_move_to(1.0, 2.0).starts_new_subpath());
        assert!(!PathSegment::line_to(1.0, 2.0).starts_new_subpath());

        assert!(PathSegment::close().closes_subpath());
        assert!(!PathSegment::close().starts_new_subpath());
        assert_eq!(PathSegment::close().coords(), None);

        assert!(PathSegment::cubic_bezier(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).is_cubic_bezier());
        assert!(PathSegment::rel_smooth_cubic_bezier(0.0, 0.0, 0.0, 0.0).is_cubic_bezier());
        assert!(!PathSegment::quadratic_bezier(0.0, 0.0, 0.0, 0.0).is_cubic_bezier());

        assert!(PathSegment::quadratic_bezier(0.0, 0.0, 0.0, 0.0).is_quadratic_bezier());
        assert!(PathSegment::smooth_quadratic_bezier(0.0, 0.0).is_quadratic_bezier());
        assert!(!PathSegment::elliptical_arc(1.0, 1.0, 0.0, false, false, 0.0, 0.0)
            .is_quadratic_bezier());
    }

    #[test]
    fn absolute_endpoints_ignore_the_pen() {
        let ctx = ctx_at(100.0, 100.0);
        let to = V2::new(3.0, 4.0);
        for seg in [
            PathSegment::move_to(3.0, 4.0),
            PathSegment::line_to(3.0, 4.0),
            PathSegment::cubic_bezier(9.0, 9.0, 8.0, 8.0, 3.0, 4.0),
            PathSegment::smooth_cubic_bezier(8.0, 8.0, 3.0, 4.0),
            PathSegment::quadratic_bezier(9.0, 9.0, 3.0, 4.0),
            PathSegment::smooth_quadratic_bezier(3.0, 4.0),
            PathSegment::elliptical_arc(5.0, 5.0, 0.0, true, false, 3.0, 4.0),
        ] {
            assert_eq!(seg.resolve_endpoint(&ctx), to, "{:?}", seg);
        }
    }

    #[test]
    fn relative_endpoints_offset_the_pen() {
        let ctx = ctx_at(10.0, 20.0);
        let to = V2::new(13.0, 24.0);
        for seg in [
            PathSegment::rel_move_to(3.0, 4.0),
            PathSegment::rel_line_to(3.0, 4.0),
            PathSegment::rel_cubic_bezier(9.0, 9.0, 8.0, 8.0, 3.0, 4.0),
            PathSegment::rel_smooth_cubic_bezier(8.0, 8.0, 3.0, 4.0),
            PathSegment::rel_quadratic_bezier(9.0, 9.0, 3.0, 4.0),
            PathSegment::rel_smooth_quadratic_bezier(3.0, 4.0),
            PathSegment::rel_elliptical_arc(5.0, 5.0, 0.0, true, false, 3.0, 4.0),
        ] {
            assert_eq!(seg.resolve_endpoint(&ctx), to, "{:?}", seg);
        }
    }

    #[test]
    fn axis_aligned_lines_keep_the_other_coordinate() {
        let ctx = ctx_at(10.0, 20.0);
        assert_eq!(
            PathSegment::horizontal_line_to(5.0).resolve_endpoint(&ctx),
            V2::new(5.0, 20.0)
        );
        assert_eq!(
            PathSegment::rel_horizontal_line_to(5.0).resolve_endpoint(&ctx),
            V2::new(15.0, 20.0)
        );
        assert_eq!(
            PathSegment::vertical_line_to(5.0).resolve_endpoint(&ctx),
            V2::new(10.0, 5.0)
        );
        assert_eq!(
            PathSegment::rel_vertical_line_to(5.0).resolve_endpoint(&ctx),
            V2::new(10.0, 25.0)
        );
    }

    #[test]
    fn close_path_returns_to_subpath_start() {
        let mut ctx = ctx_at(10.0, 20.0);
        ctx.subpath_start_point = V2::new(-1.0, -2.0);
        assert_eq!(
            PathSegment::close().resolve_endpoint(&ctx),
            V2::new(-1.0, -2.0)
        );
    }

    #[test]
    fn control_points() {
        let mut ctx = ctx_at(10.0, 10.0);
        ctx.last_cubic_control_point = V2::new(8.0, 6.0);
        ctx.last_quadratic_control_point = V2::new(12.0, 10.0);

        let rel_cubic = PathSegment::rel_cubic_bezier(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(
            rel_cubic.first_cubic_control_point(&ctx),
            Some(V2::new(11.0, 12.0))
        );
        assert_eq!(rel_cubic.cubic_control_point(&ctx), Some(V2::new(13.0, 14.0)));
        assert_eq!(rel_cubic.quadratic_control_point(&ctx), None);

        let smooth_cubic = PathSegment::smooth_cubic_bezier(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            smooth_cubic.first_cubic_control_point(&ctx),
            Some(V2::new(12.0, 14.0))
        );

        let smooth_quad = PathSegment::rel_smooth_quadratic_bezier(5.0, 5.0);
        assert_eq!(
            smooth_quad.quadratic_control_point(&ctx),
            Some(V2::new(8.0, 10.0))
        );
        assert_eq!(smooth_quad.cubic_control_point(&ctx), None);

        assert_eq!(PathSegment::line_to(0.0, 0.0).cubic_control_point(&ctx), None);
    }
}
