//! Secondary backend: VML path strings.
//!
//! VML only takes integer coordinates, has no smooth-curve shorthands and no elliptical arcs.
//! This backend therefore resolves every segment to absolute coordinates using a
//! [`CompilationContext`], reflects control points for smooth curves, degree-elevates quadratics
//! to cubics and flattens arcs into cubic chains.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::warn;

use crate::{utils, Path, PathSegment, V2};

use super::{
    arc::{self, FlattenedArc},
    CompilationContext, CompileOpts, Emitter,
};

/// The fixed-point scale of VML coordinates: one unit of the shape's local space is this many
/// VML units.  Every coordinate written for VML (path points, `coordsize`, etc.) must go through
/// [`quantize`] so that they all agree.
pub const VML_SCALE: f64 = 1000.0;

/// A coordinate converted onto VML's integer grid.  Displays as an integer (or `NaN`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantized(f64);

impl Display for Quantized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a local-space coordinate to VML's integer grid
pub fn quantize(v: f64) -> Quantized {
    if !v.is_finite() {
        warn!("Non-finite coordinate {} passed to VML", v);
    }
    // `+ 0.0` turns `-0` into `0`
    Quantized((v * VML_SCALE).round() + 0.0)
}

/// Compiles a [`Path`] into the value of a VML `<shape>` element's `path` attribute
#[derive(Debug, Clone, Default)]
pub struct VmlEmitter {
    opts: CompileOpts,
}

impl VmlEmitter {
    pub fn new(opts: CompileOpts) -> Self {
        Self { opts }
    }
}

impl Emitter for VmlEmitter {
    fn compile(&self, path: &Path) -> String {
        let mut ctx = CompilationContext::new();
        let mut out = String::new();
        for segment in path {
            out.push_str(&segment.to_vml_command(&ctx, &self.opts));
            ctx.advance(segment);
        }
        out
    }
}

impl PathSegment {
    /// The VML commands which draw this segment, given the state of the path just before it.
    /// This may be several commands (e.g. for arcs).
    pub fn to_vml_command(&self, ctx: &CompilationContext, opts: &CompileOpts) -> String {
        let current = ctx.current_point;
        match *self {
            PathSegment::MoveTo { .. } => format!("m{}", pt(self.resolve_endpoint(ctx))),
            PathSegment::LineTo { .. }
            | PathSegment::HorizontalLineTo { .. }
            | PathSegment::VerticalLineTo { .. } => {
                format!("l{}", pt(self.resolve_endpoint(ctx)))
            }
            PathSegment::CubicBezier { .. } | PathSegment::SmoothCubicBezier { .. } => {
                // Both of these are always `Some` for cubic segments
                let ctrl1 = self.first_cubic_control_point(ctx).unwrap_or(current);
                let ctrl2 = self.cubic_control_point(ctx).unwrap_or(current);
                cubic(ctrl1, ctrl2, self.resolve_endpoint(ctx))
            }
            PathSegment::QuadraticBezier { .. } | PathSegment::SmoothQuadraticBezier { .. } => {
                let ctrl = self.quadratic_control_point(ctx).unwrap_or(current);
                let to = self.resolve_endpoint(ctx);
                // VML's own quadratic command isn't reliable, so elevate to a cubic
                cubic(
                    utils::lerp(current, ctrl, 2.0 / 3.0),
                    utils::lerp(to, ctrl, 2.0 / 3.0),
                    to,
                )
            }
            PathSegment::EllipticalArc { arc, .. } => {
                let to = self.resolve_endpoint(ctx);
                match arc::flatten_arc(current, &arc, to, opts.arc_subdivision) {
                    FlattenedArc::Line { from, to } => format!("l{},{}", pt(from), pt(to)),
                    FlattenedArc::Curves { from, spans } => {
                        let curves = spans
                            .iter()
                            .map(|s| cubic(s.ctrl1, s.ctrl2, s.to))
                            .join("");
                        format!("l{}{}", pt(from), curves)
                    }
                }
            }
            // Close the subpath, then move explicitly to its start so that the pen is where the
            // following segments expect it to be
            PathSegment::ClosePath => format!("xm{}", pt(ctx.subpath_start_point)),
        }
    }
}

fn pt(p: V2) -> String {
    format!("{},{}", quantize(p.x), quantize(p.y))
}

fn cubic(ctrl1: V2, ctrl2: V2, to: V2) -> String {
    format!("c{},{},{}", pt(ctrl1), pt(ctrl2), pt(to))
}
