//! Approximation of SVG elliptical arcs by chains of cubic Béziers, for backends which can't
//! draw arcs natively.
//!
//! The arc is converted from SVG's endpoint parameterisation to a centre parameterisation (see
//! the 'Elliptical arc implementation notes' of the W3C SVG recommendation), split into equal
//! angular steps, and each step is drawn as a cubic Bézier whose handles follow the ellipse's
//! tangents.  Consecutive spans share their tangent direction at the joins, so the chain is
//! C¹-continuous.

use std::f64::consts::PI;

use angle::{Angle, Deg, Rad};
use log::debug;

use crate::{utils::rotate_vec, ArcParams, V2};

/// The most spans any arc is split into, whatever the [`Subdivision`] asks for
pub const MAX_SPANS: usize = 1024;

/// How many cubic spans an arc is split into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subdivision {
    /// Always use this many spans (at least one, at most [`MAX_SPANS`])
    Fixed(usize),
    /// Use as many spans as needed so that none sweeps through more than `max_step`, up to
    /// [`MAX_SPANS`]
    Adaptive { max_step: Rad<f64> },
}

impl Subdivision {
    fn num_spans(self, sweep_angle: f64) -> usize {
        match self {
            Subdivision::Fixed(n) => n.clamp(1, MAX_SPANS),
            Subdivision::Adaptive { max_step } => {
                let steps = (sweep_angle.abs() / max_step.0.abs()).ceil();
                if !steps.is_finite() || steps < 1.0 {
                    1
                } else if steps > MAX_SPANS as f64 {
                    MAX_SPANS
                } else {
                    steps as usize
                }
            }
        }
    }
}

impl Default for Subdivision {
    fn default() -> Self {
        Subdivision::Fixed(16)
    }
}

/// One cubic Bézier span, starting wherever the previous one ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSpan {
    pub ctrl1: V2,
    pub ctrl2: V2,
    pub to: V2,
}

/// The result of flattening an arc
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenedArc {
    /// The arc is degenerate and is drawn as a straight line
    Line { from: V2, to: V2 },
    /// A chain of cubics starting at `from`
    Curves { from: V2, spans: Vec<CubicSpan> },
}

impl FlattenedArc {
    /// The point at which the approximation ends
    pub fn end(&self) -> V2 {
        match self {
            FlattenedArc::Line { to, .. } => *to,
            FlattenedArc::Curves { from, spans } => spans.last().map_or(*from, |s| s.to),
        }
    }
}

/// The centre parameterisation of an arc, in the ellipse's own (unrotated) frame
#[derive(Debug, Clone, Copy)]
struct CentreArc {
    centre: V2,
    rx: f64,
    ry: f64,
    /// Angle of the start point, in radians
    start_angle: f64,
    /// Signed angle swept through, in radians.  Positive iff the `sweep` flag is set.
    sweep_angle: f64,
}

/// Approximates the arc from `from` to `to` (both absolute) with cubic Béziers.
///
/// Degenerate arcs (a zero or non-finite radius, or coincident end points) become straight
/// lines.  Radii which are too small to reach between the end points are scaled up.  The
/// approximation always starts exactly at `from` and ends exactly at `to`.
pub fn flatten_arc(from: V2, arc: &ArcParams, to: V2, subdivision: Subdivision) -> FlattenedArc {
    let rotation = Deg(arc.x_axis_rotation).to_rad();
    let centre_arc = match to_centre(from, arc, to, rotation) {
        Some(c) => c,
        None => {
            debug!(
                "Degenerate arc from {:?} to {:?} ({:?}); drawing a line instead",
                from, to, arc
            );
            return FlattenedArc::Line { from, to };
        }
    };

    let num_spans = subdivision.num_spans(centre_arc.sweep_angle);
    let step = centre_arc.sweep_angle / num_spans as f64;
    // Length of the handles, as a multiple of the (unit) tangent
    let handle_scale = 4.0 / 3.0 * (step / 4.0).tan();

    // Point and scaled tangent at the `i`th step, in the shape's local space
    let sample = |i: usize| -> (V2, V2) {
        let theta = centre_arc.start_angle + step * i as f64;
        let (sin, cos) = theta.sin_cos();
        let point = V2::new(centre_arc.rx * cos, centre_arc.ry * sin);
        let tangent = V2::new(-centre_arc.rx * sin, centre_arc.ry * cos) * handle_scale;
        let point = if i == 0 {
            from
        } else if i == num_spans {
            to
        } else {
            rotate_vec(point, rotation) + centre_arc.centre
        };
        (point, rotate_vec(tangent, rotation))
    };

    let mut spans = Vec::with_capacity(num_spans);
    let (mut prev_point, mut prev_tangent) = sample(0);
    for i in 1..=num_spans {
        let (point, tangent) = sample(i);
        spans.push(CubicSpan {
            ctrl1: prev_point + prev_tangent,
            ctrl2: point - tangent,
            to: point,
        });
        prev_point = point;
        prev_tangent = tangent;
    }
    FlattenedArc::Curves { from, spans }
}

/// Converts an endpoint-parameterised arc into its centre parameterisation, or returns `None`
/// if the arc should be drawn as a straight line.
fn to_centre(from: V2, arc: &ArcParams, to: V2, rotation: Rad<f64>) -> Option<CentreArc> {
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 || !rx.is_finite() || !ry.is_finite() || from == to {
        return None;
    }

    // Half the chord, in the ellipse's frame
    let half_chord = rotate_vec((from - to) / 2.0, Rad(-rotation.0));
    let (x1, y1) = (half_chord.x, half_chord.y);

    // Scale the radii up if they can't span the chord
    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    // Centre in the ellipse's frame.  Of the two candidate centres, the flags pick the one which
    // gives an arc of the right size going in the right direction.
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let numerator = rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1;
    let denominator = rx * rx * y1 * y1 + ry * ry * x1 * x1;
    let root = sign * (numerator / denominator).max(0.0).sqrt();
    let centre_prime = V2::new(root * rx * y1 / ry, -root * ry * x1 / rx);
    let centre = rotate_vec(centre_prime, rotation) + (from + to) / 2.0;

    // Angles of the two end points on the unit circle
    let start_angle = ((y1 - centre_prime.y) / ry).atan2((x1 - centre_prime.x) / rx);
    let end_angle = ((-y1 - centre_prime.y) / ry).atan2((-x1 - centre_prime.x) / rx);
    let mut sweep_angle = end_angle - start_angle;
    if arc.sweep && sweep_angle < 0.0 {
        sweep_angle += 2.0 * PI;
    } else if !arc.sweep && sweep_angle > 0.0 {
        sweep_angle -= 2.0 * PI;
    }

    Some(CentreArc {
        centre,
        rx,
        ry,
        start_angle,
        sweep_angle,
    })
}
