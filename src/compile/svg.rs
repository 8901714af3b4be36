//! Primary backend: SVG path data.  Every segment kind exists natively in SVG, so each segment
//! maps to exactly one command and no state is needed.

use itertools::Itertools;

use crate::{Path, PathSegment, V2};

use super::Emitter;

/// Compiles a [`Path`] into the value of an SVG `<path>` element's `d` attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEmitter;

impl Emitter for SvgEmitter {
    fn compile(&self, path: &Path) -> String {
        path.iter().map(PathSegment::to_svg_command).join("")
    }
}

impl PathSegment {
    /// The SVG path command for this segment, e.g. `C1,2,3,4,5,6` or `h-4`
    pub fn to_svg_command(&self) -> String {
        match *self {
            PathSegment::MoveTo { coords, to } => format!("{}{}", coords.letter('M'), pt(to)),
            PathSegment::LineTo { coords, to } => format!("{}{}", coords.letter('L'), pt(to)),
            PathSegment::HorizontalLineTo { coords, x } => {
                format!("{}{}", coords.letter('H'), num(x))
            }
            PathSegment::VerticalLineTo { coords, y } => {
                format!("{}{}", coords.letter('V'), num(y))
            }
            PathSegment::CubicBezier {
                coords,
                ctrl1,
                ctrl2,
                to,
            } => format!(
                "{}{},{},{}",
                coords.letter('C'),
                pt(ctrl1),
                pt(ctrl2),
                pt(to)
            ),
            PathSegment::SmoothCubicBezier { coords, ctrl2, to } => {
                format!("{}{},{}", coords.letter('S'), pt(ctrl2), pt(to))
            }
            PathSegment::QuadraticBezier { coords, ctrl, to } => {
                format!("{}{},{}", coords.letter('Q'), pt(ctrl), pt(to))
            }
            PathSegment::SmoothQuadraticBezier { coords, to } => {
                format!("{}{}", coords.letter('T'), pt(to))
            }
            PathSegment::EllipticalArc { coords, arc, to } => format!(
                "{}{},{},{},{},{},{}",
                coords.letter('A'),
                num(arc.rx),
                num(arc.ry),
                num(arc.x_axis_rotation),
                flag(arc.large_arc),
                flag(arc.sweep),
                pt(to)
            ),
            PathSegment::ClosePath => "Z".to_owned(),
        }
    }
}

/// Formats a number as the shortest string which round-trips.  Negative zero is written `0`.
fn num(v: f64) -> String {
    (v + 0.0).to_string()
}

fn pt(p: V2) -> String {
    format!("{},{}", num(p.x), num(p.y))
}

fn flag(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}
