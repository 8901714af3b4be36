//! Describe a path once, draw it on whichever vector backend the host has.
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s using the SVG path vocabulary.  It can be
//! compiled for two backends:
//! - the primary backend (SVG), whose path grammar covers every segment kind, so compilation is
//!   a 1:1 mapping ([`SvgEmitter`])
//! - the secondary backend (VML), which has no smooth curves or elliptical arcs and only takes
//!   integer coordinates, so compilation threads a [`CompilationContext`] through the path and
//!   flattens arcs into cubic Béziers ([`VmlEmitter`])
//!
//! [`Shape`] is a small owner which holds a [`Path`] and caches its compiled form.

use vector2d::Vector2D;

pub mod compile;
mod error;
mod events;
pub mod path;
mod shape;
mod utils;

pub use compile::{
    Backend, CompilationContext, CompileOpts, Emitter, Subdivision, SvgEmitter, VmlEmitter,
    VML_SCALE,
};
pub use error::PathError;
pub use events::{ChangeRaiser, ListenerId};
pub use path::{ArcParams, Coords, Path, PathSegment, SegmentMut};
pub use shape::Shape;

/// Type alias for 2D floating point vectors (in the geometric sense, unlike [`Vec`])
pub type V2 = Vector2D<f64>;
