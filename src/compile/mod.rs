//! Compilation of [`Path`]s into the path strings of the two rendering backends.

use log::trace;

use crate::Path;

pub mod arc;
mod context;
pub mod svg;
pub mod vml;

pub use arc::Subdivision;
pub use context::CompilationContext;
pub use svg::SvgEmitter;
pub use vml::{quantize, VmlEmitter, VML_SCALE};

/// A strategy for turning a whole [`Path`] into one backend's path string.
///
/// Compilation is pure: the same `Path` always compiles to the same string, and no state is
/// kept between calls.  Callers which need to avoid recompiling should cache on
/// [`Path::version`].
pub trait Emitter {
    fn compile(&self, path: &Path) -> String;
}

/// The rendering backends which paths can be compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// SVG: the full path grammar is available
    Svg,
    /// VML: absolute, integer-only commands without arcs or smooth curves
    Vml,
}

impl Backend {
    /// Compiles `path` with this backend's [`Emitter`]
    pub fn compile(self, path: &Path, opts: &CompileOpts) -> String {
        let compiled = match self {
            Backend::Svg => SvgEmitter.compile(path),
            Backend::Vml => VmlEmitter::new(opts.clone()).compile(path),
        };
        trace!(
            "Compiled {} segments for {:?} into {} bytes",
            path.count(),
            self,
            compiled.len()
        );
        compiled
    }
}

/// Configuration for how paths are compiled.  Only the VML backend has anything to configure.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOpts {
    /// How finely elliptical arcs are split into cubic Béziers.  Defaults to 16 equal spans.
    pub arc_subdivision: Subdivision,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            arc_subdivision: Subdivision::default(),
        }
    }
}
