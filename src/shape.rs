//! A drawable shape which owns a [`Path`] and knows how to present it to the active backend.

use simple_xml_builder::XMLElement;

use crate::{
    compile::{quantize, Backend, CompileOpts},
    Path, PathSegment, V2,
};

/// A shape whose outline is an arbitrary [`Path`].
///
/// The compiled path string is cached and only recompiled when the path's
/// [`version`](Path::version), the backend or the options change.
#[derive(Debug)]
pub struct Shape {
    path: Path,
    backend: Backend,
    opts: CompileOpts,
    cache: Option<CompiledPath>,
}

#[derive(Debug, Clone)]
struct CompiledPath {
    backend: Backend,
    version: u64,
    string: String,
}

impl Shape {
    /// Creates a `Shape` with an empty [`Path`]
    pub fn new(backend: Backend) -> Self {
        Self::with_path(backend, Path::new())
    }

    pub fn with_path(backend: Backend, path: Path) -> Self {
        Self {
            path,
            backend,
            opts: CompileOpts::default(),
            cache: None,
        }
    }

    /* CONVENIENCE CONSTRUCTORS */

    /// A closed polygon through `points`
    pub fn polygon(backend: Backend, points: impl IntoIterator<Item = V2>) -> Self {
        let mut path = polyline_path(points);
        if !path.is_empty() {
            path.append(PathSegment::close());
        }
        Self::with_path(backend, path)
    }

    /// An open chain of straight lines through `points`
    pub fn polyline(backend: Backend, points: impl IntoIterator<Item = V2>) -> Self {
        Self::with_path(backend, polyline_path(points))
    }

    /// An axis-aligned rectangle with its top-left corner at `origin`
    pub fn rectangle(backend: Backend, origin: V2, size: V2) -> Self {
        let path = vec![
            PathSegment::move_to(origin.x, origin.y),
            PathSegment::rel_horizontal_line_to(size.x),
            PathSegment::rel_vertical_line_to(size.y),
            PathSegment::rel_horizontal_line_to(-size.x),
            PathSegment::close(),
        ]
        .into_iter()
        .collect();
        Self::with_path(backend, path)
    }

    /// An axis-aligned ellipse, drawn as two half-arcs
    pub fn ellipse(backend: Backend, centre: V2, rx: f64, ry: f64) -> Self {
        let left = V2::new(centre.x - rx, centre.y);
        let right = V2::new(centre.x + rx, centre.y);
        let path = vec![
            PathSegment::move_to(left.x, left.y),
            PathSegment::elliptical_arc(rx, ry, 0.0, false, true, right.x, right.y),
            PathSegment::elliptical_arc(rx, ry, 0.0, false, true, left.x, left.y),
            PathSegment::close(),
        ]
        .into_iter()
        .collect();
        Self::with_path(backend, path)
    }

    pub fn circle(backend: Backend, centre: V2, radius: f64) -> Self {
        Self::ellipse(backend, centre, radius, radius)
    }

    /* ACCESSORS */

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutable access to the path.  The path may be replaced outright, and a new `Path` can
    /// reach the cached version number, so the cached compiled string is dropped.
    pub fn path_mut(&mut self) -> &mut Path {
        self.cache = None;
        &mut self.path
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    pub fn opts(&self) -> &CompileOpts {
        &self.opts
    }

    pub fn set_opts(&mut self, opts: CompileOpts) {
        self.opts = opts;
        self.cache = None;
    }

    /* PRESENTATION */

    /// The path string for the active backend, compiling it if the cached copy is stale
    pub fn compiled(&mut self) -> &str {
        let version = self.path.version();
        let is_fresh = matches!(
            &self.cache,
            Some(c) if c.backend == self.backend && c.version == version
        );
        if !is_fresh {
            self.cache = None;
        }
        let (backend, path, opts) = (self.backend, &self.path, &self.opts);
        let cache = self.cache.get_or_insert_with(|| CompiledPath {
            backend,
            version,
            string: backend.compile(path, opts),
        });
        &cache.string
    }

    /// Generates the XML element which draws this `Shape` on the active backend
    pub fn to_xml(&mut self) -> XMLElement {
        let backend = self.backend;
        let path_str = self.compiled().to_owned();
        match backend {
            Backend::Svg => {
                let mut elem = XMLElement::new("path");
                elem.add_attribute("d", &path_str);
                elem.add_attribute("fill-rule", "evenodd");
                elem
            }
            Backend::Vml => {
                // The shape is 1x1 local units; `coordsize` says how many path units that is,
                // which must match the quantization of the path itself
                let unit = quantize(1.0);
                let mut elem = XMLElement::new("vml:shape");
                elem.add_attribute("path", &path_str);
                elem.add_attribute("coordorigin", &format!("{} {}", quantize(0.0), quantize(0.0)));
                elem.add_attribute("coordsize", &format!("{} {}", unit, unit));
                elem.add_attribute("style", "position:absolute;width:1px;height:1px");
                elem
            }
        }
    }
}

/// A `MoveTo` to the first point, then a `LineTo` to every other point
fn polyline_path(points: impl IntoIterator<Item = V2>) -> Path {
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            if i == 0 {
                PathSegment::move_to(p.x, p.y)
            } else {
                PathSegment::line_to(p.x, p.y)
            }
        })
        .collect()
}
