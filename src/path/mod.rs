//! The [`Path`] container: an ordered, mutable list of [`PathSegment`]s which tells its
//! listeners whenever it changes.

use std::{
    fmt::{Debug, Formatter},
    iter::FromIterator,
    ops::{Deref, DerefMut},
};

use log::trace;

use crate::{
    events::{ChangeRaiser, ListenerId},
    PathError,
};

mod segment;

pub use segment::{ArcParams, Coords, PathSegment};

/// An ordered sequence of [`PathSegment`]s, owned by a drawable shape.
///
/// Order is significant and is only ever changed through the methods on `Path`.  Every
/// mutating call raises exactly one change notification once the mutation has completed, and
/// bumps the [`version`](Self::version) counter which consumers can use as a cache key.
pub struct Path {
    segments: Vec<PathSegment>,
    /// Incremented on every mutation
    version: u64,
    changes: ChangeRaiser,
}

impl Path {
    /// Creates an empty `Path` with no listeners
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            version: 0,
            changes: ChangeRaiser::new(),
        }
    }

    /* READING */

    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Gets the segment at `index`, which must be in `0..count()`
    pub fn get(&self, index: usize) -> Result<&PathSegment, PathError> {
        self.check_index(index)?;
        Ok(&self.segments[index])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    /// A counter which changes whenever the `Path` is mutated.  Any string compiled from this
    /// `Path` is only valid for the version it was compiled at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /* MUTATION */

    /// Adds a segment to the end of the `Path`
    pub fn append(&mut self, segment: PathSegment) {
        self.segments.push(segment);
        self.changed("append");
    }

    /// Inserts a segment so that it ends up at `index`.  `index` must be in `0..=count()`, so
    /// inserting at `count()` is the same as [`append`](Self::append)ing.
    pub fn insert_at(&mut self, segment: PathSegment, index: usize) -> Result<(), PathError> {
        if index > self.segments.len() {
            return Err(self.out_of_range(index));
        }
        self.segments.insert(index, segment);
        self.changed("insert");
        Ok(())
    }

    /// Replaces the segment at `index`, returning the old one
    pub fn replace_at(
        &mut self,
        segment: PathSegment,
        index: usize,
    ) -> Result<PathSegment, PathError> {
        self.check_index(index)?;
        let old = std::mem::replace(&mut self.segments[index], segment);
        self.changed("replace");
        Ok(old)
    }

    /// Removes and returns the segment at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<PathSegment, PathError> {
        self.check_index(index)?;
        let old = self.segments.remove(index);
        self.changed("remove");
        Ok(old)
    }

    /// Removes every segment.  This always raises one notification, even if the `Path` was
    /// already empty.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.changed("clear");
    }

    /// Gets a guard which gives mutable access to the fields of the segment at `index`.  The
    /// `Path` raises one change notification when the guard is dropped.
    pub fn get_mut(&mut self, index: usize) -> Result<SegmentMut<'_>, PathError> {
        self.check_index(index)?;
        Ok(SegmentMut { path: self, index })
    }

    /* LISTENERS */

    /// Registers a function to be called after every change to this `Path`
    pub fn on_change(&self, listener: impl FnMut() + 'static) -> ListenerId {
        self.changes.register(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.changes.unregister(id)
    }

    /* HELPERS */

    fn changed(&mut self, what: &str) {
        self.version += 1;
        trace!(
            "Path {} (now {} segments, version {})",
            what,
            self.segments.len(),
            self.version
        );
        self.changes.raise();
    }

    fn check_index(&self, index: usize) -> Result<(), PathError> {
        if index < self.segments.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> PathError {
        PathError::IndexOutOfRange {
            index,
            len: self.segments.len(),
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("segments", &self.segments)
            .field("version", &self.version)
            .finish()
    }
}

/// Builds a `Path` without raising any notifications (there can't be any listeners yet)
impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
            version: 0,
            changes: ChangeRaiser::new(),
        }
    }
}

impl<'p> IntoIterator for &'p Path {
    type Item = &'p PathSegment;
    type IntoIter = std::slice::Iter<'p, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Mutable access to one segment of a [`Path`].  When this is dropped, the owning `Path` raises
/// a single change notification, however many fields were modified.
pub struct SegmentMut<'p> {
    path: &'p mut Path,
    index: usize,
}

impl Deref for SegmentMut<'_> {
    type Target = PathSegment;

    fn deref(&self) -> &PathSegment {
        &self.path.segments[self.index]
    }
}

impl DerefMut for SegmentMut<'_> {
    fn deref_mut(&mut self) -> &mut PathSegment {
        &mut self.path.segments[self.index]
    }
}

impl Drop for SegmentMut<'_> {
    fn drop(&mut self) {
        self.path.changed("segment edit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::V2;
    use std::{cell::Cell, rc::Rc};

    fn counted(path: &Path) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        path.on_change(move || c.set(c.get() + 1));
        count
    }

    fn sample() -> Path {
        vec![
            PathSegment::move_to(0.0, 0.0),
            PathSegment::line_to(10.0, 0.0),
            PathSegment::line_to(10.0, 10.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn append_notifies_once_per_call() {
        let mut path = Path::new();
        let count = counted(&path);
        path.append(PathSegment::move_to(0.0, 0.0));
        path.append(PathSegment::line_to(1.0, 0.0));
        path.append(PathSegment::close());
        assert_eq!(count.get(), 3);
        assert_eq!(path.count(), 3);
        assert_eq!(path.version(), 3);
    }

    #[test]
    fn clear_on_empty_path_notifies_once() {
        let mut path = Path::new();
        let count = counted(&path);
        path.clear();
        assert_eq!(count.get(), 1);
        assert!(path.is_empty());
    }

    #[test]
    fn insert_at_end_appends() {
        let mut path = sample();
        let n = path.count();
        path.insert_at(PathSegment::close(), n).unwrap();
        assert_eq!(path.get(n), Ok(&PathSegment::close()));
    }

    #[test]
    fn insert_keeps_order() {
        let mut path = sample();
        path.insert_at(PathSegment::line_to(5.0, 5.0), 1).unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::move_to(0.0, 0.0),
                PathSegment::line_to(5.0, 5.0),
                PathSegment::line_to(10.0, 0.0),
                PathSegment::line_to(10.0, 10.0),
            ]
        );
    }

    #[test]
    fn index_contract() {
        let mut path = sample();
        let count = counted(&path);
        let n = path.count();
        let err = PathError::IndexOutOfRange { index: n, len: n };

        assert_eq!(path.remove_at(n), Err(err));
        assert_eq!(path.get(n), Err(err));
        assert_eq!(path.replace_at(PathSegment::close(), n), Err(err));
        assert!(path.get_mut(n).is_err());
        assert_eq!(
            path.insert_at(PathSegment::close(), n + 1),
            Err(PathError::IndexOutOfRange { index: n + 1, len: n })
        );
        // A "negative" index wraps to a huge `usize`
        assert!(path.insert_at(PathSegment::close(), -1isize as usize).is_err());

        // Failed calls don't change or notify anything
        assert_eq!(count.get(), 0);
        assert_eq!(path.count(), n);
        assert_eq!(path.version(), 0);
    }

    #[test]
    fn replace_and_remove_return_old_segment() {
        let mut path = sample();
        let count = counted(&path);
        let old = path.replace_at(PathSegment::close(), 2).unwrap();
        assert_eq!(old, PathSegment::line_to(10.0, 10.0));
        let removed = path.remove_at(0).unwrap();
        assert_eq!(removed, PathSegment::move_to(0.0, 0.0));
        assert_eq!(path.count(), 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn segment_edits_surface_as_one_path_change() {
        let mut path = sample();
        let count = counted(&path);
        {
            let mut seg = path.get_mut(1).unwrap();
            if let PathSegment::LineTo { to, .. } = &mut *seg {
                to.x = 42.0;
                to.y = 43.0;
            }
        }
        assert_eq!(count.get(), 1);
        assert_eq!(path.version(), 1);
        assert_eq!(path.get(1), Ok(&PathSegment::line_to(42.0, 43.0)));
    }

    #[test]
    fn removed_listener_stops_hearing() {
        let mut path = Path::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = path.on_change(move || c.set(c.get() + 1));
        path.append(PathSegment::move_to(0.0, 0.0));
        path.remove_listener(id);
        path.append(PathSegment::line_to(1.0, 1.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn iteration_follows_order() {
        let path = sample();
        let ends = path
            .iter()
            .filter_map(|s| match s {
                PathSegment::LineTo { to, .. } => Some(*to),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(ends, vec![V2::new(10.0, 0.0), V2::new(10.0, 10.0)]);
    }
}
