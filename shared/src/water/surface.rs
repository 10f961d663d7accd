//! Surface segments of a water area.
//!
//! The top row of an area is split into runs of open (non-solid) columns.
//! Waves live inside one run and bounce off its ends. Segments are derived
//! from level geometry once and cached; nothing watches the geometry, so
//! whoever edits solids must call [`SurfaceSegments::invalidate`] (or the
//! manager-level helpers) for the affected areas.

use nonempty::NonEmpty;

use crate::world::{Rect, Solidity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSegment {
    pub begin: i32,
    pub end: i32,
}

impl SurfaceSegment {
    /// Placeholder span used when an area has no open column at all.
    pub const EMPTY: SurfaceSegment = SurfaceSegment { begin: 0, end: 0 };

    pub const fn new(begin: i32, end: i32) -> Self {
        Self { begin, end }
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.begin && x <= self.end
    }
}

/// Scans `rect`'s top row left to right.
///
/// The last column of the rect is treated as solid so an open run always gets
/// closed. A rect with no open run yields the single [`SurfaceSegment::EMPTY`]
/// span, which keeps later lookups off an empty list.
pub fn scan_surface_segments(rect: &Rect, level: &dyn Solidity) -> NonEmpty<SurfaceSegment> {
    let mut segments = Vec::new();
    let mut prev_solid = true;
    let mut begin = 0;

    let y = rect.y();
    let last = rect.x2() - 1;
    for x in rect.x()..rect.x2() {
        let solid = x == last || level.solid(x, y);
        if solid && !prev_solid {
            segments.push(SurfaceSegment::new(begin, x));
        } else if !solid && prev_solid {
            begin = x;
        }

        prev_solid = solid;
    }

    NonEmpty::from_vec(segments).unwrap_or_else(|| NonEmpty::new(SurfaceSegment::EMPTY))
}

/// Lazily computed segment list for one area.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSegments {
    cached: Option<NonEmpty<SurfaceSegment>>,
}

impl SurfaceSegments {
    /// Computes the segments if the cache is empty and returns them.
    pub fn ensure(&mut self, rect: &Rect, level: &dyn Solidity) -> &NonEmpty<SurfaceSegment> {
        self.cached
            .get_or_insert_with(|| scan_surface_segments(rect, level))
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    pub fn get(&self) -> Option<&NonEmpty<SurfaceSegment>> {
        self.cached.as_ref()
    }

    /// First cached segment containing `x`, if any were computed.
    pub fn find_containing(&self, x: i32) -> Option<SurfaceSegment> {
        self.cached
            .as_ref()?
            .iter()
            .find(|segment| segment.contains_x(x))
            .copied()
    }
}
