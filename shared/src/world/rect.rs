//! Integer axis-aligned rectangles in level coordinates.
//!
//! Level coordinates grow right and down. Containment is half-open: a rect
//! covers `x..x2` and `y..y2`. Rects persist as `"x,y,w,h"` strings.

use std::{fmt, num::ParseIntError, str::FromStr};

use bevy::math::IVec2;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RectParseError {
    #[error("expected 4 comma separated fields (x,y,w,h), found {0}")]
    FieldCount(usize),
    #[error("invalid integer '{value}' in rect: {source}")]
    InvalidInteger {
        value: String,
        source: ParseIntError,
    },
    #[error("rect {x},{y},{w},{h} reaches past the coordinate range")]
    OutOfRange { x: i32, y: i32, w: i32, h: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    /// Negative extents collapse to an empty rect at the same origin.
    /// Extents are clamped so `x2` and `y2` stay in range.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: clamp_extent(x, w),
            h: clamp_extent(y, h),
        }
    }

    /// Like [`Rect::new`], but fails instead of clamping when the far edge
    /// would not fit in an `i32`.
    pub fn checked_new(x: i32, y: i32, w: i32, h: i32) -> Option<Self> {
        x.checked_add(w)?;
        y.checked_add(h)?;
        Some(Self::new(x, y, w, h))
    }

    pub fn from_coordinates(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let w = i32::try_from(x1.abs_diff(x2)).unwrap_or(i32::MAX);
        let h = i32::try_from(y1.abs_diff(y2)).unwrap_or(i32::MAX);
        Self::new(x1.min(x2), y1.min(y2), w, h)
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn w(&self) -> i32 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    #[inline]
    pub fn x2(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn y2(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Midpoint using integer division, as entity hitboxes are queried.
    pub fn center(&self) -> IVec2 {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        IVec2::new(mid(self.x, self.x2()), mid(self.y, self.y2()))
    }

    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x2() && p.y < self.y2()
    }

    /// True when the two rects share at least one cell. Rects that only touch
    /// along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.x2() <= other.x || other.x2() <= self.x {
            return false;
        }
        if self.y2() <= other.y || other.y2() <= self.y {
            return false;
        }
        true
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.w, self.h)
    }
}

impl FromStr for Rect {
    type Err = RectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(RectParseError::FieldCount(fields.len()));
        }

        let mut values = [0i32; 4];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|source| RectParseError::InvalidInteger {
                    value: field.to_string(),
                    source,
                })?;
        }

        let [x, y, w, h] = values;
        Rect::checked_new(x, y, w, h).ok_or(RectParseError::OutOfRange { x, y, w, h })
    }
}

const fn clamp_extent(origin: i32, extent: i32) -> i32 {
    let room = i32::MAX.saturating_sub(origin);
    if extent < 0 {
        0
    } else if extent > room {
        room
    } else {
        extent
    }
}

impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
