//! Geometry primitives: [`Coord`] and the eight step directions ([`Dir`]).

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A 2D integer grid coordinate. X grows right, Y grows down (screen
/// coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a coordinate shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The adjacent coordinate one step in `dir`.
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        let d = dir.offset();
        self.shift(d.x, d.y)
    }

    /// All eight neighbours in [`Dir`] table order (clockwise from north).
    #[inline]
    pub fn neighbors_8(self) -> [Coord; 8] {
        [
            self.step(Dir::North),
            self.step(Dir::NorthEast),
            self.step(Dir::East),
            self.step(Dir::SouthEast),
            self.step(Dir::South),
            self.step(Dir::SouthWest),
            self.step(Dir::West),
            self.step(Dir::NorthWest),
        ]
    }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Coord {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// The eight step directions, clockwise from north.
///
/// Discriminants double as the byte encoding used by direction fields:
/// `0` is reserved for "no direction", so `North` starts at 1 and the
/// [`Dir::ALL`] index of a direction is `byte - 1`. Stored fields depend on
/// this exact ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Dir {
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
    NorthWest = 8,
}

impl Dir {
    /// Every direction, in encoding order.
    pub const ALL: [Dir; 8] = [
        Dir::North,
        Dir::NorthEast,
        Dir::East,
        Dir::SouthEast,
        Dir::South,
        Dir::SouthWest,
        Dir::West,
        Dir::NorthWest,
    ];

    /// Unit offset of this direction (y grows down, so north is `(0, -1)`).
    #[inline]
    pub const fn offset(self) -> Coord {
        match self {
            Dir::North => Coord::new(0, -1),
            Dir::NorthEast => Coord::new(1, -1),
            Dir::East => Coord::new(1, 0),
            Dir::SouthEast => Coord::new(1, 1),
            Dir::South => Coord::new(0, 1),
            Dir::SouthWest => Coord::new(-1, 1),
            Dir::West => Coord::new(-1, 0),
            Dir::NorthWest => Coord::new(-1, -1),
        }
    }

    /// Field byte encoding of this direction (1–8).
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Decode a field byte. `0` means "no direction" and yields `None`, as
    /// does anything above 8.
    #[inline]
    pub const fn from_byte(b: u8) -> Option<Dir> {
        match b {
            1 => Some(Dir::North),
            2 => Some(Dir::NorthEast),
            3 => Some(Dir::East),
            4 => Some(Dir::SouthEast),
            5 => Some(Dir::South),
            6 => Some(Dir::SouthWest),
            7 => Some(Dir::West),
            8 => Some(Dir::NorthWest),
            _ => None,
        }
    }

    /// Whether this step changes both axes.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Dir::NorthEast | Dir::SouthEast | Dir::SouthWest | Dir::NorthWest
        )
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::NorthEast => Dir::SouthWest,
            Dir::East => Dir::West,
            Dir::SouthEast => Dir::NorthWest,
            Dir::South => Dir::North,
            Dir::SouthWest => Dir::NorthEast,
            Dir::West => Dir::East,
            Dir::NorthWest => Dir::SouthEast,
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dir::North => "N",
            Dir::NorthEast => "NE",
            Dir::East => "E",
            Dir::SouthEast => "SE",
            Dir::South => "S",
            Dir::SouthWest => "SW",
            Dir::West => "W",
            Dir::NorthWest => "NW",
        };
        f.write_str(s)
    }
}
