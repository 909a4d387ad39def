use std::fmt;

use num_traits::{Num, Signed, Float};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// Offsets of the 4 orthogonal neighbours: left, up, right, down
pub(crate) const ORTHOGONAL: [(i64, i64); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];


/// 2D integer Point, the usual node key for grid searches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Point offset by (dx, dy)
    pub fn moved(self, dx: i64, dy: i64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Manhattan distance to another point
    pub fn distance(&self, other: &Point) -> i64 {
        manhattan_distance(self.x, self.y, other.x, other.y)
    }

    pub fn x_distance(&self, other: &Point) -> i64 {
        (self.x - other.x).abs()
    }

    pub fn y_distance(&self, other: &Point) -> i64 {
        (self.y - other.y).abs()
    }

    /// The 4 orthogonal neighbours, unbounded
    pub fn neighbors4(self) -> impl Iterator<Item = Point> {
        ORTHOGONAL.into_iter().map(move |(dx, dy)| self.moved(dx, dy))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}
