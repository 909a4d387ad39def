use crate::errors::SearchError;
use crate::geometry::{Point, ORTHOGONAL};
use crate::graph_algos::graph::Graph;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Number of cells along one axis of the inclusive range lo..=hi
/// None for inverted ranges or ones that do not fit in memory indices.
fn span(lo: i64, hi: i64) -> Option<usize> {
    let cells = hi.checked_sub(lo)?.checked_add(1)?;
    usize::try_from(cells).ok()
}

fn cell_count(x0: i64, y0: i64, x1: i64, y1: i64) -> Option<usize> {
    span(x0, x1)?.checked_mul(span(y0, y1)?)
}


/// Rectangular grid with inclusive bounds (x0, y0)..=(x1, y1)
/// Cells are stored row-major, `data` always holds exactly one value per cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(
    try_from = "RawGrid<T>",
    bound(deserialize = "T: Deserialize<'de>"),
))]
pub struct Grid<T> {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    data: Vec<T>,
}

/// Serialized form, checked before it becomes a Grid
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid<T> {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = SearchError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let RawGrid { x0, y0, x1, y1, data } = raw;
        let expected = cell_count(x0, y0, x1, y1)
            .ok_or(SearchError::InvalidBounds { x0, y0, x1, y1 })?;
        if data.len() != expected {
            return Err(SearchError::CellCount { expected, found: data.len() });
        }
        Ok(Self { x0, y0, x1, y1, data })
    }
}

impl<T> Grid<T> {

    /// Create a grid with every cell set to `T::default()`
    /// A single row or column is allowed. Inverted bounds, or bounds whose cell
    /// count overflows, are rejected.
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Result<Self, SearchError>
    where
        T: Default + Clone,
    {
        let size = cell_count(x0, y0, x1, y1)
            .ok_or(SearchError::InvalidBounds { x0, y0, x1, y1 })?;
        Ok(Self { x0, y0, x1, y1, data: vec![T::default(); size] })
    }

    /// Build a grid from rows, the first row is y = 0 and the first column x = 0
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, SearchError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(SearchError::EmptyGrid);
        }
        let height = rows.len();

        let mut data = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(SearchError::RaggedRows { row, expected: width, found: cells.len() });
            }
            data.extend(cells);
        }

        Ok(Self {
            x0: 0,
            y0: 0,
            x1: width as i64 - 1,
            y1: height as i64 - 1,
            data,
        })
    }

    pub fn width(&self) -> usize {
        span(self.x0, self.x1).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        span(self.y0, self.y1).unwrap_or(0)
    }

    /// Top left corner
    pub fn min_point(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Bottom right corner
    pub fn max_point(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn in_bounds(&self, p: &Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    fn index(&self, p: &Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| ((p.x - self.x0) as usize) + ((p.y - self.y0) as usize) * self.width())
    }

    /// Cell value, None out of bounds
    pub fn get(&self, p: &Point) -> Option<&T> {
        self.data.get(self.index(p)?)
    }

    pub fn get_mut(&mut self, p: &Point) -> Option<&mut T> {
        let i = self.index(p)?;
        self.data.get_mut(i)
    }

    pub fn set(&mut self, p: Point, value: T) -> Result<(), SearchError> {
        let cell = self.get_mut(&p).ok_or(SearchError::OutOfBounds(p))?;
        *cell = value;
        Ok(())
    }

    /// Set every cell on a horizontal, vertical or 45 degree diagonal line,
    /// both ends included
    pub fn draw_line(&mut self, from: Point, to: Point, value: T) -> Result<(), SearchError>
    where
        T: Clone,
    {
        for end in [from, to] {
            if !self.in_bounds(&end) {
                return Err(SearchError::OutOfBounds(end));
            }
        }

        // both ends are in bounds, so the deltas fit
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return Err(SearchError::UnsupportedLine { from, to });
        }

        let (step_x, step_y) = (dx.signum(), dy.signum());
        for i in 0..=dx.abs().max(dy.abs()) {
            self.set(from.moved(step_x * i, step_y * i), value.clone())?;
        }
        Ok(())
    }

    /// All points in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| Point::new(x, y)))
    }

    /// Points with their cell values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.data.iter())
    }

    /// In-bounds orthogonal neighbours
    pub fn adjacent(&self, p: &Point) -> Vec<Point> {
        p.neighbors4().filter(|n| self.in_bounds(n)).collect()
    }

    /// Move by (dx, dy), wrapping around the edges like a torus
    pub fn wrap(&self, p: &Point, dx: i64, dy: i64) -> Point {
        let moved = p.moved(dx, dy);
        Point::new(
            self.x0 + (moved.x - self.x0).rem_euclid(self.width() as i64),
            self.y0 + (moved.y - self.y0).rem_euclid(self.height() as i64),
        )
    }

    /// Orthogonal neighbours, wrapping around the edges
    pub fn adjacent_wrap(&self, p: &Point) -> Vec<Point> {
        ORTHOGONAL.iter().map(|&(dx, dy)| self.wrap(p, dx, dy)).collect()
    }

    /// Build a graph over the cells with 4-directional adjacency
    /// `cost_fn(from, from_value, to, to_value)` gives the edge cost, None for no edge.
    /// Every cell gets a node entry, even without outgoing edges.
    pub fn to_graph<C, F>(&self, cost_fn: F) -> Graph<Point, C>
    where
        F: Fn(&Point, &T, &Point, &T) -> Option<C>,
    {
        let mut graph = Graph::with_capacity(self.data.len());
        for (p, value) in self.iter() {
            graph.add_node(p);
            for n in self.adjacent(&p) {
                let Some(next) = self.get(&n) else { continue };
                if let Some(cost) = cost_fn(&p, value, &n, next) {
                    graph.add_edge(p, n, cost);
                }
            }
        }
        graph
    }
}

/// Rows of space separated cells
impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.data
            .chunks(self.width())
            .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))
            .collect();
        write!(f, "{}", rows.join("\n"))
    }
}
