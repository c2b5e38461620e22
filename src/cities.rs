//! Distance model for the plane TSP.
//!
//! [`Cities`] holds the immutable coordinates of every city and answers
//! distance queries for visiting orders. It is built once from input and then
//! shared read-only (behind an `Arc`) by every chromosome and population that
//! works on the same instance.
//!
//! # Text format
//!
//! Cities are read as whitespace-separated integer pairs, one `x y` pair per
//! city. Line structure is irrelevant; `"0 0\n0 1"` and `"0 0 0 1"` describe
//! the same two cities. [`Display`](std::fmt::Display) writes one `x\ty` line
//! per city, which parses back to the same instance.

use crate::error::{Result, TspError};
use crate::ga::operators::is_permutation;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Integer coordinates of one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Plane Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Coord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An ordered list of city coordinates.
///
/// Index `i` in `0..size()` addresses the `i`-th city. A visiting order is a
/// slice holding each index exactly once.
///
/// # Examples
///
/// ```
/// use u_tspga::Cities;
///
/// let cities: Cities = "0 0  0 1  1 1  1 0".parse().unwrap();
/// assert_eq!(cities.size(), 4);
/// assert!((cities.total_path_distance(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cities {
    coords: Vec<Coord>,
}

impl Cities {
    /// Builds a distance model from coordinates.
    ///
    /// Fails with [`TspError::DegenerateInput`] for fewer than two cities,
    /// which cannot form a tour worth optimizing.
    pub fn new<C: Into<Coord>>(coords: impl IntoIterator<Item = C>) -> Result<Self> {
        let coords: Vec<Coord> = coords.into_iter().map(Into::into).collect();
        if coords.len() < 2 {
            return Err(TspError::degenerate(format!(
                "at least 2 cities are required, got {}",
                coords.len()
            )));
        }
        Ok(Self { coords })
    }

    /// Reads cities from any reader in the text format described above.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Reads cities from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.coords.len()
    }

    /// The coordinates, in index order.
    pub fn elements(&self) -> &[Coord] {
        &self.coords
    }

    /// Euclidean distance between cities `a` and `b`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.coords[a].distance_to(&self.coords[b])
    }

    /// Length of the closed tour visiting the cities in `order` and returning
    /// to the first one.
    ///
    /// Fails with [`TspError::InvalidArgument`] if `order` is not a
    /// permutation of `0..size()`.
    pub fn total_path_distance(&self, order: &[usize]) -> Result<f64> {
        self.check_order(order)?;
        Ok(self.tour_length(order))
    }

    /// Closed tour length without validating `order`.
    pub(crate) fn tour_length(&self, order: &[usize]) -> f64 {
        order
            .iter()
            .zip(order.iter().cycle().skip(1))
            .map(|(&a, &b)| self.distance(a, b))
            .sum()
    }

    /// Returns a uniformly random permutation of `0..len`.
    pub fn random_permutation<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..len).collect();
        perm.shuffle(rng);
        perm
    }

    /// Returns a new model whose `i`-th city is this model's
    /// `ordering[i]`-th city.
    ///
    /// `ordering` must be a permutation of `0..size()`.
    pub fn reorder(&self, ordering: &[usize]) -> Result<Cities> {
        self.check_order(ordering)?;
        Ok(Cities {
            coords: ordering.iter().map(|&i| self.coords[i]).collect(),
        })
    }

    fn check_order(&self, order: &[usize]) -> Result<()> {
        if order.len() != self.size() {
            return Err(TspError::invalid_argument(format!(
                "order has length {}, expected {}",
                order.len(),
                self.size()
            )));
        }
        if !is_permutation(order, self.size()) {
            return Err(TspError::invalid_argument(format!(
                "order is not a permutation of 0..{}",
                self.size()
            )));
        }
        Ok(())
    }
}

impl FromStr for Cities {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token
                    .parse::<i32>()
                    .map_err(|e| TspError::Parse(format!("token {} ({token:?}): {e}", i + 1)))
            })
            .collect::<Result<Vec<i32>>>()?;

        if values.len() % 2 != 0 {
            return Err(TspError::Parse(format!(
                "odd number of coordinates ({}); last city has no y value",
                values.len()
            )));
        }

        Cities::new(values.chunks_exact(2).map(|xy| Coord::new(xy[0], xy[1])))
    }
}

impl fmt::Display for Cities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.coords {
            writeln!(f, "{}\t{}", c.x, c.y)?;
        }
        Ok(())
    }
}
