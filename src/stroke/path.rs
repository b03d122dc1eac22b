use glam::Vec2;

/// Initial point capacity of a pending path.
const INITIAL_CAPACITY: usize = 60;

/// The in-progress polyline between `begin` and `end`.
///
/// Only one path can be open at a time. Finishing a path hands its points to
/// the tessellator and resets the length, keeping the allocation for reuse.
#[derive(Debug, Clone)]
pub struct PendingPath {
    points: Vec<Vec2>,
}

impl PendingPath {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Whether a path has been started and not yet finished.
    pub fn is_open(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Start a new path at `point`.
    ///
    /// Returns `false` without touching the path if one is already open.
    pub fn begin(&mut self, point: Vec2) -> bool {
        if self.is_open() {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Append a point to the open path.
    pub fn draw_to(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// Finish the path, passing its points to `f` when it has at least two.
    ///
    /// The path is reset afterwards regardless of its length.
    pub fn finish<F>(&mut self, f: F)
    where
        F: FnOnce(&[Vec2]),
    {
        if self.points.len() >= 2 {
            f(&self.points);
        }
        self.points.clear();
    }
}

impl Default for PendingPath {
    fn default() -> Self {
        Self::new()
    }
}
