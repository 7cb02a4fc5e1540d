//! Landmark storage for estimated hand keypoints.

type Position = [f32; 3];

/// A fixed-length collection of landmark positions.
///
/// Positions are stored as X/Y/Z triples in normalized image coordinates. The
/// Z coordinate is carried along unchanged but is not used by any consumer in
/// this crate.
#[derive(Clone)]
pub struct Landmarks {
    positions: Box<[Position]>,
}

impl Landmarks {
    /// Creates a new [`Landmarks`] collection containing `len` preallocated landmarks.
    ///
    /// All landmarks will start with all coordinates at `0.0`.
    pub fn new(len: usize) -> Self {
        Self {
            positions: vec![[0.0, 0.0, 0.0]; len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Landmark> + Clone + '_ {
        (0..self.positions.len()).map(|i| self.get(i))
    }

    /// Returns the landmark at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Landmark {
        Landmark::new(self.positions[index])
    }

    pub fn set(&mut self, index: usize, landmark: Landmark) {
        self.positions[index] = landmark.pos;
    }
}

/// A single landmark position.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct Landmark {
    pos: Position,
}

impl Landmark {
    pub fn new(position: Position) -> Self {
        Self { pos: position }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let landmarks = Landmarks::new(4);
        assert_eq!(landmarks.len(), 4);
        assert!(landmarks.iter().all(|lm| lm.position() == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn set_get_roundtrip() {
        let mut landmarks = Landmarks::new(2);
        landmarks.set(1, Landmark::new([0.25, 0.5, -0.1]));
        assert_eq!(landmarks.get(1).x(), 0.25);
        assert_eq!(landmarks.get(1).y(), 0.5);
        assert_eq!(landmarks.get(1).z(), -0.1);
        assert_eq!(landmarks.get(0).position(), [0.0, 0.0, 0.0]);
    }
}
