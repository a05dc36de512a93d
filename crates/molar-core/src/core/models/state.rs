use nalgebra::Point3;

/// The coordinate half of a loader result: one position per topology atom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    coords: Vec<Point3<f64>>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_coords(coords: Vec<Point3<f64>>) -> Self {
        Self { coords }
    }

    pub fn push(&mut self, position: Point3<f64>) {
        self.coords.push(position);
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[Point3<f64>] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Point3<f64>> {
        self.coords
    }
}
