use crate::core::models::structure::Structure;

/// The full symmetric matrix of periodic pair distances for one structure.
///
/// Row-major storage with a zero diagonal; used as the input for heatmap
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the distance matrix of a structure.
    ///
    /// Each off-diagonal entry is the minimum-image distance between the two
    /// sites; only the upper triangle is computed and mirrored.
    pub fn from_structure(structure: &Structure) -> Self {
        let n = structure.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                // Indices are in range by construction.
                let d = structure.distance(i, j).unwrap_or(0.0);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }

    /// Returns the matrix dimension (the number of sites).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Retrieves the distance between sites `i` and `j` (zero-based).
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// Returns the smallest and largest entries, including the zero diagonal.
    ///
    /// Returns `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::Lattice;
    use crate::core::models::site::Site;
    use nalgebra::Vector3;

    fn three_site_structure() -> Structure {
        Structure::new(
            "matrix test",
            Lattice::cubic(10.0).unwrap(),
            vec![
                Site::new("C", Vector3::new(0.0, 0.0, 0.0)),
                Site::new("C", Vector3::new(0.3, 0.0, 0.0)),
                Site::new("Br", Vector3::new(0.0, 0.4, 0.0)),
            ],
        )
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let m = DistanceMatrix::from_structure(&three_site_structure());
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), Some(0.0));
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1).unwrap() - 3.0).abs() < 1e-12);
        assert!((m.get(0, 2).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn min_max_spans_diagonal_and_largest_pair() {
        let m = DistanceMatrix::from_structure(&three_site_structure());
        let (min, max) = m.min_max().unwrap();
        assert_eq!(min, 0.0);
        assert!((max - 5.0).abs() < 1e-12);
    }

    #[test]
    fn empty_structure_yields_empty_matrix() {
        let s = Structure::new("empty", Lattice::cubic(5.0).unwrap(), vec![]);
        let m = DistanceMatrix::from_structure(&s);
        assert!(m.is_empty());
        assert_eq!(m.min_max(), None);
        assert_eq!(m.get(0, 0), None);
    }
}
