use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

/// Determinants below this magnitude are treated as a degenerate cell.
const DEGENERATE_VOLUME_EPS: f64 = 1e-10;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    #[error("Lattice vectors are degenerate (cell volume is zero)")]
    Degenerate,
}

/// The periodic cell of a crystal structure.
///
/// The three lattice vectors are stored as the rows of a 3x3 matrix, in the
/// same order they appear in POSCAR/XDATCAR headers. The conversion matrices
/// between fractional and cartesian coordinates are computed once at
/// construction, so a degenerate cell is rejected before any analysis runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    rows: Matrix3<f64>,
    cart_from_frac: Matrix3<f64>,
    frac_from_cart: Matrix3<f64>,
}

impl Lattice {
    /// Creates a lattice from a matrix whose rows are the lattice vectors.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::Degenerate`] if the vectors do not span a
    /// three-dimensional cell.
    pub fn new(rows: Matrix3<f64>) -> Result<Self, LatticeError> {
        if rows.determinant().abs() < DEGENERATE_VOLUME_EPS {
            return Err(LatticeError::Degenerate);
        }
        let cart_from_frac = rows.transpose();
        let frac_from_cart = cart_from_frac
            .try_inverse()
            .ok_or(LatticeError::Degenerate)?;
        Ok(Self {
            rows,
            cart_from_frac,
            frac_from_cart,
        })
    }

    /// Creates a lattice from three row vectors given as `[x, y, z]` triples.
    pub fn from_rows(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Result<Self, LatticeError> {
        Self::new(Matrix3::new(
            a[0], a[1], a[2], //
            b[0], b[1], b[2], //
            c[0], c[1], c[2],
        ))
    }

    /// Creates a cubic lattice with edge length `a` in Angstroms.
    pub fn cubic(a: f64) -> Result<Self, LatticeError> {
        Self::from_rows([a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a])
    }

    /// Converts fractional coordinates to cartesian coordinates in Angstroms.
    pub fn cartesian(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        self.cart_from_frac * frac
    }

    /// Converts cartesian coordinates in Angstroms to fractional coordinates.
    pub fn fractional(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        self.frac_from_cart * cart
    }

    /// Returns the matrix whose rows are the lattice vectors.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.rows
    }

    /// Returns the lengths of the three lattice vectors in Angstroms.
    pub fn lengths(&self) -> [f64; 3] {
        [
            self.rows.row(0).norm(),
            self.rows.row(1).norm(),
            self.rows.row(2).norm(),
        ]
    }

    /// Returns the cell volume in cubic Angstroms.
    pub fn volume(&self) -> f64 {
        self.rows.determinant().abs()
    }
}
