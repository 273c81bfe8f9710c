//! Numeric payloads anchored on `nalgebra`.
//!
//! A [`Value`] is either a single [`Scalar`] or a dense [`Array`]. Element-wise
//! operations broadcast scalars over arrays; two arrays must agree in shape.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::errors::{Error, Result};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Dense array payload. Vectors are stored as single-column matrices.
pub type Array = DMatrix<Scalar>;

/// Numeric payload of a quantity: a scalar or a homogeneous array of scalars.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(Scalar),
    /// A dense matrix (or column vector) of numbers.
    Array(Array),
}

impl Value {
    /// Builds a column vector from a slice.
    #[must_use]
    pub fn vector(values: &[Scalar]) -> Self {
        Self::Array(Array::from_column_slice(values.len(), 1, values))
    }

    /// Builds a matrix from row-major data.
    #[must_use]
    pub fn matrix(rows: usize, cols: usize, row_major: &[Scalar]) -> Self {
        Self::Array(Array::from_row_slice(rows, cols, row_major))
    }

    /// Returns the scalar payload, if any.
    #[must_use]
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(x) => Some(*x),
            Self::Array(_) => None,
        }
    }

    /// Returns the array payload, if any.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(a) => Some(a),
        }
    }

    /// True for the scalar variant.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Shape of the array payload; `None` for scalars.
    #[must_use]
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.as_array().map(|a| a.shape())
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
        }
    }

    /// Applies `f` to every element.
    #[must_use]
    pub fn map(&self, f: impl Fn(Scalar) -> Scalar) -> Self {
        match self {
            Self::Scalar(x) => Self::Scalar(f(*x)),
            Self::Array(a) => Self::Array(a.map(f)),
        }
    }

    /// Combines two values element-wise, broadcasting scalars over arrays.
    pub fn zip_with(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(Scalar, Scalar) -> Scalar,
    ) -> Result<Self> {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Ok(Self::Scalar(f(*a, *b))),
            (Self::Scalar(a), Self::Array(b)) => Ok(Self::Array(b.map(|y| f(*a, y)))),
            (Self::Array(a), Self::Scalar(b)) => Ok(Self::Array(a.map(|x| f(x, *b)))),
            (Self::Array(a), Self::Array(b)) => {
                if a.shape() != b.shape() {
                    return Err(Error::ShapeMismatch {
                        op,
                        lhs: a.shape(),
                        rhs: b.shape(),
                    });
                }
                Ok(Self::Array(a.zip_map(b, f)))
            }
        }
    }

    /// Matrix product of two arrays.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => {
                if a.ncols() != b.nrows() {
                    return Err(Error::ShapeMismatch {
                        op: "matmul",
                        lhs: a.shape(),
                        rhs: b.shape(),
                    });
                }
                Ok(Self::Array(a * b))
            }
            (Self::Scalar(_), _) | (_, Self::Scalar(_)) => Err(Error::UnsupportedOperand {
                op: "matmul",
                operand: "scalar",
            }),
        }
    }

    /// Transpose; scalars are returned unchanged.
    #[must_use]
    pub fn transpose(&self) -> Self {
        match self {
            Self::Scalar(x) => Self::Scalar(*x),
            Self::Array(a) => Self::Array(a.transpose()),
        }
    }

    /// Multiplies every element by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: Scalar) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        self.map(|x| x * factor)
    }

    /// A value with the same shape as `self`, filled with `fill`.
    #[must_use]
    pub fn full_like(&self, fill: Scalar) -> Self {
        self.map(|_| fill)
    }

    /// Sum of all elements.
    #[must_use]
    pub fn sum(&self) -> Scalar {
        match self {
            Self::Scalar(x) => *x,
            Self::Array(a) => a.sum(),
        }
    }

    /// True if `pred` holds for every element.
    pub fn all(&self, pred: impl Fn(Scalar) -> bool) -> bool {
        match self {
            Self::Scalar(x) => pred(*x),
            Self::Array(a) => a.iter().all(|x| pred(*x)),
        }
    }

    /// Reduces a gradient that was broadcast against a scalar back to a scalar.
    ///
    /// The adjoint of broadcasting is summation, so a scalar operand that met
    /// an array in the forward pass receives the sum of the array gradient.
    #[must_use]
    pub(crate) fn reduce_like(self, target: &Self) -> Self {
        match (target, self) {
            (Self::Scalar(_), Self::Array(a)) => Self::Scalar(a.sum()),
            (_, v) => v,
        }
    }
}

impl From<Scalar> for Value {
    fn from(x: Scalar) -> Self {
        Self::Scalar(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Self::Scalar(Scalar::from(x))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<DVector<Scalar>> for Value {
    fn from(v: DVector<Scalar>) -> Self {
        Self::vector(v.as_slice())
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(v: Vec<Scalar>) -> Self {
        Self::vector(&v)
    }
}

impl<const N: usize> From<[Scalar; N]> for Value {
    fn from(v: [Scalar; N]) -> Self {
        Self::vector(&v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn row(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = Scalar>) -> fmt::Result {
            f.write_str("[")?;
            for (i, x) in items.enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{x}")?;
            }
            f.write_str("]")
        }

        match self {
            Self::Scalar(x) => write!(f, "{x}"),
            Self::Array(a) if a.ncols() == 1 => row(f, a.iter().copied()),
            Self::Array(a) => {
                f.write_str("[")?;
                for r in 0..a.nrows() {
                    if r > 0 {
                        f.write_str(", ")?;
                    }
                    row(f, a.row(r).iter().copied())?;
                }
                f.write_str("]")
            }
        }
    }
}
