use std::fmt::Display;

use crate::util::num::format_element;

/// A numeric array: a matrix or a vector with an orientation.
///
/// Matrices are stored as a list of rows of equal length. Vectors are a flat
/// list of elements flagged as a row or a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    /// A one-dimensional array.
    Vector {
        /// The elements in order.
        elements: Vec<f64>,
        /// `true` for a column vector, `false` for a row vector.
        column:   bool,
    },
    /// A rectangular matrix stored row by row.
    Matrix(Vec<Vec<f64>>),
}

impl ArrayValue {
    /// Builds a row vector.
    #[must_use]
    pub const fn row(elements: Vec<f64>) -> Self {
        Self::Vector { elements,
                       column: false }
    }

    /// Builds a column vector.
    #[must_use]
    pub const fn column(elements: Vec<f64>) -> Self {
        Self::Vector { elements,
                       column: true }
    }

    /// Returns `true` for matrices.
    #[must_use]
    pub const fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// Total number of stored elements.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::array::ArrayValue;
    ///
    /// let m = ArrayValue::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    /// assert_eq!(m.element_count(), 4);
    /// assert_eq!(ArrayValue::row(vec![1.0]).element_count(), 1);
    /// ```
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Self::Vector { elements, .. } => elements.len(),
            Self::Matrix(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// Returns `(rows, cols)`. A row vector is `1×n`, a column vector `n×1`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Vector { elements,
                           column: false, } => (1, elements.len()),
            Self::Vector { elements,
                           column: true, } => (elements.len(), 1),
            Self::Matrix(rows) => (rows.len(), rows.first().map_or(0, Vec::len)),
        }
    }

    /// Iterates over every element in row-major order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::Vector { elements, .. } => Box::new(elements.iter().copied()),
            Self::Matrix(rows) => Box::new(rows.iter().flatten().copied()),
        }
    }

    /// Returns the elements of a matrix or vector in row-major order.
    #[must_use]
    pub fn to_flat(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Returns the rows a matrix operation should act on.
    ///
    /// Matrices are returned as-is and a single-element vector counts as a
    /// `1×1` matrix. Any other vector yields `None`.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::array::ArrayValue;
    ///
    /// assert_eq!(ArrayValue::row(vec![7.0]).square_rows(), Some(vec![vec![7.0]]));
    /// assert_eq!(ArrayValue::row(vec![1.0, 2.0]).square_rows(), None);
    /// ```
    #[must_use]
    pub fn square_rows(&self) -> Option<Vec<Vec<f64>>> {
        match self {
            Self::Matrix(rows) => Some(rows.clone()),
            Self::Vector { elements, .. } if elements.len() == 1 => Some(vec![elements.clone()]),
            Self::Vector { .. } => None,
        }
    }

    /// Applies `f` to every element, keeping the shape and orientation.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Vector { elements, column } => {
                Self::Vector { elements: elements.iter().copied().map(f).collect(),
                               column:   *column, }
            },
            Self::Matrix(rows) => {
                Self::Matrix(rows.iter()
                                 .map(|row| row.iter().copied().map(&f).collect())
                                 .collect())
            },
        }
    }

    /// Like [`ArrayValue::map`], but stops at the first error.
    pub fn try_map<E>(&self, mut f: impl FnMut(f64) -> Result<f64, E>) -> Result<Self, E> {
        Ok(match self {
            Self::Vector { elements, column } => {
                Self::Vector { elements: elements.iter().map(|v| f(*v)).collect::<Result<_, _>>()?,
                               column:   *column, }
            },
            Self::Matrix(rows) => {
                let mut out = Vec::with_capacity(rows.len());
                for row in rows {
                    out.push(row.iter().map(|v| f(*v)).collect::<Result<Vec<_>, _>>()?);
                }
                Self::Matrix(out)
            },
        })
    }

    /// Combines two arrays element by element, keeping the left shape.
    ///
    /// The caller checks that both arrays hold the same number of elements.
    pub fn try_zip<E>(&self,
                      other: &Self,
                      mut f: impl FnMut(f64, f64) -> Result<f64, E>)
                      -> Result<Self, E> {
        let mut rhs = other.iter();
        self.try_map(|a| f(a, rhs.next().unwrap_or(0.0)))
    }
}

impl Display for ArrayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |values: &[f64], sep: &str| {
            values.iter().map(|v| format_element(*v)).collect::<Vec<_>>().join(sep)
        };

        match self {
            Self::Matrix(rows) => {
                let rows = rows.iter()
                               .map(|row| format!("[{}]", join(row, ", ")))
                               .collect::<Vec<_>>()
                               .join("; ");
                write!(f, "[{rows}]")
            },
            Self::Vector { elements,
                           column: true, } => write!(f, "[{}]", join(elements, "; ")),
            Self::Vector { elements,
                           column: false, } => write!(f, "[{}]", join(elements, ", ")),
        }
    }
}
