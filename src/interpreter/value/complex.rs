use std::{fmt::Display, ops};

use crate::util::num::format_element;

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    /// Prints `a + bi`, omitting zero parts and unit coefficients.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let has_real = self.real != 0.0;
        let has_imag = self.imaginary != 0.0;

        if !has_real && !has_imag {
            return write!(f, "0");
        }

        if has_real {
            write!(f, "{}", format_element(self.real))?;
        }

        if has_imag {
            let mut imag = self.imaginary;
            if has_real {
                if imag > 0.0 {
                    write!(f, " + ")?;
                } else {
                    write!(f, " - ")?;
                    imag = -imag;
                }
            }

            if imag == 1.0 {
                write!(f, "i")?;
            } else if imag == -1.0 {
                write!(f, "-i")?;
            } else {
                write!(f, "{}i", format_element(imag))?;
            }
        }

        Ok(())
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// assert_eq!(c.to_string(), "5 - i");
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Returns `true` if both parts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// Returns the absolute value (magnitude) of the complex number.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Divides by `rhs`, returning `None` when `rhs` is zero.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::complex::ComplexNumber;
    /// let one = ComplexNumber::new(1.0, 0.0);
    /// let i = ComplexNumber::new(0.0, 1.0);
    /// assert_eq!(one.checked_div(i), Some(ComplexNumber::new(0.0, -1.0)));
    /// assert_eq!(one.checked_div(ComplexNumber::new(0.0, 0.0)), None);
    /// ```
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() { None } else { Some(self / rhs) }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl From<f64> for ComplexNumber {
    fn from(value: f64) -> Self {
        Self { real:      value,
               imaginary: 0.0, }
    }
}
