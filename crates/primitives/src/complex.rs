//! Immutable complex number persisted by its coordinates
//!
//! Both the coordinate form and the polar form are kept in memory. Only the
//! coordinates are written; magnitude and angle are recomputed on decode by
//! the same constructor fresh values use, so every instance satisfies:
//!
//! - `magnitude == sqrt(real² + imaginary²)`
//! - `angle == atan2(imaginary, real)`, in `(-π, π]`
//!
//! ## Quirks
//!
//! - At the origin the angle is whatever `f64::atan2(0.0, 0.0)` yields (0.0).
//! - [`ComplexNumber::from_polar`] does not reject negative magnitudes. The
//!   result is consistent with the coordinates it produces but keeps the
//!   given magnitude and angle as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use surrogate_core::{Error, Result, SerializationProxy};

/// Immutable complex number storing coordinate and polar forms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "ComplexNumberProxy", try_from = "ComplexNumberProxy")]
pub struct ComplexNumber {
    real: f64,
    imaginary: f64,
    magnitude: f64,
    angle: f64,
}

impl ComplexNumber {
    /// Create from coordinates, deriving the polar form.
    pub fn from_coordinates(real: f64, imaginary: f64) -> Self {
        Self {
            real,
            imaginary,
            magnitude: (real.powi(2) + imaginary.powi(2)).sqrt(),
            angle: imaginary.atan2(real),
        }
    }

    /// Like [`from_coordinates`](Self::from_coordinates), but refuses
    /// non-finite coordinates.
    pub fn checked_from_coordinates(real: f64, imaginary: f64) -> Option<Self> {
        if real.is_finite() && imaginary.is_finite() {
            Some(Self::from_coordinates(real, imaginary))
        } else {
            None
        }
    }

    /// Create from polar form, deriving the coordinates.
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Self {
            real: magnitude * angle.cos(),
            imaginary: magnitude * angle.sin(),
            magnitude,
            angle,
        }
    }

    /// Real part
    pub fn real(&self) -> f64 {
        self.real
    }

    /// Imaginary part
    pub fn imaginary(&self) -> f64 {
        self.imaginary
    }

    /// Distance from the origin
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Angle in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComplexNumber ({:.2}/{:.2}i; {:.2}@{:.2}rad)",
            self.real, self.imaginary, self.magnitude, self.angle
        )
    }
}

/// Persisted form of [`ComplexNumber`]: coordinates only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexNumberProxy {
    /// Real part
    pub real: f64,
    /// Imaginary part
    pub imaginary: f64,
}

impl fmt::Display for ComplexNumberProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComplexNumber.Proxy ({:.2}/{:.2}i)",
            self.real, self.imaginary
        )
    }
}

impl From<ComplexNumber> for ComplexNumberProxy {
    fn from(number: ComplexNumber) -> Self {
        Self {
            real: number.real,
            imaginary: number.imaginary,
        }
    }
}

impl TryFrom<ComplexNumberProxy> for ComplexNumber {
    type Error = Error;

    fn try_from(proxy: ComplexNumberProxy) -> Result<Self> {
        ComplexNumber::checked_from_coordinates(proxy.real, proxy.imaginary).ok_or_else(|| {
            Error::decoding(
                <ComplexNumber as SerializationProxy>::TYPE_NAME,
                format!("non-finite coordinates in {}", proxy),
            )
        })
    }
}

impl SerializationProxy for ComplexNumber {
    const TYPE_NAME: &'static str = "ComplexNumber";
    type Proxy = ComplexNumberProxy;

    fn to_proxy(&self) -> Result<ComplexNumberProxy> {
        Ok(ComplexNumberProxy::from(*self))
    }

    fn from_proxy(proxy: ComplexNumberProxy) -> Result<Self> {
        ComplexNumber::try_from(proxy)
    }
}
