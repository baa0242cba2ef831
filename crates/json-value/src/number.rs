use std::fmt;

/// A finite JSON number.
///
/// Integers and floats are kept apart so the textual form survives a trip
/// through [`Display`](fmt::Display), but equality is numeric: `1`, `1.0`
/// and `1e0` are all the same number.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    n: N,
}

#[derive(Debug, Clone, Copy)]
enum N {
    PosInt(u64),
    /// Always less than zero.
    NegInt(i64),
    /// Always finite.
    Float(f64),
}

impl Number {
    /// Returns `None` for NaN and infinities, which have no JSON mapping.
    pub fn from_f64(f: f64) -> Option<Number> {
        if f.is_finite() {
            Some(Number { n: N::Float(f) })
        } else {
            None
        }
    }

    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(u) => Some(u),
            N::NegInt(_) | N::Float(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
            N::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(u) => u as f64,
            N::NegInt(i) => i as f64,
            N::Float(f) => f,
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match self.n {
            N::PosInt(u) => Some(i128::from(u)),
            N::NegInt(i) => Some(i128::from(i)),
            N::Float(_) => None,
        }
    }
}

// Integral floats are exactly representable in i128 over the whole u64/i64
// range; `as` saturates for anything larger, which can never match.
fn float_matches_int(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::Float(a), N::Float(b)) => a == b,
            (N::Float(f), _) => other.as_i128().is_some_and(|i| float_matches_int(f, i)),
            (_, N::Float(f)) => self.as_i128().is_some_and(|i| float_matches_int(f, i)),
            _ => self.as_i128() == other.as_i128(),
        }
    }
}

// NaN cannot be constructed.
impl Eq for Number {}

impl From<u64> for Number {
    fn from(u: u64) -> Self {
        Number { n: N::PosInt(u) }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        if i < 0 {
            Number { n: N::NegInt(i) }
        } else {
            Number {
                n: N::PosInt(i as u64),
            }
        }
    }
}

macro_rules! from_small_int {
    ($wide:ty => $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(v: $ty) -> Self {
                    Number::from(<$wide>::from(v))
                }
            }
        )*
    };
}

from_small_int!(u64 => u8, u16, u32);
from_small_int!(i64 => i8, i16, i32);

impl From<usize> for Number {
    fn from(v: usize) -> Self {
        Number::from(v as u64)
    }
}

impl From<isize> for Number {
    fn from(v: isize) -> Self {
        Number::from(v as i64)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => write!(f, "{u}"),
            N::NegInt(i) => write!(f, "{i}"),
            // Defer to serde_json so floats print the way the encoder writes them.
            N::Float(v) => match serde_json::Number::from_f64(v) {
                Some(n) => write!(f, "{n}"),
                None => write!(f, "{v}"),
            },
        }
    }
}

impl serde::Serialize for Number {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.n {
            N::PosInt(u) => serializer.serialize_u64(u),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(f) => serializer.serialize_f64(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(f: f64) -> Number {
        Number::from_f64(f).expect("finite")
    }

    #[test]
    fn integer_and_integral_float_are_equal() {
        assert_eq!(Number::from(1u64), float(1.0));
        assert_eq!(float(-3.0), Number::from(-3i64));
        assert_eq!(Number::from(0u64), float(-0.0));
    }

    #[test]
    fn fractional_float_never_equals_integer() {
        assert_ne!(Number::from(1u64), float(1.5));
        assert_ne!(float(-0.5), Number::from(0i64));
    }

    #[test]
    fn signedness_does_not_leak_into_equality() {
        assert_eq!(Number::from(5i64), Number::from(5u64));
        assert_ne!(Number::from(-5i64), Number::from(5u64));
        assert_eq!(Number::from(u64::MAX), Number::from(u64::MAX));
    }

    #[test]
    fn huge_floats_do_not_saturate_into_integers() {
        assert_ne!(float(1e300), Number::from(u64::MAX));
        assert_ne!(float(-1e300), Number::from(i64::MIN));
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
        assert!(Number::from_f64(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn display_keeps_textual_form() {
        assert_eq!(Number::from(3u64).to_string(), "3");
        assert_eq!(Number::from(-7i64).to_string(), "-7");
        assert_eq!(float(1.0).to_string(), "1.0");
        assert_eq!(float(2.5).to_string(), "2.5");
    }

    #[test]
    fn accessors() {
        assert_eq!(Number::from(7u8).as_u64(), Some(7));
        assert_eq!(Number::from(-7i8).as_u64(), None);
        assert_eq!(Number::from(u64::MAX).as_i64(), None);
        assert_eq!(Number::from(-7i16).as_i64(), Some(-7));
        assert!(float(1.0).is_f64());
        assert_eq!(Number::from(2u32).as_f64(), 2.0);
    }
}
