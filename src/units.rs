//! Module implementing a minimal physical unit tag.
//!
//! A [`Quantity`] is a magnitude paired with a [`Unit`]. Values can only be compared or combined after an explicit
//! conversion into a common unit, which fails with [`PhaseError::IncompatibleUnits`] across physical dimensions.
//!
//! # Examples
//!
//! ```rust
//! use spike_phase::units::{Quantity, TimeUnit, Unit};
//!
//! let t = Quantity::new(1.5, Unit::Time(TimeUnit::Second));
//! let t_ms = t.rescale(Unit::Time(TimeUnit::Millisecond)).unwrap();
//! assert!((t_ms.magnitude() - 1500.0).abs() < 1e-9);
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PhaseError;

/// A unit of time.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    /// Sample ticks of a clock running at `rate` Hz, i.e., one tick lasts `1/rate` seconds.
    Ticks { rate: f64 },
}

impl TimeUnit {
    /// Returns the duration of one unit, in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Millisecond => 1e-3,
            TimeUnit::Microsecond => 1e-6,
            TimeUnit::Nanosecond => 1e-9,
            TimeUnit::Ticks { rate } => 1.0 / rate,
        }
    }

    /// Returns the power of ten of one unit in seconds, or None for units which are not decimal multiples of the second.
    pub fn decimal_exponent(&self) -> Option<i32> {
        match self {
            TimeUnit::Second => Some(0),
            TimeUnit::Millisecond => Some(-3),
            TimeUnit::Microsecond => Some(-6),
            TimeUnit::Nanosecond => Some(-9),
            TimeUnit::Ticks { .. } => None,
        }
    }

    /// Returns the factor converting a magnitude in this unit into the target unit.
    pub fn factor_to(&self, target: TimeUnit) -> f64 {
        if *self == target {
            return 1.0;
        }
        match (self.decimal_exponent(), target.decimal_exponent()) {
            (Some(from), Some(to)) => 10_f64.powi(from - to),
            _ => self.seconds() / target.seconds(),
        }
    }

    /// Express a magnitude in this unit into the target unit.
    /// Conversions between decimal units scale by an exact power of ten, so that e.g. 1 s is exactly 1e9 ns.
    pub fn convert(&self, value: f64, target: TimeUnit) -> f64 {
        match (self.decimal_exponent(), target.decimal_exponent()) {
            (Some(from), Some(to)) => scale_decimal(value, from - to),
            _ => value * self.factor_to(target),
        }
    }

    /// Returns true if the unit has a finite and positive duration.
    pub fn is_valid(&self) -> bool {
        let seconds = self.seconds();
        seconds.is_finite() && seconds > 0.0
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeUnit::Second => write!(f, "s"),
            TimeUnit::Millisecond => write!(f, "ms"),
            TimeUnit::Microsecond => write!(f, "us"),
            TimeUnit::Nanosecond => write!(f, "ns"),
            TimeUnit::Ticks { rate } => write!(f, "1/{} s", rate),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "s" => Ok(TimeUnit::Second),
            "ms" => Ok(TimeUnit::Millisecond),
            "us" | "µs" => Ok(TimeUnit::Microsecond),
            "ns" => Ok(TimeUnit::Nanosecond),
            other => Err(PhaseError::InvalidParameter(format!(
                "Unrecognized time unit '{}', choose out of [s, ms, us, ns].",
                other
            ))),
        }
    }
}

/// A unit of electric potential.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PotentialUnit {
    Volt,
    Millivolt,
    Microvolt,
}

impl PotentialUnit {
    /// Returns the value of one unit, in volts.
    pub fn volts(&self) -> f64 {
        match self {
            PotentialUnit::Volt => 1.0,
            PotentialUnit::Millivolt => 1e-3,
            PotentialUnit::Microvolt => 1e-6,
        }
    }
}

impl PotentialUnit {
    /// Returns the power of ten of one unit in volts.
    pub fn decimal_exponent(&self) -> i32 {
        match self {
            PotentialUnit::Volt => 0,
            PotentialUnit::Millivolt => -3,
            PotentialUnit::Microvolt => -6,
        }
    }
}

impl fmt::Display for PotentialUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PotentialUnit::Volt => write!(f, "V"),
            PotentialUnit::Millivolt => write!(f, "mV"),
            PotentialUnit::Microvolt => write!(f, "uV"),
        }
    }
}

/// A physical unit tag.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Unit {
    Time(TimeUnit),
    Potential(PotentialUnit),
    Dimensionless,
}

impl Unit {
    /// Express a magnitude in this unit into the target unit.
    /// Returns an error if the two units don't share the same physical dimension.
    pub fn convert(&self, value: f64, target: Unit) -> Result<f64, PhaseError> {
        match (self, target) {
            (Unit::Time(from), Unit::Time(to)) => Ok(from.convert(value, to)),
            (Unit::Potential(from), Unit::Potential(to)) => Ok(scale_decimal(
                value,
                from.decimal_exponent() - to.decimal_exponent(),
            )),
            (Unit::Dimensionless, Unit::Dimensionless) => Ok(value),
            _ => Err(PhaseError::IncompatibleUnits {
                from: *self,
                to: target,
            }),
        }
    }

    /// Returns the time unit, if the unit is a time.
    pub fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            Unit::Time(unit) => Some(*unit),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Time(unit) => write!(f, "{}", unit),
            Unit::Potential(unit) => write!(f, "{}", unit),
            Unit::Dimensionless => write!(f, "dimensionless"),
        }
    }
}

impl From<TimeUnit> for Unit {
    fn from(unit: TimeUnit) -> Self {
        Unit::Time(unit)
    }
}

impl From<PotentialUnit> for Unit {
    fn from(unit: PotentialUnit) -> Self {
        Unit::Potential(unit)
    }
}

/// A scalar magnitude tagged with its unit.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a new quantity.
    pub fn new(magnitude: f64, unit: impl Into<Unit>) -> Self {
        Quantity {
            magnitude,
            unit: unit.into(),
        }
    }

    /// Returns the magnitude of the quantity, expressed in its own unit.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the unit of the quantity.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Express the quantity in another unit of the same dimension.
    pub fn rescale(&self, unit: impl Into<Unit>) -> Result<Quantity, PhaseError> {
        let unit = unit.into();
        Ok(Quantity {
            magnitude: self.unit.convert(self.magnitude, unit)?,
            unit,
        })
    }

    /// Returns the magnitude of the quantity expressed in the provided unit.
    pub fn magnitude_in(&self, unit: impl Into<Unit>) -> Result<f64, PhaseError> {
        Ok(self.rescale(unit)?.magnitude)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Multiply a value by 10^exponent, dividing for negative exponents so that exact decimal values stay exact.
fn scale_decimal(value: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        value * 10_f64.powi(exponent)
    } else {
        value / 10_f64.powi(-exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_unit_factor() {
        assert_eq!(TimeUnit::Second.factor_to(TimeUnit::Second), 1.0);
        assert_relative_eq!(TimeUnit::Second.factor_to(TimeUnit::Millisecond), 1e3);
        assert_relative_eq!(TimeUnit::Microsecond.factor_to(TimeUnit::Millisecond), 1e-3);
        assert_relative_eq!(
            TimeUnit::Ticks { rate: 30000.0 }.factor_to(TimeUnit::Millisecond),
            1.0 / 30.0
        );
        assert!(TimeUnit::Ticks { rate: 30000.0 }.is_valid());
        assert!(!TimeUnit::Ticks { rate: 0.0 }.is_valid());
        assert!(!TimeUnit::Ticks { rate: -1.0 }.is_valid());
    }

    #[test]
    fn test_time_unit_convert_exact() {
        assert_eq!(TimeUnit::Second.factor_to(TimeUnit::Nanosecond), 1e9);
        assert_eq!(TimeUnit::Second.convert(1.0, TimeUnit::Nanosecond), 1e9);
        assert_eq!(TimeUnit::Microsecond.convert(3.0, TimeUnit::Nanosecond), 3000.0);
        assert_eq!(TimeUnit::Nanosecond.convert(1e9, TimeUnit::Second), 1.0);
        assert_eq!(TimeUnit::Millisecond.convert(300.0, TimeUnit::Second), 0.3);
        assert_eq!(
            Quantity::new(7.0, TimeUnit::Second).magnitude_in(TimeUnit::Microsecond),
            Ok(7e6)
        );
        assert_eq!(
            Quantity::new(250.0, PotentialUnit::Microvolt).magnitude_in(PotentialUnit::Millivolt),
            Ok(0.25)
        );
    }

    #[test]
    fn test_time_unit_from_str() {
        assert_eq!("ms".parse::<TimeUnit>(), Ok(TimeUnit::Millisecond));
        assert_eq!(" s ".parse::<TimeUnit>(), Ok(TimeUnit::Second));
        assert_eq!("µs".parse::<TimeUnit>(), Ok(TimeUnit::Microsecond));
        assert!(matches!(
            "hours".parse::<TimeUnit>(),
            Err(PhaseError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_quantity_rescale() {
        let q = Quantity::new(2.5, PotentialUnit::Millivolt);
        assert_relative_eq!(q.magnitude_in(PotentialUnit::Microvolt).unwrap(), 2500.0);
        assert_relative_eq!(q.magnitude_in(PotentialUnit::Volt).unwrap(), 0.0025);

        let q = Quantity::new(99.0, TimeUnit::Second);
        assert_relative_eq!(
            q.magnitude_in(TimeUnit::Ticks { rate: 30000.0 }).unwrap(),
            2_970_000.0
        );
    }

    #[test]
    fn test_quantity_incompatible_units() {
        let q = Quantity::new(1.0, TimeUnit::Second);
        assert_eq!(
            q.rescale(PotentialUnit::Volt),
            Err(PhaseError::IncompatibleUnits {
                from: Unit::Time(TimeUnit::Second),
                to: Unit::Potential(PotentialUnit::Volt)
            })
        );
        assert!(Quantity::new(1.0, Unit::Dimensionless)
            .rescale(TimeUnit::Millisecond)
            .is_err());
    }
}
