use crate::core::constants::{INCHES_PER_DEGREE, INCHES_PER_METER};
use crate::PrintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a point in map units or page points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Rotates the point counter-clockwise around `origin` by `angle` radians
    pub fn rotate_around(&self, origin: &Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let d = self.subtract(origin);
        Point::new(
            origin.x + d.x * cos - d.y * sin,
            origin.y + d.x * sin + d.y * cos,
        )
    }
}

/// The unit system map coordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistanceUnit {
    Meter,
    Kilometer,
    Centimeter,
    Millimeter,
    Foot,
    Inch,
    Yard,
    Mile,
    Degree,
}

impl DistanceUnit {
    /// How many inches one unit spans on the ground
    pub fn inches_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Meter => INCHES_PER_METER,
            DistanceUnit::Kilometer => INCHES_PER_METER * 1000.0,
            DistanceUnit::Centimeter => INCHES_PER_METER / 100.0,
            DistanceUnit::Millimeter => INCHES_PER_METER / 1000.0,
            DistanceUnit::Foot => 12.0,
            DistanceUnit::Inch => 1.0,
            DistanceUnit::Yard => 36.0,
            DistanceUnit::Mile => 63_360.0,
            DistanceUnit::Degree => INCHES_PER_DEGREE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meter => "m",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::Centimeter => "cm",
            DistanceUnit::Millimeter => "mm",
            DistanceUnit::Foot => "ft",
            DistanceUnit::Inch => "in",
            DistanceUnit::Yard => "yd",
            DistanceUnit::Mile => "mi",
            DistanceUnit::Degree => "degrees",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meter),
            "km" => Ok(DistanceUnit::Kilometer),
            "cm" => Ok(DistanceUnit::Centimeter),
            "mm" => Ok(DistanceUnit::Millimeter),
            "ft" | "feet" => Ok(DistanceUnit::Foot),
            "in" | "inches" => Ok(DistanceUnit::Inch),
            "yd" => Ok(DistanceUnit::Yard),
            "mi" => Ok(DistanceUnit::Mile),
            "degrees" | "dd" | "degree" => Ok(DistanceUnit::Degree),
            other => Err(PrintError::invalid_configuration(format!(
                "unknown distance unit '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for DistanceUnit {
    type Error = PrintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistanceUnit> for String {
    fn from(unit: DistanceUnit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rotation() {
        let origin = Point::new(0.0, 0.0);
        let p = Point::new(1.0, 0.0).rotate_around(&origin, std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("m".parse::<DistanceUnit>().unwrap(), DistanceUnit::Meter);
        assert_eq!("DD".parse::<DistanceUnit>().unwrap(), DistanceUnit::Degree);
        assert_eq!(" ft ".parse::<DistanceUnit>().unwrap(), DistanceUnit::Foot);
        assert!(matches!(
            "parsec".parse::<DistanceUnit>(),
            Err(PrintError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_inches_per_unit() {
        assert_eq!(DistanceUnit::Foot.inches_per_unit(), 12.0);
        assert!((DistanceUnit::Kilometer.inches_per_unit() - 39_370.078_740_157_48).abs() < 1e-6);
    }
}
