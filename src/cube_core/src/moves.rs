use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::CubeError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Axis::X),
            "Y" | "y" => Ok(Axis::Y),
            "Z" | "z" => Ok(Axis::Z),
            _ => Err(CubeError::InvalidAxis(s.to_owned())),
        }
    }
}

/// The amount a slice is turned by a single move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Angle {
    /// +90°
    Clockwise,
    /// −90°
    CounterClockwise,
    /// A bookkeeping entry that does not turn anything, left behind when a
    /// drag is released before it reaches a quarter turn.
    Zero,
}

impl Angle {
    #[must_use]
    pub fn inverse(self) -> Angle {
        match self {
            Angle::Clockwise => Angle::CounterClockwise,
            Angle::CounterClockwise => Angle::Clockwise,
            Angle::Zero => Angle::Zero,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            Angle::Clockwise => 90.0,
            Angle::CounterClockwise => -90.0,
            Angle::Zero => 0.0,
        }
    }

    /// Convert a stored angle back into an `Angle`.
    ///
    /// # Errors
    ///
    /// `InvalidAngle` for anything other than exactly 90, -90 or 0.
    #[allow(clippy::float_cmp)]
    pub fn from_degrees(degrees: f64) -> Result<Angle, CubeError> {
        if degrees == 90.0 {
            Ok(Angle::Clockwise)
        } else if degrees == -90.0 {
            Ok(Angle::CounterClockwise)
        } else if degrees == 0.0 {
            Ok(Angle::Zero)
        } else {
            Err(CubeError::InvalidAngle(degrees))
        }
    }
}

/// A single quarter turn of one slice.
///
/// Written as the axis, the slice index and a suffix: nothing for
/// clockwise, `'` for counter-clockwise and `_` for a zero-angle entry, so
/// `X0`, `Y2'` and `Z1_`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub axis: Axis,
    pub index: usize,
    pub angle: Angle,
}

impl Move {
    pub const fn new(axis: Axis, index: usize, angle: Angle) -> Move {
        Move { axis, index, angle }
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            angle: self.angle.inverse(),
            ..self
        }
    }

    pub fn is_zero(self) -> bool {
        self.angle == Angle::Zero
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.angle {
            Angle::Clockwise => "",
            Angle::CounterClockwise => "'",
            Angle::Zero => "_",
        };
        write!(f, "{}{}{suffix}", self.axis, self.index)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CubeError::InvalidNotation(s.to_owned());

        let mut chars = s.chars();
        let axis = chars
            .next()
            .ok_or_else(invalid)?
            .to_string()
            .parse::<Axis>()
            .map_err(|_| invalid())?;
        let rest = chars.as_str();

        let (digits, angle) = if let Some(digits) = rest.strip_suffix('\'') {
            (digits, Angle::CounterClockwise)
        } else if let Some(digits) = rest.strip_suffix('_') {
            (digits, Angle::Zero)
        } else {
            (rest, Angle::Clockwise)
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = digits.parse().map_err(|_| invalid())?;

        Ok(Move { axis, index, angle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_negates_the_angle() {
        let m = Move::new(Axis::Y, 2, Angle::Clockwise);
        assert_eq!(m.inverse(), Move::new(Axis::Y, 2, Angle::CounterClockwise));
        assert_eq!(m.inverse().inverse(), m);
        let zero = Move::new(Axis::X, 0, Angle::Zero);
        assert_eq!(zero.inverse(), zero);
    }

    #[test]
    fn degrees() {
        for angle in [Angle::Clockwise, Angle::CounterClockwise, Angle::Zero] {
            assert_eq!(Angle::from_degrees(angle.degrees()).unwrap(), angle);
        }
        assert!(matches!(
            Angle::from_degrees(180.0),
            Err(CubeError::InvalidAngle(_))
        ));
        assert!(Angle::from_degrees(45.0).is_err());
    }

    #[test]
    fn notation() {
        assert_eq!(
            "X0".parse::<Move>().unwrap(),
            Move::new(Axis::X, 0, Angle::Clockwise)
        );
        assert_eq!(
            "y12'".parse::<Move>().unwrap(),
            Move::new(Axis::Y, 12, Angle::CounterClockwise)
        );
        assert_eq!(Move::new(Axis::Z, 1, Angle::Zero).to_string(), "Z1_");
        assert_eq!(Move::new(Axis::Y, 2, Angle::CounterClockwise).to_string(), "Y2'");

        for bad in ["", "X", "W1", "X-1", "X1''", "X+1", "1X"] {
            assert!(
                matches!(bad.parse::<Move>(), Err(CubeError::InvalidNotation(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
