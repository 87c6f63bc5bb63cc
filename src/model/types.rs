use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("boundary must have exactly three codes, got '{0}'")]
pub struct ParseBoundaryError(String);

/// Per-axis boundary condition codes, e.g. `pp pp pp` or `pp ff pp`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(pub [String; 3]);

impl Boundary {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self([x.into(), y.into(), z.into()])
    }

    pub fn periodic() -> Self {
        Self::new("pp", "pp", "pp")
    }

    #[inline]
    pub fn codes(&self) -> &[String; 3] {
        &self.0
    }

    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ParseBoundaryError> {
        match tokens {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(ParseBoundaryError(tokens.join(" "))),
        }
    }
}

impl FromStr for Boundary {
    type Err = ParseBoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        Self::from_tokens(&tokens)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0[0], self.0[1], self.0[2])
    }
}

/// Orthogonal simulation box as `[lo, hi]` per axis (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationBox {
    pub bounds: [[f64; 2]; 3],
}

impl SimulationBox {
    pub fn new(bounds: [[f64; 2]; 3]) -> Self {
        Self { bounds }
    }

    #[inline]
    pub fn lo(&self, axis: usize) -> f64 {
        self.bounds[axis][0]
    }

    #[inline]
    pub fn hi(&self, axis: usize) -> f64 {
        self.bounds[axis][1]
    }

    pub fn lengths(&self) -> [f64; 3] {
        [
            self.hi(0) - self.lo(0),
            self.hi(1) - self.lo(1),
            self.hi(2) - self.lo(2),
        ]
    }

    pub fn volume(&self) -> f64 {
        self.lengths().iter().product()
    }
}
