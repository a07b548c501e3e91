#![allow(clippy::module_inception)]

use std::fmt::Display;

pub mod ast;
pub mod errors;
pub mod resolver;

/// A source position as (line, column), both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0, 0)
    }

    /// Position used for references the resolver itself injects
    /// (the built-in arrays registered before the walk).
    pub fn start() -> Self {
        Position(1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position(3, 14)), "3:14");
        assert_eq!(format!("{}", Position::null()), "0:0");
    }
}
