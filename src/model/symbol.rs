use serde::{Deserialize, Serialize};

/// Contents of a single cell. `Sun` and `Moon` are the firm puzzle values;
/// the guess variants are player annotations that never participate in
/// constraint evaluation, and `Empty` is an unset cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Symbol {
    Sun,
    Moon,
    SunGuess,
    MoonGuess,
    Empty,
}

impl Symbol {
    /// True for the two authoritative values. Guesses and `Empty` count as
    /// unfilled everywhere the rules look at the board.
    pub fn is_firm(&self) -> bool {
        matches!(self, Symbol::Sun | Symbol::Moon)
    }

    pub fn complement(&self) -> Symbol {
        match self {
            Symbol::Sun => Symbol::Moon,
            Symbol::Moon => Symbol::Sun,
            Symbol::SunGuess => Symbol::MoonGuess,
            Symbol::MoonGuess => Symbol::SunGuess,
            Symbol::Empty => Symbol::Empty,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Symbol::Sun => 'S',
            Symbol::Moon => 'M',
            Symbol::SunGuess => 's',
            Symbol::MoonGuess => 'm',
            Symbol::Empty => '.',
        }
    }

    pub fn from_glyph(c: char) -> Option<Symbol> {
        match c {
            'S' => Some(Symbol::Sun),
            'M' => Some(Symbol::Moon),
            's' => Some(Symbol::SunGuess),
            'm' => Some(Symbol::MoonGuess),
            '.' => Some(Symbol::Empty),
            _ => None,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmness() {
        assert!(Symbol::Sun.is_firm());
        assert!(Symbol::Moon.is_firm());
        assert!(!Symbol::SunGuess.is_firm());
        assert!(!Symbol::MoonGuess.is_firm());
        assert!(!Symbol::Empty.is_firm());
    }

    #[test]
    fn test_complement() {
        assert_eq!(Symbol::Sun.complement(), Symbol::Moon);
        assert_eq!(Symbol::Moon.complement(), Symbol::Sun);
        assert_eq!(Symbol::Empty.complement(), Symbol::Empty);
    }

    #[test]
    fn test_glyph_round_trip() {
        for symbol in [
            Symbol::Sun,
            Symbol::Moon,
            Symbol::SunGuess,
            Symbol::MoonGuess,
            Symbol::Empty,
        ] {
            assert_eq!(Symbol::from_glyph(symbol.glyph()), Some(symbol));
        }
        assert_eq!(Symbol::from_glyph('?'), None);
    }
}
