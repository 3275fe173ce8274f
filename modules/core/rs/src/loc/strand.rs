use std::fmt::Display;

/// Strand of a genomic feature or an aligned read.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(i8)]
pub enum Strand {
    /// The forward (Watson, +1) strand.
    Forward = 1,
    /// The reverse (Crick, -1) strand.
    Reverse = -1,
}

impl Strand {
    /// New strand that is the opposite of the current one.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Get the symbolic representation of the strand.
    pub fn symbol(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Strand {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Self::Forward),
            '-' => Ok(Self::Reverse),
            _ => Err(()),
        }
    }
}

impl TryFrom<&str> for Strand {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            _ => Err(()),
        }
    }
}

impl TryFrom<i8> for Strand {
    type Error = ();

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            _ => Err(()),
        }
    }
}

impl From<Strand> for i8 {
    fn from(value: Strand) -> Self {
        value as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped() {
        assert_eq!(Strand::Forward.flipped(), Strand::Reverse);
        assert_eq!(Strand::Reverse.flipped(), Strand::Forward);
    }

    #[test]
    fn test_symbol() {
        assert_eq!(Strand::Forward.symbol(), '+');
        assert_eq!(Strand::Reverse.symbol(), '-');
        assert_eq!(format!("{}", Strand::Reverse), "-");
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Strand::try_from('+'), Ok(Strand::Forward));
        assert_eq!(Strand::try_from("-"), Ok(Strand::Reverse));
        assert_eq!(Strand::try_from(1i8), Ok(Strand::Forward));
        assert_eq!(Strand::try_from(-1i8), Ok(Strand::Reverse));
        assert_eq!(Strand::try_from('.'), Err(()));
        assert_eq!(Strand::try_from(0i8), Err(()));
    }

    #[test]
    fn test_into_i8() {
        assert_eq!(i8::from(Strand::Forward), 1);
        assert_eq!(i8::from(Strand::Reverse), -1);
    }
}
