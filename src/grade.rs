use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GradeClass {
    A,
    B,
    C,
    D,
    F,
}

impl GradeClass {
    pub const ALL: [GradeClass; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Bands are closed on the lower bound. Anything below 2.0, including
    /// NaN, is an F.
    pub fn classify(gpa: f64) -> Self {
        if gpa >= 3.5 {
            Self::A
        } else if gpa >= 3.0 {
            Self::B
        } else if gpa >= 2.5 {
            Self::C
        } else if gpa >= 2.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub fn is_failing(self) -> bool {
        matches!(self, Self::D | Self::F)
    }
}

impl fmt::Display for GradeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bands_follow_expected_thresholds() {
        assert_eq!(GradeClass::classify(3.5).id(), 0);
        assert_eq!(GradeClass::classify(3.499999).id(), 1);
        assert_eq!(GradeClass::classify(3.0).id(), 1);
        assert_eq!(GradeClass::classify(2.5).id(), 2);
        assert_eq!(GradeClass::classify(2.0).id(), 3);
        assert_eq!(GradeClass::classify(1.999).id(), 4);
    }

    #[test]
    fn extremes_are_classified() {
        assert_eq!(GradeClass::classify(f64::INFINITY), GradeClass::A);
        assert_eq!(GradeClass::classify(-3.0), GradeClass::F);
        assert_eq!(GradeClass::classify(f64::NEG_INFINITY), GradeClass::F);
        assert_eq!(GradeClass::classify(f64::NAN), GradeClass::F);
    }

    #[test]
    fn only_d_and_f_are_failing() {
        let failing: Vec<_> = GradeClass::ALL.iter().filter(|g| g.is_failing()).collect();
        assert_eq!(failing, vec![&GradeClass::D, &GradeClass::F]);
    }

    proptest! {
        #[test]
        fn higher_gpa_never_gets_a_worse_band(a in -10.0f64..10.0, b in -10.0f64..10.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(GradeClass::classify(high) <= GradeClass::classify(low));
        }
    }
}
