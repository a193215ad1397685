use std::fmt;

/// Semitone shift chosen by the user. Unbounded; reduced modulo 12 on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransposeOffset {
    steps: i32,
}

impl TransposeOffset {
    pub const fn zero() -> Self {
        Self { steps: 0 }
    }

    pub const fn new(steps: i32) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> i32 {
        self.steps
    }

    /// Offset reduced into `0..12`.
    pub fn normalized(&self) -> i32 {
        self.steps.rem_euclid(12)
    }

    pub fn increment(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.steps = self.steps.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

impl From<i32> for TransposeOffset {
    fn from(steps: i32) -> Self {
        Self::new(steps)
    }
}

impl fmt::Display for TransposeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_decrement() {
        let mut offset = TransposeOffset::zero();
        offset.increment();
        offset.increment();
        assert_eq!(offset.steps(), 2);
        for _ in 0..5 {
            offset.decrement();
        }
        assert_eq!(offset.steps(), -3);
        assert_eq!(offset.normalized(), 9);
        assert_eq!(offset.to_string(), "-3");

        offset.reset();
        assert_eq!(offset, TransposeOffset::zero());
        assert_eq!(offset.to_string(), "+0");
    }

    #[test]
    fn test_saturates() {
        let mut offset = TransposeOffset::new(i32::MAX);
        offset.increment();
        assert_eq!(offset.steps(), i32::MAX);
        assert_eq!(offset.normalized(), 7);
    }
}
