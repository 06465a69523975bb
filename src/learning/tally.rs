/// A win counter packed into 32 bits: `sum` hits out of `count` visits.
///
/// When `count` saturates both halves are halved together, which keeps
/// the ratio and slowly forgets the oldest games.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tally {
    sum: u16,
    count: u16,
}

impl Tally {
    pub fn new(sum: u16, count: u16) -> Self {
        Self { sum, count }
    }
    pub fn sum(&self) -> u16 {
        self.sum
    }
    pub fn count(&self) -> u16 {
        self.count
    }
    /// one more visit, and one more hit if `hit`
    pub fn record(self, hit: bool) -> Self {
        let sum = self.sum + hit as u16;
        let count = self.count + 1;
        match count {
            u16::MAX => Self {
                sum: sum / 2,
                count: count / 2,
            },
            _ => Self { sum, count },
        }
    }
    /// the observed hit rate, zero before any visit
    pub fn mean(&self) -> f32 {
        match self.count {
            0 => 0.,
            n => self.sum as f32 / n as f32,
        }
    }
}

/// u32 isomorphism, sum in the high half
impl From<Tally> for u32 {
    fn from(t: Tally) -> u32 {
        (t.sum as u32) << 16 | t.count as u32
    }
}
impl From<u32> for Tally {
    fn from(n: u32) -> Self {
        Self {
            sum: (n >> 16) as u16,
            count: n as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mean_is_zero() {
        assert_eq!(Tally::default().mean(), 0.);
        assert_eq!(u32::from(Tally::default()), 0);
    }

    #[test]
    fn running_mean() {
        let tally = Tally::default().record(true).record(false).record(true).record(true);
        assert_eq!(tally.count(), 4);
        assert_eq!(tally.sum(), 3);
        assert_eq!(tally.mean(), 0.75);
    }

    #[test]
    fn saturation_halves_both() {
        let tally = Tally::new(1000, u16::MAX - 1).record(true);
        assert_eq!(tally.count(), u16::MAX / 2);
        assert_eq!(tally.sum(), 1001 / 2);
    }

    #[test]
    fn bijective_u32() {
        let tally = Tally::new(12, 345);
        assert_eq!(tally, Tally::from(u32::from(tally)));
    }
}
