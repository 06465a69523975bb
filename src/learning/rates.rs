use crate::Utility;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// Learning rate and discount, adjustable while a table is shared
/// across workers so that decay schedules can run between epochs.
#[derive(Debug)]
pub struct Rates {
    alpha: AtomicU32,
    gamma: AtomicU32,
}

impl Rates {
    pub fn new(alpha: Utility, gamma: Utility) -> Self {
        Self {
            alpha: AtomicU32::new(alpha.to_bits()),
            gamma: AtomicU32::new(gamma.to_bits()),
        }
    }
    pub fn alpha(&self) -> Utility {
        Utility::from_bits(self.alpha.load(Ordering::Relaxed))
    }
    pub fn gamma(&self) -> Utility {
        Utility::from_bits(self.gamma.load(Ordering::Relaxed))
    }
    pub fn set_alpha(&self, alpha: Utility) {
        self.alpha.store(alpha.to_bits(), Ordering::Relaxed);
    }
    pub fn set_gamma(&self, gamma: Utility) {
        self.gamma.store(gamma.to_bits(), Ordering::Relaxed);
    }
    /// multiplicative learning rate decay
    pub fn decay(&self, factor: Utility) {
        self.set_alpha(self.alpha() * factor);
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::new(crate::ALPHA, crate::GAMMA)
    }
}

impl std::fmt::Display for Rates {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "alpha {:.4} gamma {:.4}", self.alpha(), self.gamma())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_compounds() {
        let rates = Rates::new(0.5, 0.9);
        rates.decay(0.5);
        rates.decay(0.5);
        assert_eq!(rates.alpha(), 0.125);
        assert_eq!(rates.gamma(), 0.9);
    }
}
