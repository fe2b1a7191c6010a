use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/*
Lock-Free Parameters
====================

A Param is a single f64 shared between the control thread (UI, key input)
and the audio thread. The value lives in an AtomicU64 as raw IEEE-754 bits:

    set(2.5)  →  bits = 2.5f64.to_bits()  →  atomic store
    get()     →  atomic load               →  f64::from_bits(bits)

One writer, one reader, last value wins. There is no smoothing: a node reads
the value once at the top of each block, so a change lands on the next block
boundary.

Every Param carries a range; `set` clamps into it so the audio thread never
sees an out-of-range value.
*/

#[derive(Debug)]
struct ParamInner {
    bits: AtomicU64,
    min: f64,
    max: f64,
}

/// Shared f64 parameter handle. Clones refer to the same value.
#[derive(Debug, Clone)]
pub struct Param(Arc<ParamInner>);

impl Param {
    /// Create a parameter clamped to `[min, max]`.
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        let value = value.clamp(min, max);
        Self(Arc::new(ParamInner {
            bits: AtomicU64::new(value.to_bits()),
            min,
            max,
        }))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.bits.load(Ordering::Relaxed))
    }

    /// Store a new value, clamped into range. NaN is ignored.
    pub fn set(&self, value: f64) {
        if value.is_nan() {
            return;
        }
        let value = value.clamp(self.0.min, self.0.max);
        self.0.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn range(&self) -> (f64, f64) {
        (self.0.min, self.0.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value() {
        let a = Param::new(2.1, 0.0, 20.0);
        let b = a.clone();
        a.set(5.5);
        assert_eq!(b.get(), 5.5);
    }

    #[test]
    fn clamps_into_range() {
        let mix = Param::new(3.0, 0.0, 1.0);
        assert_eq!(mix.get(), 1.0);
        mix.set(-0.5);
        assert_eq!(mix.get(), 0.0);
        mix.set(0.25);
        assert_eq!(mix.get(), 0.25);
    }

    #[test]
    fn nan_is_ignored() {
        let p = Param::new(0.5, 0.0, 1.0);
        p.set(f64::NAN);
        assert_eq!(p.get(), 0.5);
    }
}
