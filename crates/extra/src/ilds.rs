//! Integer low-discrepancy sequences.
//!
//! A van der Corput sequence visits the integers below `base^scale` in
//! an order that spreads consecutive samples far apart, which makes it
//! a handy deterministic stand-in for random test coordinates: the
//! points look irregular but every run is reproducible.

use ortho_geom::{point, Point};

/// The `num`-th element of the van der Corput sequence in the given
/// base, scaled to integers below `base^scale`: the base-`base` digits
/// of `num` mirrored around the radix point.
pub fn vdc(num: u32, base: u32, scale: u32) -> u32 {
    let mut vdc = 0;
    let mut factor = base.pow(scale);
    let mut remaining = num;
    while remaining != 0 {
        factor /= base;
        vdc += (remaining % base) * factor;
        remaining /= base;
    }
    vdc
}

/// Incremental van der Corput generator.
#[derive(Clone, Debug)]
pub struct VdCorput {
    count: u32,
    base: u32,
    scale: u32,
}

impl VdCorput {
    pub fn new(base: u32, scale: u32) -> Self {
        VdCorput { count: 0, base, scale }
    }

    /// Next element of the sequence.
    pub fn pop(&mut self) -> u32 {
        self.count += 1;
        vdc(self.count, self.base, self.scale)
    }

    /// Restart the sequence at position `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.count = seed;
    }
}

/// Two-dimensional Halton generator: one van der Corput sequence per
/// axis, with coprime bases.
#[derive(Clone, Debug)]
pub struct Halton {
    vdc0: VdCorput,
    vdc1: VdCorput,
}

impl Halton {
    pub fn new(base: [u32; 2], scale: [u32; 2]) -> Self {
        Halton {
            vdc0: VdCorput::new(base[0], scale[0]),
            vdc1: VdCorput::new(base[1], scale[1]),
        }
    }

    /// Next 2D sample.
    pub fn pop(&mut self) -> Point<i32, i32> {
        point(self.vdc0.pop() as i32, self.vdc1.pop() as i32)
    }

    pub fn reseed(&mut self, seed: u32) {
        self.vdc0.reseed(seed);
        self.vdc1.reseed(seed);
    }
}
