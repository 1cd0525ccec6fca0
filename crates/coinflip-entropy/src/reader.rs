use crate::mixer::uniform_float_at;
use rand::Rng;

/// A cursor over expanded entropy bytes. Consumes 4 bytes per uniform
/// sample and 8 bytes per Gaussian sample (a pair of uniforms via
/// Box–Muller).
///
/// When the cursor runs out of bytes it falls back to a non-deterministic
/// uniform source (`rand::thread_rng`). This is a documented degradation
/// path — callers that need determinism must supply enough expanded bytes
/// up front.
pub struct EntropyReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    fell_back: bool,
}

impl<'a> EntropyReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0, fell_back: false }
    }

    /// Whether this reader has had to fall back to the non-deterministic
    /// source at least once.
    pub fn degraded(&self) -> bool {
        self.fell_back
    }

    pub fn next_uniform(&mut self) -> f64 {
        match uniform_float_at(self.bytes, self.offset) {
            Some(v) => {
                self.offset += 4;
                v
            }
            None => {
                self.fell_back = true;
                rand::thread_rng().gen_range(0.0..1.0)
            }
        }
    }

    pub fn next_uniform_in_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_uniform()
    }

    /// `z0 = sqrt(-2 * ln(max(u1, 1e-10))) * cos(2*pi*u2)`, returning
    /// `mean + std_dev * z0`.
    pub fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_uniform().max(1e-10);
        let u2 = self.next_uniform();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z0
    }
}
