use sha2::{Digest, Sha256};

/// Maximum number of bytes `expand` will emit: 256 counter values * 32 bytes
/// per SHA-256 digest.
pub const MAX_EXPAND_LEN: usize = 8192;

/// Deterministic, order-sensitive SHA-256 of the concatenation of all input
/// buffers. `mix([a, b]) != mix([b, a])` almost surely. An empty buffer list
/// produces an empty output rather than hashing zero bytes.
pub fn mix(buffers: &[&[u8]]) -> Vec<u8> {
    if buffers.is_empty() {
        return Vec::new();
    }
    let mut hasher = Sha256::new();
    for buf in buffers {
        hasher.update(buf);
    }
    hasher.finalize().to_vec()
}

/// Stretches a 32-byte seed into `len` deterministic bytes via SHA-256
/// counter mode: `truncate(SHA256(seed‖0x00) ‖ SHA256(seed‖0x01) ‖ …, len)`.
/// The counter is a single byte, so `len` is capped at [`MAX_EXPAND_LEN`].
pub fn expand(seed: &[u8], len: usize) -> Vec<u8> {
    let len = len.min(MAX_EXPAND_LEN);
    let mut out = Vec::with_capacity(len);
    let mut counter: u8 = 0;
    while out.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update([counter]);
        let digest = hasher.finalize();
        let remaining = len - out.len();
        out.extend_from_slice(&digest[..remaining.min(digest.len())]);
        counter = counter.wrapping_add(1);
        if counter == 0 && out.len() < len {
            // Exhausted all 256 counter values before reaching `len`; this
            // cannot happen while `len <= MAX_EXPAND_LEN`.
            break;
        }
    }
    out
}

/// Reads 4 bytes at `offset` as a little-endian `u32` and divides by `2^32`,
/// yielding a value in `[0, 1)`. Fails when fewer than 4 bytes remain.
pub fn uniform_float_at(bytes: &[u8], offset: usize) -> Option<f64> {
    if offset + 4 > bytes.len() {
        return None;
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    let n = u32::from_le_bytes(buf);
    Some(n as f64 / 4294967296.0_f64)
}

/// Maps a uniform `[0, 1)` sample into `[min, max)`.
pub fn uniform_float_in_range(min: f64, max: f64, uniform: f64) -> f64 {
    min + (max - min) * uniform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_list_yields_empty_output() {
        assert!(mix(&[]).is_empty());
    }

    #[test]
    fn order_matters() {
        let a: &[u8] = b"alpha";
        let b: &[u8] = b"beta";
        assert_ne!(mix(&[a, b]), mix(&[b, a]));
    }

    #[test]
    fn mix_is_deterministic() {
        let a: &[u8] = b"alpha";
        let b: &[u8] = b"beta";
        assert_eq!(mix(&[a, b]), mix(&[a, b]));
    }

    #[test]
    fn expand_is_deterministic_and_sized() {
        let seed = mix(&[b"seed"]);
        let out1 = expand(&seed, 256);
        let out2 = expand(&seed, 256);
        assert_eq!(out1, out2);
        assert_eq!(out1.len(), 256);
    }

    #[test]
    fn expand_caps_at_max_len() {
        let seed = mix(&[b"seed"]);
        let out = expand(&seed, MAX_EXPAND_LEN + 1000);
        assert_eq!(out.len(), MAX_EXPAND_LEN);
    }

    #[test]
    fn biased_seed_expands_to_uniform_looking_bytes() {
        let zero_seed = [0u8; 32];
        let out = expand(&zero_seed, 256);
        let ones: u32 = out.iter().map(|b| b.count_ones()).sum();
        let total_bits = out.len() as f64 * 8.0;
        let fraction = ones as f64 / total_bits;
        assert!((0.4..=0.6).contains(&fraction), "one-bit fraction {fraction}");

        let distinct: std::collections::HashSet<u8> = out.iter().copied().collect();
        assert!(distinct.len() >= 100, "only {} distinct byte values", distinct.len());
    }

    #[test]
    fn uniform_float_bound() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF];
        let v = uniform_float_at(&bytes, 0).unwrap();
        assert!(v < 1.0 - 2f64.powi(-32) + 1e-18);
        assert!(v >= 0.0);
    }

    #[test]
    fn uniform_float_fails_on_short_buffer() {
        let bytes = [0u8; 3];
        assert!(uniform_float_at(&bytes, 0).is_none());
    }

    #[test]
    fn single_bit_flip_causes_avalanche() {
        let a = [0u8; 32];
        let mut b = a;
        b[0] ^= 0x01;

        let out_a = mix(&[&a]);
        let out_b = mix(&[&b]);

        let differing_bytes = out_a.iter().zip(out_b.iter()).filter(|(x, y)| x != y).count();
        assert!(differing_bytes >= 24, "only {differing_bytes} of 32 bytes differed");
    }

    #[test]
    fn uniform_float_in_range_maps_bounds() {
        assert_eq!(uniform_float_in_range(10.0, 20.0, 0.0), 10.0);
        assert!((uniform_float_in_range(10.0, 20.0, 0.5) - 15.0).abs() < 1e-12);
    }
}
