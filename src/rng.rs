//! Small deterministic generator for layout hints and palette picks.

/// Linear congruential generator (Numerical Recipes constants). Not suitable
/// for anything beyond scattering nodes and picking palette entries, which is
/// all it is used for.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
	pub fn new(seed: u64) -> Self {
		Self(seed)
	}

	fn next(&mut self) -> u64 {
		self.0 = self
			.0
			.wrapping_mul(6364136223846793005)
			.wrapping_add(1442695040888963407);
		self.0
	}

	/// Uniform value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		// Top 53 bits, the double mantissa width.
		(self.next() >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform index in `[0, len)`.
	pub fn pick(&mut self, len: usize) -> usize {
		(self.next_f64() * len as f64) as usize
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn next_f64_stays_in_unit_interval() {
		let mut rng = Lcg::new(42);
		for _ in 0..1000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v));
		}
	}

	#[test]
	fn pick_stays_in_bounds() {
		let mut rng = Lcg::new(7);
		for _ in 0..1000 {
			assert!(rng.pick(3) < 3);
		}
	}

	#[test]
	fn same_seed_same_sequence() {
		let (mut a, mut b) = (Lcg::new(99), Lcg::new(99));
		for _ in 0..10 {
			assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
		}
	}
}
