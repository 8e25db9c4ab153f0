use crate::NoiseSource;

// Approximate value of sqrt(3)
const SQRT_3: f64 = 1.732_050_807_568_877_293_5;
// Skewing/Unskewing factors for 2D simplex
const F2: f64 = 0.5 * (SQRT_3 - 1.0); // squashes the square grid into a rhombus of equilateral triangles
const G2: f64 = (3.0 - SQRT_3) / 6.0; // reverses the skewing

// Eight gradient directions around the unit circle (axes and diagonals)
const GRAD2: [(f64, f64); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

// Single-octave 2D simplex noise, seeded
// Octave summation is the sampler's job, so this is the bare primitive.
#[derive(Debug, Clone)]
pub struct Simplex2D {
    seed: u64,
    perm: [u8; 512],
}

impl Simplex2D {
    pub fn new(seed: u64) -> Self {
        // build a pseudorandom permutation table of size 256, duplicated into 512
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        // xorshift64; the constant keeps seed 0 away from the all-zero state
        let mut x = seed ^ 0x1234_5678_9ABC_DEF0_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        // Duplicated so corner lookups never need a modulo
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    fn dot(g: (f64, f64), x: f64, y: f64) -> f64 {
        g.0 * x + g.1 * y
    }

    // Contribution of one simplex corner at offset (x, y)
    #[inline]
    fn corner(&self, gi: usize, x: f64, y: f64) -> f64 {
        // Circular falloff of influence
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t2 = t * t;
            t2 * t2 * Self::dot(GRAD2[gi], x, y)
        } else {
            0.0
        }
    }

    // Raw 2D Simplex noise at (xin, yin)
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        // Skew input space to find the containing simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();

        // Unskew back to get the position relative to the cell origin
        let t = (i + j) * G2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // Offsets for remaining corners
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Hash the three corners; rem_euclid keeps negative cells in 0..256
        let ii = (i as i64).rem_euclid(256) as usize;
        let jj = (j as i64).rem_euclid(256) as usize;
        let gi0 = self.perm[ii + self.perm[jj] as usize] as usize % GRAD2.len();
        let gi1 = self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize % GRAD2.len();
        let gi2 = self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize % GRAD2.len();

        let n = self.corner(gi0, x0, y0) + self.corner(gi1, x1, y1) + self.corner(gi2, x2, y2);

        // Scale to roughly [-1, 1]
        70.0 * n
    }
}

impl NoiseSource for Simplex2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y).clamp(-1.0, 1.0)
    }
}
