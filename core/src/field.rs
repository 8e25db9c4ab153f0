use std::time::Instant;

use thiserror::Error;

use crate::NoiseSource;
use crate::fbm::compute_fbm;
use crate::params::{NoiseParameters, ParamsError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    #[error("invalid noise parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: usize, height: usize },
}

// Dense row-major grid of values in [0, 1], kept at full f64 precision
// access as `values[x + y * width]` or `get(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[x + y * self.width])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    // One slice per row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.width)
    }
}

// Map a grid index to a coordinate in [-0.5, 0.5), centred on the origin.
// Same nominal scale for every resolution.
#[inline]
pub fn centered_coord(index: usize, extent: usize) -> f64 {
    index as f64 / extent as f64 - 0.5
}

// Sample the fBm over a `width`×`height` grid.
// Degenerate settings can push cells out of [0, 1]: non-finite cells are
// stored as 0, finite ones (e.g. from a negative exponent) are clamped.
pub fn generate_field<N>(
    width: usize,
    height: usize,
    noise: &N,
    params: &NoiseParameters,
) -> Result<ScalarField, SamplerError>
where
    N: NoiseSource + ?Sized,
{
    params.validate()?;
    if width == 0 || height == 0 {
        return Err(SamplerError::EmptyGrid { width, height });
    }

    let cells = width
        .checked_mul(height)
        .ok_or(SamplerError::GridTooLarge { width, height })?;

    let start = Instant::now();
    let mut values = Vec::with_capacity(cells);
    let mut non_finite = 0usize;
    let mut clamped = 0usize;

    for y in 0..height {
        let ny = centered_coord(y, height);
        for x in 0..width {
            let nx = centered_coord(x, width);
            let v = compute_fbm(nx, ny, noise, params);
            if !v.is_finite() {
                non_finite += 1;
                values.push(0.0);
            } else if !(0.0..=1.0).contains(&v) {
                clamped += 1;
                values.push(v.clamp(0.0, 1.0));
            } else {
                values.push(v);
            }
        }
    }

    if non_finite > 0 || clamped > 0 {
        log::warn!(
            "{} of {} cells were non-finite and set to 0, {} clamped to [0, 1] ({:?})",
            non_finite,
            cells,
            clamped,
            params
        );
    }
    log::debug!(
        "generated {}x{} field with {:?} in {:.2} ms",
        width,
        height,
        params,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(ScalarField {
        width,
        height,
        values,
    })
}

// A noise source paired with validated parameters,
// for callers that regenerate with the same inputs.
pub struct FractalSampler<N> {
    noise: N,
    params: NoiseParameters,
}

impl<N: NoiseSource> FractalSampler<N> {
    pub fn new(noise: N, params: NoiseParameters) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { noise, params })
    }

    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    // Shaped fBm value at (x, y)
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        compute_fbm(x, y, &self.noise, &self.params)
    }

    pub fn generate(&self, width: usize, height: usize) -> Result<ScalarField, SamplerError> {
        generate_field(width, height, &self.noise, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{FractalSampler, SamplerError, centered_coord, generate_field};
    use crate::{NoiseParameters, ParamsError, Simplex2D, compute_fbm};

    fn params(octaves: u32, persistence: f64, lacunarity: f64, exponent: f64) -> NoiseParameters {
        NoiseParameters::new(octaves, persistence, lacunarity, exponent).unwrap()
    }

    #[test]
    fn field_dimensions() {
        let noise = Simplex2D::new(1);
        let f = generate_field(37, 19, &noise, &NoiseParameters::default()).unwrap();
        assert_eq!(f.width(), 37);
        assert_eq!(f.height(), 19);
        assert_eq!(f.len(), 37 * 19);
        assert!(!f.is_empty());
        assert_eq!(f.rows().count(), 19);
        assert!(f.rows().all(|r| r.len() == 37));
    }

    #[test]
    fn field_corner_coordinates() {
        let (w, h) = (8, 5);
        // First octave of each cell is sampled at the cell's own coordinate
        let calls = RefCell::new(Vec::new());
        let noise = |x: f64, y: f64| {
            calls.borrow_mut().push((x, y));
            0.0
        };
        generate_field(w, h, &noise, &params(1, 1.0, 2.0, 1.0)).unwrap();
        let calls = calls.into_inner();
        assert_eq!(calls.len(), w * h);
        assert_eq!(calls[0], (-0.5, -0.5));
        assert_eq!(
            calls[w * h - 1],
            ((w - 1) as f64 / w as f64 - 0.5, (h - 1) as f64 / h as f64 - 0.5)
        );
        // Row-major: the second call is one step to the right
        assert_eq!(calls[1], (centered_coord(1, w), -0.5));
    }

    #[test]
    fn field_matches_compute_fbm() {
        let noise = Simplex2D::new(99);
        let p = params(5, 0.7, 2.3, 1.5);
        let f = generate_field(16, 12, &noise, &p).unwrap();
        for y in 0..12 {
            for x in 0..16 {
                let expected = compute_fbm(centered_coord(x, 16), centered_coord(y, 12), &noise, &p);
                assert_eq!(f.get(x, y), Some(expected));
                assert_eq!(f.values()[x + y * 16], expected);
            }
        }
        assert_eq!(f.get(16, 0), None);
        assert_eq!(f.get(0, 12), None);
    }

    #[test]
    fn field_is_idempotent() {
        let noise = Simplex2D::new(2024);
        let p = params(6, 0.8, 2.0, 1.3);
        let a = generate_field(64, 48, &noise, &p).unwrap();
        let b = generate_field(64, 48, &noise, &p).unwrap();
        let bits = |f: &super::ScalarField| f.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn field_constant_zero_scenario() {
        let f = generate_field(2, 1, &|_: f64, _: f64| 0.0, &params(1, 1.0, 2.0, 2.0)).unwrap();
        assert_eq!(f.values(), &[0.25f64, 0.25]);
    }

    #[test]
    fn field_constant_one_scenario() {
        for &exponent in &[0.5, 2.0, 5.0] {
            let p = params(3, 1.0, 2.0, exponent);
            let f = generate_field(4, 3, &|_: f64, _: f64| 1.0, &p).unwrap();
            assert!(f.values().iter().all(|&v| v == 1.0));
        }
    }

    #[test]
    fn field_values_in_unit_range() {
        let noise = Simplex2D::new(5);
        let f = generate_field(64, 64, &noise, &NoiseParameters::default()).unwrap();
        for &v in f.values() {
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn field_rejects_zero_octaves() {
        let p = NoiseParameters {
            octaves: 0,
            ..NoiseParameters::default()
        };
        let err = generate_field(4, 4, &|_: f64, _: f64| 0.0, &p).unwrap_err();
        assert_eq!(err, SamplerError::Params(ParamsError::ZeroOctaves));
    }

    #[test]
    fn field_rejects_empty_grid() {
        let p = NoiseParameters::default();
        let noise = |_: f64, _: f64| 0.0;
        assert_eq!(
            generate_field(0, 4, &noise, &p),
            Err(SamplerError::EmptyGrid {
                width: 0,
                height: 4
            })
        );
        assert!(generate_field(4, 0, &noise, &p).is_err());
    }

    #[test]
    fn field_non_finite_cells_become_zero() {
        // -1 remaps to 0, and 0^-1 is infinite
        let p = params(2, 1.0, 2.0, -1.0);
        let f = generate_field(3, 3, &|_: f64, _: f64| -1.0, &p).unwrap();
        assert!(f.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn sampler_matches_free_function() {
        let p = params(4, 1.0, 2.0, 2.0);
        let sampler = FractalSampler::new(Simplex2D::new(11), p).unwrap();
        let a = sampler.generate(20, 10).unwrap();
        let b = generate_field(20, 10, sampler.noise(), sampler.params()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            sampler.sample(0.1, 0.2),
            compute_fbm(0.1, 0.2, sampler.noise(), &p)
        );
    }

    #[test]
    fn sampler_rejects_zero_octaves() {
        let p = NoiseParameters {
            octaves: 0,
            ..NoiseParameters::default()
        };
        assert!(FractalSampler::new(Simplex2D::new(0), p).is_err());
    }

    #[test]
    fn field_negative_exponent_clamped() {
        // 0.5^-1 = 2 is finite but above 1
        let f = generate_field(2, 1, &|_: f64, _: f64| 0.0, &params(1, 1.0, 2.0, -1.0)).unwrap();
        assert_eq!(f.values(), &[1.0f64, 1.0]);

        let noise = Simplex2D::new(17);
        let f = generate_field(32, 32, &noise, &params(4, 0.5, 2.0, -2.5)).unwrap();
        for &v in f.values() {
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn field_keeps_full_precision() {
        // 0.5^200 underflows f32 but not f64
        let p = params(1, 1.0, 2.0, 200.0);
        let noise = |_: f64, _: f64| 0.0;
        let f = generate_field(1, 1, &noise, &p).unwrap();
        let expected = 0.5f64.powf(200.0);
        assert!(expected > 0.0);
        assert_eq!(f.get(0, 0), Some(expected));
        assert_eq!(f.get(0, 0), Some(compute_fbm(-0.5, -0.5, &noise, &p)));
    }

    #[test]
    fn field_rejects_oversized_grid() {
        let noise = |_: f64, _: f64| 0.0;
        assert_eq!(
            generate_field(usize::MAX, 2, &noise, &NoiseParameters::default()),
            Err(SamplerError::GridTooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }
}
