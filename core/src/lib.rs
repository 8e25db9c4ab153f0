// noisetex holds the fractal noise sampler and the helpers around it
pub mod fbm;
pub mod field;
pub mod params;
pub mod render;
pub mod simplex2;

pub use fbm::{accumulate_octaves, compute_fbm};
pub use field::{FractalSampler, SamplerError, ScalarField, centered_coord, generate_field};
pub use params::{NoiseParameters, ParamsError};
pub use render::{RenderError, intensity, save_png, to_gray_image, to_rgba8, to_rgba_image};
pub use simplex2::Simplex2D;

// A deterministic 2D noise primitive.
// Implementations must return values in [-1, +1] and give the same value
// for the same (x, y) for as long as the source lives.
pub trait NoiseSource {
    // Sample the noise at (x, y).
    fn sample(&self, x: f64, y: f64) -> f64;
}

// Plain functions and closures work as sources, e.g. `|_, _| 0.0`.
impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

