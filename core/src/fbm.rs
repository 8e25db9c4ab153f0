use crate::NoiseSource;
use crate::params::NoiseParameters;

// Sum `octaves` layers of the source at (x, y) (Fractal Brownian Motion)
// Each layer is remapped to [0, 1] before weighting, and the sum is divided by
// the total weight, so the result stays in [0, 1] for any persistence.
// No exponent is applied here.
pub fn accumulate_octaves<N>(x: f64, y: f64, noise: &N, params: &NoiseParameters) -> f64
where
    N: NoiseSource + ?Sized,
{
    let gain = params.gain();

    let mut amplitude = 1.0; // Weight of the current octave
    let mut frequency = 1.0; // How zoomed in we are on the noise pattern
    let mut total = 0.0; // Weighted sum of remapped samples
    let mut normalization = 0.0; // Sum of all weights used so far

    for _ in 0..params.octaves {
        // [-1, 1] -> [0, 1]
        let v = noise.sample(x * frequency, y * frequency) * 0.5 + 0.5;
        total += v * amplitude;

        normalization += amplitude;
        amplitude *= gain;
        frequency *= params.lacunarity;
    }

    // Zero normalization gives NaN here; callers decide what to do with it
    total / normalization
}

// fBm value at (x, y) shaped by the power curve `params.exponent`
// Exponents above 1 darken the midtones, below 1 brighten them.
#[inline]
pub fn compute_fbm<N>(x: f64, y: f64, noise: &N, params: &NoiseParameters) -> f64
where
    N: NoiseSource + ?Sized,
{
    accumulate_octaves(x, y, noise, params).powf(params.exponent)
}
