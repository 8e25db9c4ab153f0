use std::str::FromStr;

use noisetex::NoiseParameters;

// Text contents of the four parameter inputs
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInputs {
    pub octaves: String,
    pub persistence: String,
    pub lacunarity: String,
    pub exponent: String,
}

impl ParamInputs {
    pub fn from_params(params: &NoiseParameters) -> Self {
        Self {
            octaves: params.octaves.to_string(),
            persistence: params.persistence.to_string(),
            lacunarity: params.lacunarity.to_string(),
            exponent: params.exponent.to_string(),
        }
    }

    // Read the inputs into a new parameter set, field by field.
    // A field that does not parse to a usable value keeps its value from `current`,
    // so the result is valid whenever `current` is.
    pub fn resolve(&self, current: &NoiseParameters) -> NoiseParameters {
        NoiseParameters {
            octaves: parse_or_keep("octaves", &self.octaves, current.octaves, |&v| v >= 1),
            persistence: parse_or_keep(
                "persistence",
                &self.persistence,
                current.persistence,
                |v: &f64| v.is_finite(),
            ),
            lacunarity: parse_or_keep(
                "lacunarity",
                &self.lacunarity,
                current.lacunarity,
                |v: &f64| v.is_finite(),
            ),
            exponent: parse_or_keep("exponent", &self.exponent, current.exponent, |v: &f64| {
                v.is_finite()
            }),
        }
    }
}

fn parse_or_keep<T>(name: &str, text: &str, previous: T, usable: impl Fn(&T) -> bool) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    match text.trim().parse::<T>() {
        Ok(v) if usable(&v) => v,
        _ => {
            tracing::debug!("ignoring {} input {:?}, keeping {:?}", name, text, previous);
            previous
        }
    }
}
