use noisetex::{NoiseParameters, Simplex2D, generate_field, save_png};

fn main() {
    let size = 512;
    let seed = 42;
    let noise = Simplex2D::new(seed);

    // Default settings, then a few variations on the shaping curve and decay
    let runs = [
        ("fbm_default.png", NoiseParameters::default()),
        ("fbm_flat.png", NoiseParameters::new(3, 1.0, 2.0, 0.5).unwrap()),
        ("fbm_rough.png", NoiseParameters::new(8, 0.5, 2.0, 1.0).unwrap()),
        ("fbm_smooth.png", NoiseParameters::new(6, 2.0, 2.0, 3.0).unwrap()),
    ];

    for (filename, params) in runs {
        let field = generate_field(size, size, &noise, &params).unwrap();
        save_png(&field, filename).unwrap();
        println!("Saved {} ({:?})", filename, params);
    }
}
