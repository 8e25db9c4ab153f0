use noisetex::{NoiseParameters, Simplex2D, generate_field};

fn main() {
    // 128×128 field with seed 2025 and the default settings
    let noise = Simplex2D::new(2025);
    let field = generate_field(128, 128, &noise, &NoiseParameters::default()).unwrap();

    // Print the top-left 16×16 corner of the field
    for row in field.rows().take(16) {
        for v in &row[..16] {
            print!("{:>6.3} ", v);
        }
        println!();
    }
}
