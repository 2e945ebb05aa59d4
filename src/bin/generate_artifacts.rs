use std::fs::File;
use std::io::BufWriter;

use water_quality_predictor::data::estimator::{LinearEstimator, ModelInfo};
use water_quality_predictor::{Pollutant, SavedEstimator, SavedModel};

const N_STATIONS: usize = 22;
const BASE_YEAR: f64 = 2000.0;

/// Typical concentration (mg/L) and yearly drift per pollutant.
const BASELINES: [(f64, f64); 6] = [
    (8.5, -0.02),  // O₂
    (4.0, 0.05),   // NO₃
    (0.15, 0.002), // NO₂
    (60.0, 0.30),  // SO₄
    (0.40, 0.004), // PO₄
    (45.0, 0.25),  // Cl⁻
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [-1, 1).
    fn next_signed(&mut self) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        unit * 2.0 - 1.0
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Columns: year, then one indicator per station
    let mut columns = vec!["year".to_string()];
    columns.extend((1..=N_STATIONS).map(|i| format!("id_{i}")));

    // y = base + drift * (year - 2000) + station offset
    //   = (base - drift * 2000) + drift * year + offset[station]
    let mut coefficients = Vec::with_capacity(Pollutant::ALL.len());
    let mut intercepts = Vec::with_capacity(Pollutant::ALL.len());
    for &(base, drift) in &BASELINES {
        let mut row = vec![drift];
        row.extend((0..N_STATIONS).map(|_| base * 0.25 * rng.next_signed()));
        coefficients.push(row);
        intercepts.push(base - drift * BASE_YEAR);
    }

    let model = SavedModel {
        info: ModelInfo {
            name: Some("Sample linear model".to_string()),
            accuracy: None,
            updated: None,
        },
        estimator: SavedEstimator::Linear(LinearEstimator {
            coefficients,
            intercepts,
        }),
    };

    let columns_path = "model_columns.json";
    let file = File::create(columns_path).expect("Failed to create columns file");
    serde_json::to_writer_pretty(BufWriter::new(file), &columns)
        .expect("Failed to write columns");

    let model_path = "pollution_model.json";
    let file = File::create(model_path).expect("Failed to create model file");
    serde_json::to_writer_pretty(BufWriter::new(file), &model).expect("Failed to write model");

    println!(
        "Wrote {} columns to {columns_path} and a {}-output model to {model_path}",
        columns.len(),
        Pollutant::ALL.len()
    );
}
