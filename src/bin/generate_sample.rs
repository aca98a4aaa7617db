//! Write a deterministic sample `pricelist.csv`.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]` (defaults: `pricelist.csv`, 500).

use anyhow::{Context, Result};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const ADJECTIVES: &[&str] = &["Fresh", "Dried", "Organic", "Frozen", "Smoked", "Canned"];
const PRODUCTS: &[&str] = &[
    "Apple", "Apricot", "Banana", "Cheddar", "Salmon", "Almonds", "Tomato", "Pineapple",
    "Basmati Rice", "Olive Oil",
];
const UNITS: &[&str] = &["EA", "KG", "BOX 12", "CASE 24", "L", "PACK 6"];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "pricelist.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("row count {n:?} is not a number"))?,
        None => 500,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for i in 1..=rows {
        let name = format!("{} {}", rng.pick(ADJECTIVES), rng.pick(PRODUCTS));
        let unit = rng.pick(UNITS);

        // Every 97th price is junk so the 0.0 fallback shows up in real data.
        let price = if i % 97 == 0 {
            "N/A".to_string()
        } else {
            format!("{:.2}", 0.5 + rng.next_f64() * 120.0)
        };

        writer
            .write_record([format!("SP{i:05}"), name, unit.to_string(), price])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} price list rows to {output_path}");
    Ok(())
}
