//! Writes a synthetic phone catalogue with the dashboard's full schema to
//! `smartphones.csv` and `smartphones.parquet`.
//!
//! Usage: `generate_sample [ROWS] [OUTPUT_STEM]` (defaults: 981, `smartphones`).

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

// Shares the dashboard's record layout so the generated header always matches
// what the loader requires.
#[allow(dead_code)]
#[path = "../data/model.rs"]
mod model;

use model::{Record, REQUIRED_COLUMNS};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// `Some(value)` except with probability `p_missing`.
    fn maybe<T>(&mut self, p_missing: f64, value: T) -> Option<T> {
        (!self.chance(p_missing)).then_some(value)
    }
}

/// Brand name, model series names, typical price.
const BRANDS: [(&str, &[&str], f64); 10] = [
    ("samsung", &["Galaxy A", "Galaxy M", "Galaxy S", "Galaxy F"], 30000.0),
    ("xiaomi", &["Redmi Note", "Redmi", "Xiaomi"], 18000.0),
    ("apple", &["iPhone"], 80000.0),
    ("oneplus", &["OnePlus", "OnePlus Nord"], 35000.0),
    ("realme", &["Realme", "Realme Narzo", "Realme GT"], 15000.0),
    ("poco", &["Poco X", "Poco M", "Poco F"], 17000.0),
    ("iqoo", &["iQOO Z", "iQOO Neo"], 25000.0),
    ("vivo", &["Vivo Y", "Vivo V", "Vivo T"], 20000.0),
    ("oppo", &["Oppo A", "Oppo Reno", "Oppo F"], 22000.0),
    ("motorola", &["Moto G", "Motorola Edge"], 16000.0),
];

const RAM_GB: [i64; 7] = [2, 3, 4, 6, 8, 12, 16];
const STORAGE_GB: [i64; 6] = [32, 64, 128, 256, 512, 1024];
const REFRESH_HZ: [i64; 4] = [60, 90, 120, 144];

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn generate_phone(rng: &mut SimpleRng) -> Record {
    let &(brand, series, base_price) = rng.pick(&BRANDS);
    let series = rng.pick(series);
    let number = 1 + rng.next_u64() % 60;

    let price = round_to(base_price * rng.gauss(0.0, 0.45).exp(), 100.0).max(3000.0);
    // 0 = budget … 1 = flagship
    let tier = ((price.ln() - 8.0) / 3.5).clamp(0.0, 1.0);
    let tier_index = |len: usize, rng: &mut SimpleRng| {
        let jitter = rng.gauss(0.0, 0.8);
        ((tier * (len - 1) as f64 + jitter).round().max(0.0) as usize).min(len - 1)
    };

    let is_apple = brand == "apple";
    let ram = RAM_GB[tier_index(RAM_GB.len(), rng)];
    let storage = STORAGE_GB[tier_index(STORAGE_GB.len(), rng)];
    let refresh = if is_apple { 60 } else { REFRESH_HZ[tier_index(REFRESH_HZ.len(), rng)] };
    let rating = round_to(rng.gauss(70.0 + 15.0 * tier, 4.0).clamp(40.0, 98.0), 1.0);
    let speed = round_to(rng.gauss(1.8 + 1.4 * tier, 0.2).clamp(1.2, 3.4), 0.01);
    let battery = round_to(rng.gauss(if is_apple { 3300.0 } else { 5000.0 }, 350.0), 10.0);
    let charging = round_to(rng.gauss(18.0 + 80.0 * tier, 10.0).max(10.0), 1.0);
    let display = round_to(rng.gauss(6.5, 0.15), 0.01);
    let rear = *rng.pick(&[12.0, 13.0, 48.0, 50.0, 64.0, 108.0, 200.0]);
    let front = *rng.pick(&[5.0, 8.0, 12.0, 16.0, 32.0]);

    let has_5g = rng.chance(0.15 + 0.85 * tier);
    let has_nfc = rng.chance(0.1 + 0.8 * tier);
    let has_ir = matches!(brand, "xiaomi" | "poco") && rng.chance(0.9);
    let card = !is_apple && rng.chance(0.8 - 0.6 * tier);

    Record {
        brand_name: brand.to_string(),
        model: format!("{series} {number}"),
        price: Some(price as i64),
        rating: rng.maybe(0.1, rating),
        has_5g: Some(has_5g),
        has_nfc: Some(has_nfc),
        has_ir_blaster: Some(has_ir),
        processor_speed: rng.maybe(0.04, speed),
        battery_capacity: rng.maybe(0.01, battery as i64),
        fast_charging: rng.maybe(0.2, charging),
        ram_capacity: rng.maybe(0.01, ram),
        storage_capacity: rng.maybe(0.01, storage),
        display_size: Some(display),
        refresh_rate: Some(refresh),
        max_rear_camera_mp: Some(rear),
        max_front_camera_mp: rng.maybe(0.005, front),
        card_supported: Some(card),
        os: Some(if is_apple { "ios" } else { "android" }.to_string()),
        sim_type: Some(if rng.chance(0.85) { "dual" } else { "single" }.to_string()),
    }
}

fn write_csv(phones: &[Record], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for phone in phones {
        writer.serialize(phone).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(phones: &[Record], path: &str) -> Result<()> {
    let ints = |f: fn(&Record) -> Option<i64>| -> ArrayRef {
        Arc::new(Int64Array::from(phones.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&Record) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(phones.iter().map(f).collect::<Vec<_>>()))
    };
    let flags = |f: fn(&Record) -> Option<bool>| -> ArrayRef {
        Arc::new(BooleanArray::from(phones.iter().map(f).collect::<Vec<_>>()))
    };
    let texts = |f: fn(&Record) -> Option<&str>| -> ArrayRef {
        Arc::new(StringArray::from(phones.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("brand_name", DataType::Utf8, texts(|p| Some(p.brand_name.as_str()))),
        ("model", DataType::Utf8, texts(|p| Some(p.model.as_str()))),
        ("price", DataType::Int64, ints(|p| p.price)),
        ("rating", DataType::Float64, floats(|p| p.rating)),
        ("has_5g", DataType::Boolean, flags(|p| p.has_5g)),
        ("has_nfc", DataType::Boolean, flags(|p| p.has_nfc)),
        ("has_ir_blaster", DataType::Boolean, flags(|p| p.has_ir_blaster)),
        ("processor_speed", DataType::Float64, floats(|p| p.processor_speed)),
        ("battery_capacity", DataType::Int64, ints(|p| p.battery_capacity)),
        ("fast_charging", DataType::Float64, floats(|p| p.fast_charging)),
        ("ram_capacity", DataType::Int64, ints(|p| p.ram_capacity)),
        ("storage_capacity", DataType::Int64, ints(|p| p.storage_capacity)),
        ("display_size", DataType::Float64, floats(|p| p.display_size)),
        ("refresh_rate", DataType::Int64, ints(|p| p.refresh_rate)),
        ("max_rear_camera_MP", DataType::Float64, floats(|p| p.max_rear_camera_mp)),
        ("max_front_camera_MP", DataType::Float64, floats(|p| p.max_front_camera_mp)),
        ("card_supported", DataType::Boolean, flags(|p| p.card_supported)),
        ("os", DataType::Utf8, texts(|p| p.os.as_deref())),
        ("sim_type", DataType::Utf8, texts(|p| p.sim_type.as_deref())),
    ];

    debug_assert!(columns.iter().map(|c| c.0).eq(REQUIRED_COLUMNS));

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty, _)| Field::new(*name, ty.clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, _, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 981,
    };
    let stem = args.next().unwrap_or_else(|| "smartphones".to_string());

    let mut rng = SimpleRng::new(42);
    let phones: Vec<Record> = (0..rows).map(|_| generate_phone(&mut rng)).collect();

    let csv_path = format!("{stem}.csv");
    let parquet_path = format!("{stem}.parquet");
    write_csv(&phones, &csv_path)?;
    write_parquet(&phones, &parquet_path)?;

    log::info!("Wrote {} phones to {csv_path} and {parquet_path}", phones.len());
    println!("Wrote {} phones to {csv_path} and {parquet_path}", phones.len());
    Ok(())
}
