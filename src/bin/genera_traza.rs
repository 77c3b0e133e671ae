use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use actiscopio::csv_loader::save_samples_to_csv;
use actiscopio::source::generate_trace;

struct GenerateOptions {
    rounds: usize,
    seed: u64,
    sample_rate_hz: f32,
}

fn parse_args() -> Result<(PathBuf, GenerateOptions)> {
    let mut rounds = 300usize;
    let mut seed = 2024u64;
    let mut sample_rate_hz = 50.0f32;
    let mut out_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--vueltas" => {
                rounds = args
                    .next()
                    .ok_or_else(|| anyhow!("--vueltas requiere un número"))?
                    .parse()?;
            }
            "--semilla" => {
                seed = args
                    .next()
                    .ok_or_else(|| anyhow!("--semilla requiere un número"))?
                    .parse()?;
            }
            "--frecuencia" => {
                sample_rate_hz = args
                    .next()
                    .ok_or_else(|| anyhow!("--frecuencia requiere un valor en Hz"))?
                    .parse()?;
            }
            _ => {
                if out_path.is_some() {
                    bail!(
                        "Uso: genera_traza [--vueltas N] [--semilla N] [--frecuencia HZ] <salida.csv>"
                    );
                }
                out_path = Some(PathBuf::from(arg));
            }
        }
    }

    let out_path = out_path.ok_or_else(|| anyhow!("Debes especificar el archivo de salida"))?;
    Ok((
        out_path,
        GenerateOptions {
            rounds,
            seed,
            sample_rate_hz,
        },
    ))
}

fn main() -> Result<()> {
    let (out_path, opts) = parse_args()?;

    println!(
        "🎛️  Generando traza sintética: {} vueltas a {} Hz (semilla {})",
        opts.rounds, opts.sample_rate_hz, opts.seed
    );

    let samples = generate_trace(opts.sample_rate_hz, opts.seed, opts.rounds);
    save_samples_to_csv(&out_path, &samples)?;

    println!("✅ {} muestras guardadas en {:?}", samples.len(), out_path);
    println!("   Reproducir con: actiscopio {}", out_path.display());
    Ok(())
}
