use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;

use crate::types::{SensorKind, SensorSample};

/// Carga una traza de muestras desde un CSV en el formato
/// timestamp_ns,sensor,x,y,z con sensor en {acc, gyr, lin}.
///
/// El orden del archivo ES el orden de entrega: cada fila es una lectura
/// tal como la emitió el dispositivo, y el ventaneo depende de ese orden.
/// Por eso no se reordena ni se rellena nada; cualquier fila ilegible
/// corta la carga con error.
pub fn load_samples_from_csv(path: impl AsRef<Path>) -> Result<Vec<SensorSample>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("No se pudo abrir la traza {:?}", path))?;

    let mut samples = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Fila {} inválida en {:?}", row_idx + 1, path))?;
        if record.len() < 5 {
            bail!("La fila {} no tiene 5 columnas", row_idx + 1);
        }

        let timestamp_ns: i64 = record[0]
            .parse()
            .with_context(|| format!("timestamp_ns inválido en fila {}", row_idx + 1))?;
        let kind = SensorKind::from_code(&record[1]).ok_or_else(|| {
            anyhow!(
                "Sensor desconocido {:?} en fila {} (se espera acc, gyr o lin)",
                &record[1],
                row_idx + 1
            )
        })?;

        let x: f32 = record[2]
            .parse()
            .with_context(|| format!("x inválido en fila {}", row_idx + 1))?;
        let y: f32 = record[3]
            .parse()
            .with_context(|| format!("y inválido en fila {}", row_idx + 1))?;
        let z: f32 = record[4]
            .parse()
            .with_context(|| format!("z inválido en fila {}", row_idx + 1))?;

        samples.push(SensorSample::new(timestamp_ns, kind, x, y, z));
    }

    if samples.is_empty() {
        return Err(anyhow!("La traza {:?} no contiene muestras", path));
    }

    Ok(samples)
}

/// Guarda una traza en el mismo formato que lee load_samples_from_csv
pub fn save_samples_to_csv(path: impl AsRef<Path>, samples: &[SensorSample]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("No se pudo crear la traza {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "timestamp_ns,sensor,x,y,z")?;
    for sample in samples {
        writeln!(
            writer,
            "{},{},{},{},{}",
            sample.timestamp_ns,
            sample.kind.code(),
            sample.x,
            sample.y,
            sample.z
        )?;
    }
    writer.flush()?;

    Ok(())
}
