use crate::types::WINDOW_SIZE;

/// Magnitud euclídea de una lectura tri-axial. La suma de cuadrados se
/// acumula en f64 y solo el resultado final baja a f32, igual que en el
/// entrenamiento del modelo.
pub fn sample_magnitude(x: f32, y: f32, z: f32) -> f32 {
    let sum = (x as f64).powi(2) + (y as f64).powi(2) + (z as f64).powi(2);
    sum.sqrt() as f32
}

/// Canal de magnitud derivado de los ejes de un sensor: una magnitud por
/// índice sobre las primeras WINDOW_SIZE entradas. Los ejes pueden traer
/// excedente; solo se consume el prefijo.
pub fn magnitude_prefix(x: &[f32], y: &[f32], z: &[f32]) -> Vec<f32> {
    debug_assert!(x.len() >= WINDOW_SIZE && y.len() >= WINDOW_SIZE && z.len() >= WINDOW_SIZE);
    (0..WINDOW_SIZE)
        .map(|i| sample_magnitude(x[i], y[i], z[i]))
        .collect()
}
