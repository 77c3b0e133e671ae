use crate::feature_extractor::magnitude_prefix;
use crate::sample_buffer::SampleBuffer;
use crate::types::{
    FeatureVector, SensorKind, SensorSample, TOTAL_WINDOW_FEATURES, WINDOW_SIZE,
};

/// Orden de los canales de magnitud al final del vector: ma, ml, mg
const MAGNITUDE_ORDER: [SensorKind; 3] = [
    SensorKind::Accelerometer,
    SensorKind::LinearAcceleration,
    SensorKind::Gyroscope,
];

/// Ensambla ventanas de inferencia a partir del flujo de muestras.
///
/// Cada muestra se acumula y el umbral se re-evalúa inmediatamente
/// después, una vez por muestra. Así la ventana se cierra en cuanto el
/// canal más rezagado llega a WINDOW_SIZE, sin esperar a ningún tick
/// externo, y ninguna muestra queda en el lado equivocado del corte.
pub struct WindowAssembler {
    buffer: SampleBuffer,
    windows_emitted: u64,
}

impl WindowAssembler {
    pub fn new() -> Self {
        Self {
            buffer: SampleBuffer::new(),
            windows_emitted: 0,
        }
    }

    /// Acumula una muestra y devuelve la ventana aplanada si con ella
    /// se completaron los 9 canales crudos
    pub fn push_sample(&mut self, sample: &SensorSample) -> Option<FeatureVector> {
        self.buffer
            .push(sample.kind, sample.x, sample.y, sample.z);
        self.try_assemble()
    }

    /// Intenta cerrar una ventana. Si algún canal crudo sigue por debajo
    /// de WINDOW_SIZE no toca nada y devuelve None; si no, aplana los 12
    /// canales en el orden fijo y vacía el buffer entero.
    pub fn try_assemble(&mut self) -> Option<FeatureVector> {
        if !self.buffer.raw_ready() {
            return None;
        }

        let mut data = Vec::with_capacity(TOTAL_WINDOW_FEATURES);

        // 9 canales crudos: ax, ay, az, lx, ly, lz, gx, gy, gz
        for channel in self.buffer.raw_in_flat_order() {
            data.extend_from_slice(&channel[..WINDOW_SIZE]);
        }

        // 3 canales derivados: ma, ml, mg
        for kind in MAGNITUDE_ORDER {
            let (x, y, z) = self.buffer.triple(kind);
            data.extend(magnitude_prefix(x, y, z));
        }

        // Todo se descarta, también el excedente de los canales rápidos:
        // la próxima ventana arranca de cero
        self.buffer.clear();
        self.windows_emitted += 1;

        Some(data)
    }

    /// Ventanas cerradas desde el arranque
    pub fn windows_emitted(&self) -> u64 {
        self.windows_emitted
    }

    /// Muestras acumuladas en el canal más rezagado
    pub fn pending_len(&self) -> usize {
        self.buffer.shortest_len()
    }
}

impl Default for WindowAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{flat_index, CHANNEL_ORDER, NUM_CHANNELS};

    /// Una vuelta completa: la misma lectura para los tres sensores
    fn push_round(
        assembler: &mut WindowAssembler,
        x: f32,
        y: f32,
        z: f32,
    ) -> Option<FeatureVector> {
        let mut window = None;
        for kind in SensorKind::ALL {
            let sample = SensorSample::new(0, kind, x, y, z);
            if let Some(w) = assembler.push_sample(&sample) {
                window = Some(w);
            }
        }
        window
    }

    #[test]
    fn test_no_window_below_threshold() {
        let mut assembler = WindowAssembler::new();
        for _ in 0..WINDOW_SIZE - 1 {
            assert!(push_round(&mut assembler, 1.0, 0.0, 0.0).is_none());
        }
        assert_eq!(assembler.windows_emitted(), 0);
        assert_eq!(assembler.pending_len(), WINDOW_SIZE - 1);
    }

    #[test]
    fn test_fires_once_at_threshold_and_clears() {
        let mut assembler = WindowAssembler::new();
        for _ in 0..WINDOW_SIZE - 1 {
            push_round(&mut assembler, 1.0, 0.0, 0.0);
        }
        let window = push_round(&mut assembler, 1.0, 0.0, 0.0)
            .unwrap_or_else(|| panic!("la vuelta {} debía cerrar la ventana", WINDOW_SIZE));

        assert_eq!(window.len(), TOTAL_WINDOW_FEATURES);
        assert_eq!(assembler.windows_emitted(), 1);
        assert_eq!(assembler.pending_len(), 0);

        // Los tres canales de magnitud traen 100 copias de 1.0
        for channel in 9..NUM_CHANNELS {
            for i in 0..WINDOW_SIZE {
                assert_eq!(window[flat_index(channel, i)], 1.0);
            }
        }

        // Una vuelta más no dispara de nuevo
        assert!(push_round(&mut assembler, 1.0, 0.0, 0.0).is_none());
        assert_eq!(assembler.pending_len(), 1);
    }

    #[test]
    fn test_lagging_channel_blocks_until_it_arrives() {
        let mut assembler = WindowAssembler::new();
        for i in 0..WINDOW_SIZE {
            let v = i as f32;
            assembler
                .push_sample(&SensorSample::new(0, SensorKind::Accelerometer, v, v, v));
            assembler
                .push_sample(&SensorSample::new(0, SensorKind::Gyroscope, v, v, v));
        }
        // Linear todavía vacío: nada puede cerrar
        assert_eq!(assembler.windows_emitted(), 0);

        for i in 0..WINDOW_SIZE - 1 {
            let v = i as f32;
            let got = assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::LinearAcceleration,
                v,
                v,
                v,
            ));
            assert!(got.is_none());
        }
        // La muestra 100 del canal rezagado cierra la ventana
        let got = assembler.push_sample(&SensorSample::new(
            0,
            SensorKind::LinearAcceleration,
            99.0,
            99.0,
            99.0,
        ));
        assert!(got.is_some());
    }

    #[test]
    fn test_channel_layout_is_contiguous_and_ordered() {
        let mut assembler = WindowAssembler::new();
        let mut window = None;
        for i in 0..WINDOW_SIZE {
            let base = i as f32;
            assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::Accelerometer,
                base,
                1000.0 + base,
                2000.0 + base,
            ));
            assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::Gyroscope,
                6000.0 + base,
                7000.0 + base,
                8000.0 + base,
            ));
            if let Some(w) = assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::LinearAcceleration,
                3000.0 + base,
                4000.0 + base,
                5000.0 + base,
            )) {
                window = Some(w);
            }
        }
        let window = window.unwrap();

        // Canales crudos: el canal k arranca en k * WINDOW_SIZE y sus
        // valores son base + i, con base = k * 1000
        for channel in 0..9 {
            for i in 0..WINDOW_SIZE {
                let expected = (channel * 1000) as f32 + i as f32;
                assert_eq!(
                    window[flat_index(channel, i)],
                    expected,
                    "canal {} indice {}",
                    CHANNEL_ORDER[channel],
                    i
                );
            }
        }

        // Magnitudes en el orden ma, ml, mg, derivadas de sus ejes
        let mag = |a: f32, b: f32, c: f32| {
            ((a as f64).powi(2) + (b as f64).powi(2) + (c as f64).powi(2)).sqrt() as f32
        };
        for i in 0..WINDOW_SIZE {
            let b = i as f32;
            assert_eq!(
                window[flat_index(9, i)],
                mag(b, 1000.0 + b, 2000.0 + b)
            );
            assert_eq!(
                window[flat_index(10, i)],
                mag(3000.0 + b, 4000.0 + b, 5000.0 + b)
            );
            assert_eq!(
                window[flat_index(11, i)],
                mag(6000.0 + b, 7000.0 + b, 8000.0 + b)
            );
        }
    }

    #[test]
    fn test_surplus_is_discarded_not_carried_over() {
        let mut assembler = WindowAssembler::new();
        // El acelerómetro corre al doble de ritmo y acumula excedente
        for i in 0..WINDOW_SIZE {
            let v = i as f32;
            assembler
                .push_sample(&SensorSample::new(0, SensorKind::Accelerometer, v, 0.0, 0.0));
            assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::Accelerometer,
                v + 0.5,
                0.0,
                0.0,
            ));
            assembler
                .push_sample(&SensorSample::new(0, SensorKind::Gyroscope, v, 0.0, 0.0));
            assembler.push_sample(&SensorSample::new(
                0,
                SensorKind::LinearAcceleration,
                v,
                0.0,
                0.0,
            ));
        }
        assert_eq!(assembler.windows_emitted(), 1);
        // Las ~100 lecturas extra del acelerómetro se descartaron con el clear
        assert_eq!(assembler.pending_len(), 0);

        // La segunda ventana solo contiene datos posteriores al corte
        let mut second = None;
        for _ in 0..WINDOW_SIZE {
            if let Some(w) = push_round(&mut assembler, 7.0, 0.0, 0.0) {
                second = Some(w);
            }
        }
        let second = second.unwrap();
        for i in 0..WINDOW_SIZE {
            assert_eq!(second[flat_index(0, i)], 7.0);
        }
    }

    #[test]
    fn test_try_assemble_on_empty_state_is_inert() {
        let mut assembler = WindowAssembler::new();
        assert!(assembler.try_assemble().is_none());
        assert_eq!(assembler.windows_emitted(), 0);
        assert_eq!(assembler.pending_len(), 0);
    }

    #[test]
    fn test_two_hundred_rounds_give_two_windows() {
        let mut assembler = WindowAssembler::new();
        let mut count = 0;
        for i in 0..2 * WINDOW_SIZE {
            if push_round(&mut assembler, i as f32, 0.0, 0.0).is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 2);
        assert_eq!(assembler.windows_emitted(), 2);
    }
}
