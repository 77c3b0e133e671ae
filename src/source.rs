use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::thread;
use std::time::Duration;

use crate::types::{SensorKind, SensorSample};

/// Cadencia de paso del generador sintético, en Hz
const STEP_CADENCE_HZ: f32 = 1.8;

/// Tope de espera entre muestras al reproducir una traza. Los huecos
/// grandes del reloj (pausas de grabación) no valen la espera.
const MAX_REPLAY_GAP: Duration = Duration::from_secs(1);

/// Generador determinista de lecturas que imita una marcha: gravedad en
/// el eje z del acelerómetro, vaivén sinusoidal a ritmo de paso y un
/// poco de ruido. Con la misma semilla produce exactamente la misma
/// traza, así las demos son reproducibles.
pub struct SyntheticOscillator {
    rng: StdRng,
    tick: u64,
    period_ns: i64,
}

impl SyntheticOscillator {
    pub fn new(sample_rate_hz: f32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
            period_ns: (1e9 / sample_rate_hz) as i64,
        }
    }

    fn noise(&mut self) -> f32 {
        self.rng.gen_range(-0.05..0.05)
    }

    /// Una vuelta completa: una lectura por sensor, misma marca de tiempo,
    /// en el orden en que el dispositivo las registra
    pub fn next_round(&mut self) -> [SensorSample; 3] {
        let timestamp_ns = self.tick as i64 * self.period_ns;
        let t = self.tick as f32 * self.period_ns as f32 / 1e9;
        let phase = 2.0 * PI * STEP_CADENCE_HZ * t;

        let acc = SensorSample::new(
            timestamp_ns,
            SensorKind::Accelerometer,
            1.2 * phase.sin() + self.noise(),
            0.9 * phase.cos() + self.noise(),
            9.81 + 2.5 * (2.0 * phase).sin() + self.noise(),
        );
        let gyr = SensorSample::new(
            timestamp_ns,
            SensorKind::Gyroscope,
            0.6 * (phase + 0.5).sin() + self.noise(),
            0.4 * phase.cos() + self.noise(),
            0.2 * (0.5 * phase).sin() + self.noise(),
        );
        let lin = SensorSample::new(
            timestamp_ns,
            SensorKind::LinearAcceleration,
            1.2 * phase.sin() + self.noise(),
            0.9 * phase.cos() + self.noise(),
            2.5 * (2.0 * phase).sin() + self.noise(),
        );

        self.tick += 1;
        [acc, gyr, lin]
    }

    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period_ns as u64)
    }
}

/// Genera una traza sintética completa de `rounds` vueltas (3 muestras
/// por vuelta), lista para guardar o reproducir
pub fn generate_trace(sample_rate_hz: f32, seed: u64, rounds: usize) -> Vec<SensorSample> {
    let mut oscillator = SyntheticOscillator::new(sample_rate_hz, seed);
    let mut samples = Vec::with_capacity(rounds * 3);
    for _ in 0..rounds {
        samples.extend(oscillator.next_round());
    }
    samples
}

/// Productor sintético: emite vueltas del oscilador por el canal hasta
/// que el consumidor se cierra o se alcanza `limit` vueltas (None = sin
/// límite). Con `realtime` duerme un período de muestreo por vuelta.
/// Devuelve cuántas muestras se enviaron.
pub fn run_synthetic_source(
    mut oscillator: SyntheticOscillator,
    limit: Option<usize>,
    realtime: bool,
    tx: Sender<SensorSample>,
) -> usize {
    let period = oscillator.period();
    let mut sent = 0usize;
    let mut rounds = 0usize;

    loop {
        if let Some(max) = limit {
            if rounds >= max {
                break;
            }
        }
        for sample in oscillator.next_round() {
            if tx.send(sample).is_err() {
                // Consumidor cerrado: no queda a quién entregar
                return sent;
            }
            sent += 1;
        }
        rounds += 1;
        if realtime {
            thread::sleep(period);
        }
    }

    sent
}

/// Productor de reproducción: entrega una traza grabada por el canal en
/// el orden exacto del archivo. Con `realtime` respeta los deltas de
/// timestamp entre muestras consecutivas, acotados por MAX_REPLAY_GAP.
/// Devuelve cuántas muestras se enviaron.
pub fn run_replay_source(
    samples: Vec<SensorSample>,
    tx: Sender<SensorSample>,
    realtime: bool,
) -> usize {
    let mut sent = 0usize;
    let mut last_ts: Option<i64> = None;

    for sample in samples {
        if realtime {
            if let Some(prev) = last_ts {
                let delta = sample.timestamp_ns.saturating_sub(prev);
                if delta > 0 {
                    let wait = Duration::from_nanos(delta as u64).min(MAX_REPLAY_GAP);
                    thread::sleep(wait);
                }
            }
            last_ts = Some(sample.timestamp_ns);
        }

        if tx.send(sample).is_err() {
            break;
        }
        sent += 1;
    }

    sent
}
