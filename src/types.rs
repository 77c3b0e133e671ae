/// Tipo de sensor que origina una lectura tri-axial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
    LinearAcceleration,
}

impl SensorKind {
    /// Los tres sensores, en el orden en que el dispositivo los registra
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Accelerometer,
        SensorKind::Gyroscope,
        SensorKind::LinearAcceleration,
    ];

    /// Código corto usado en las trazas CSV
    pub fn code(self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "acc",
            SensorKind::Gyroscope => "gyr",
            SensorKind::LinearAcceleration => "lin",
        }
    }

    pub fn from_code(code: &str) -> Option<SensorKind> {
        match code {
            "acc" => Some(SensorKind::Accelerometer),
            "gyr" => Some(SensorKind::Gyroscope),
            "lin" => Some(SensorKind::LinearAcceleration),
            _ => None,
        }
    }
}

/// Una lectura (x, y, z) de un sensor con su marca de tiempo.
/// El timestamp solo se usa para reproducir trazas a ritmo real; el
/// ventaneo trabaja por orden de llegada, nunca por tiempo.
#[derive(Debug, Clone, Copy)]
pub struct SensorSample {
    pub timestamp_ns: i64,
    pub kind: SensorKind,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SensorSample {
    pub fn new(timestamp_ns: i64, kind: SensorKind, x: f32, y: f32, z: f32) -> Self {
        Self {
            timestamp_ns,
            kind,
            x,
            y,
            z,
        }
    }
}

/// Un resultado de clasificación: etiqueta del modelo + confianza en [0,1]
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub label: String,
    pub confidence: f32,
}

impl Recognition {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Vector de características aplanado [12 canales x 100 muestras]
pub type FeatureVector = Vec<f32>;

/// Constantes del sistema
pub const WINDOW_SIZE: usize = 100;
pub const NUM_RAW_CHANNELS: usize = 9; // 3 sensores x 3 ejes
pub const NUM_CHANNELS: usize = 12; // 9 crudos + 3 magnitudes derivadas
pub const TOTAL_WINDOW_FEATURES: usize = WINDOW_SIZE * NUM_CHANNELS; // 1200

/// Orden fijo de canales dentro del vector aplanado. El modelo fue
/// entrenado con este orden exacto; cada canal ocupa un tramo contiguo
/// de WINDOW_SIZE valores.
pub const CHANNEL_ORDER: [&str; NUM_CHANNELS] = [
    "ax", "ay", "az", "lx", "ly", "lz", "gx", "gy", "gz", "ma", "ml", "mg",
];

/// Posición del elemento i del canal k dentro del vector aplanado
pub fn flat_index(channel: usize, i: usize) -> usize {
    channel * WINDOW_SIZE + i
}
