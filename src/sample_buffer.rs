use crate::types::{SensorKind, NUM_RAW_CHANNELS, WINDOW_SIZE};

/// Buffer de acumulación con un vector por canal crudo. Cada lectura
/// tri-axial aporta tres valores al sensor que la produjo; los canales
/// crecen de forma independiente y solo se vacían todos a la vez.
pub struct SampleBuffer {
    ax: Vec<f32>,
    ay: Vec<f32>,
    az: Vec<f32>,
    lx: Vec<f32>,
    ly: Vec<f32>,
    lz: Vec<f32>,
    gx: Vec<f32>,
    gy: Vec<f32>,
    gz: Vec<f32>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self {
            ax: Vec::new(),
            ay: Vec::new(),
            az: Vec::new(),
            lx: Vec::new(),
            ly: Vec::new(),
            lz: Vec::new(),
            gx: Vec::new(),
            gy: Vec::new(),
            gz: Vec::new(),
        }
    }

    /// Agrega una lectura al trío de canales de su sensor
    pub fn push(&mut self, kind: SensorKind, x: f32, y: f32, z: f32) {
        match kind {
            SensorKind::Accelerometer => {
                self.ax.push(x);
                self.ay.push(y);
                self.az.push(z);
            }
            SensorKind::LinearAcceleration => {
                self.lx.push(x);
                self.ly.push(y);
                self.lz.push(z);
            }
            SensorKind::Gyroscope => {
                self.gx.push(x);
                self.gy.push(y);
                self.gz.push(z);
            }
        }
    }

    /// true cuando los 9 canales crudos tienen al menos WINDOW_SIZE muestras
    pub fn raw_ready(&self) -> bool {
        self.shortest_len() >= WINDOW_SIZE
    }

    /// Longitud del canal más corto, la cantidad que gobierna el disparo
    pub fn shortest_len(&self) -> usize {
        // Los tres ejes de un sensor crecen juntos; basta mirar el eje x
        self.ax.len().min(self.lx.len()).min(self.gx.len())
    }

    /// Ejes (x, y, z) de un sensor, para derivar su magnitud
    pub fn triple(&self, kind: SensorKind) -> (&[f32], &[f32], &[f32]) {
        match kind {
            SensorKind::Accelerometer => (&self.ax, &self.ay, &self.az),
            SensorKind::LinearAcceleration => (&self.lx, &self.ly, &self.lz),
            SensorKind::Gyroscope => (&self.gx, &self.gy, &self.gz),
        }
    }

    /// Los 9 canales crudos en el orden del vector aplanado:
    /// ax, ay, az, lx, ly, lz, gx, gy, gz
    pub fn raw_in_flat_order(&self) -> [&[f32]; NUM_RAW_CHANNELS] {
        [
            &self.ax, &self.ay, &self.az, &self.lx, &self.ly, &self.lz, &self.gx, &self.gy,
            &self.gz,
        ]
    }

    /// Vacía los 9 canales por completo, incluido cualquier excedente
    /// por encima de WINDOW_SIZE. No hay solapamiento entre ventanas.
    pub fn clear(&mut self) {
        self.ax.clear();
        self.ay.clear();
        self.az.clear();
        self.lx.clear();
        self.ly.clear();
        self.lz.clear();
        self.gx.clear();
        self.gy.clear();
        self.gz.clear();
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
