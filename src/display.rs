use crate::types::Recognition;

/// Consumidor de resultados de clasificación. Recibe la lista ya
/// ordenada de mayor a menor confianza, una llamada por ventana, y no
/// debe bloquear el camino de entrega de muestras.
pub trait ResultSink {
    fn update(&mut self, results: &[Recognition]);
}

/// Presenta cada ventana clasificada en consola: la actividad ganadora
/// en la primera línea y el resto del ranking debajo
pub struct ConsoleDisplay {
    top_n: usize,
    windows_shown: u64,
}

impl ConsoleDisplay {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            windows_shown: 0,
        }
    }
}

impl ResultSink for ConsoleDisplay {
    fn update(&mut self, results: &[Recognition]) {
        self.windows_shown += 1;

        let top = match results.first() {
            Some(top) => top,
            None => {
                println!("[VENTANA {:04}] sin resultados", self.windows_shown);
                return;
            }
        };

        println!(
            "[VENTANA {:04}] 🏃 {} (conf: {:.2}%)",
            self.windows_shown,
            top.label,
            top.confidence * 100.0
        );
        for (rank, result) in results.iter().enumerate().take(self.top_n).skip(1) {
            println!(
                "             {}. {} ({:.2}%)",
                rank + 1,
                result.label,
                result.confidence * 100.0
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_classifier::{ranked_results, Classifier, ClassifierError};
    use crate::source::SyntheticOscillator;
    use crate::types::{TOTAL_WINDOW_FEATURES, WINDOW_SIZE};
    use crate::window_assembler::WindowAssembler;

    /// Clasificador de mentira con probabilidades fijas
    struct FixedClassifier {
        labels: Vec<String>,
        probs: Vec<f32>,
        calls: usize,
    }

    impl FixedClassifier {
        fn new(pairs: &[(&str, f32)]) -> Self {
            Self {
                labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
                probs: pairs.iter().map(|(_, p)| *p).collect(),
                calls: 0,
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn classify(&mut self, window: &[f32]) -> Result<Vec<Recognition>, ClassifierError> {
            assert_eq!(window.len(), TOTAL_WINDOW_FEATURES);
            self.calls += 1;
            Ok(ranked_results(&self.labels, &self.probs))
        }
    }

    #[derive(Default)]
    struct CapturingSink {
        updates: Vec<Vec<Recognition>>,
    }

    impl ResultSink for CapturingSink {
        fn update(&mut self, results: &[Recognition]) {
            self.updates.push(results.to_vec());
        }
    }

    #[test]
    fn test_console_display_tolerates_repeats_and_empty() {
        let mut display = ConsoleDisplay::new(3);
        let results = vec![
            Recognition::new("caminar", 0.8),
            Recognition::new("sentado", 0.2),
        ];
        display.update(&results);
        display.update(&results);
        display.update(&[]);
        assert_eq!(display.windows_shown, 3);
    }

    /// Cadena completa con el motor de inferencia sustituido: 250 vueltas
    /// de oscilador producen exactamente 2 ventanas y 2 updates del sink
    #[test]
    fn test_chain_one_update_per_window() {
        let mut oscillator = SyntheticOscillator::new(50.0, 11);
        let mut assembler = WindowAssembler::new();
        let mut classifier =
            FixedClassifier::new(&[("caminar", 0.7), ("trotar", 0.2), ("sentado", 0.1)]);
        let mut sink = CapturingSink::default();

        for _ in 0..2 * WINDOW_SIZE + WINDOW_SIZE / 2 {
            for sample in oscillator.next_round() {
                if let Some(window) = assembler.push_sample(&sample) {
                    let results = classifier.classify(&window).unwrap();
                    sink.update(&results);
                }
            }
        }

        assert_eq!(assembler.windows_emitted(), 2);
        assert_eq!(classifier.calls, 2);
        assert_eq!(sink.updates.len(), 2);
        // El ranking llega ya ordenado al sink
        assert_eq!(sink.updates[0][0].label, "caminar");
        assert_eq!(sink.updates[0][2].label, "sentado");
        // Quedan 50 vueltas a medio acumular
        assert_eq!(assembler.pending_len(), WINDOW_SIZE / 2);
    }
}
