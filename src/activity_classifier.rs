use crate::types::{Recognition, NUM_CHANNELS, TOTAL_WINDOW_FEATURES, WINDOW_SIZE};
use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::ValueType;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("ONNX Runtime error: {0}")]
    OnnxError(#[from] ort::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid feature size: expected {expected}, got {actual}")]
    InvalidFeatureSize { expected: usize, actual: usize },

    #[error("Empty label map in {path}")]
    EmptyLabelMap { path: String },

    #[error("Missing ONNX {kind}")]
    MissingIo { kind: &'static str },
}

/// Frontera entre el ensamblado de ventanas y el motor de inferencia.
/// El resto del sistema solo conoce este contrato.
pub trait Classifier {
    /// Clasifica una ventana aplanada de TOTAL_WINDOW_FEATURES valores y
    /// devuelve las etiquetas ordenadas de mayor a menor confianza
    fn classify(&mut self, window: &[f32]) -> Result<Vec<Recognition>, ClassifierError>;
}

#[derive(Debug, Deserialize)]
struct ClassesJson {
    index_to_class: HashMap<String, String>,
}

/// Clasificador respaldado por ONNX Runtime. La sesión se crea una sola
/// vez al construir y se reutiliza en cada ventana; el modelo no guarda
/// estado entre llamadas.
pub struct OrtClassifier {
    session: Session,
    labels: Vec<String>,
    input_name: String,
    prob_output_name: String,
}

impl OrtClassifier {
    pub fn new(model_path: &str, classes_path: &str) -> Result<Self, ClassifierError> {
        // Cargar clases
        let labels = Self::load_classes(classes_path)?;

        // Cargar modelo ONNX
        let session = Session::builder()?.commit_from_file(model_path)?;

        let input_name = session
            .inputs
            .get(0)
            .map(|input| input.name.clone())
            .ok_or(ClassifierError::MissingIo { kind: "input" })?;

        let prob_output_name = session
            .outputs
            .iter()
            .find(|output| {
                matches!(
                    output.output_type,
                    ValueType::Tensor {
                        ty: TensorElementType::Float32,
                        ..
                    }
                )
            })
            .or_else(|| session.outputs.get(0))
            .map(|output| output.name.clone())
            .ok_or(ClassifierError::MissingIo { kind: "output" })?;

        println!("[ONNX] Modelo cargado: {}", model_path);
        println!("[ONNX] Clases: {:?}", labels);
        println!("[ONNX] Input: {}", input_name);
        println!("[ONNX] Output: {}", prob_output_name);

        Ok(Self {
            session,
            labels,
            input_name,
            prob_output_name,
        })
    }

    fn load_classes(path: &str) -> Result<Vec<String>, ClassifierError> {
        let content = fs::read_to_string(path)?;
        let data: ClassesJson = serde_json::from_str(&content)?;

        // Convertir HashMap a Vec ordenado por índice numérico
        let mut pairs: Vec<(usize, String)> = data
            .index_to_class
            .into_iter()
            .filter_map(|(k, v)| k.parse::<usize>().ok().map(|idx| (idx, v)))
            .collect();

        pairs.sort_by_key(|(idx, _)| *idx);

        if pairs.is_empty() {
            return Err(ClassifierError::EmptyLabelMap {
                path: path.to_string(),
            });
        }

        Ok(pairs.into_iter().map(|(_, name)| name).collect())
    }

    /// Obtiene las etiquetas de clases
    pub fn get_labels(&self) -> &[String] {
        &self.labels
    }
}

impl Classifier for OrtClassifier {
    fn classify(&mut self, window: &[f32]) -> Result<Vec<Recognition>, ClassifierError> {
        ensure_window_len(window)?;

        // Preparar tensor de entrada [1, 100, 12]
        // ort 2.x acepta OwnedTensorArrayData: (shape, data) donde shape es &[usize], Vec<usize>, etc.
        let input_data = window.to_vec();
        let shape_vec = vec![1_usize, WINDOW_SIZE, NUM_CHANNELS];

        let input_value = ort::value::Value::from_array((shape_vec, input_data))?;

        // Ejecutar inferencia
        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => &input_value,
        ])?;

        // Extraer probabilidades del output dinámico
        let (prob_shape, prob_data) =
            outputs[self.prob_output_name.as_str()].try_extract_tensor::<f32>()?;

        let num_classes = if prob_shape.len() >= 2 {
            prob_shape[1] as usize
        } else {
            prob_shape[0] as usize
        };
        let count = num_classes.min(prob_data.len());

        Ok(ranked_results(&self.labels, &prob_data[..count]))
    }
}

/// Rechaza ventanas que no midan exactamente TOTAL_WINDOW_FEATURES
fn ensure_window_len(window: &[f32]) -> Result<(), ClassifierError> {
    if window.len() != TOTAL_WINDOW_FEATURES {
        return Err(ClassifierError::InvalidFeatureSize {
            expected: TOTAL_WINDOW_FEATURES,
            actual: window.len(),
        });
    }
    Ok(())
}

/// Empareja probabilidades con etiquetas y ordena de mayor a menor
/// confianza. El orden es estable: ante un empate gana el índice de
/// clase más bajo, así la salida es determinista. Probabilidades de más
/// (sin etiqueta) o etiquetas de más (sin probabilidad) se ignoran.
pub fn ranked_results(labels: &[String], probs: &[f32]) -> Vec<Recognition> {
    let mut results: Vec<Recognition> = labels
        .iter()
        .zip(probs.iter())
        .map(|(label, &p)| Recognition::new(label.clone(), p))
        .collect();

    results.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    results
}
