//! Núcleo de reconocimiento de actividad humana: acumulación de lecturas
//! tri-axiales, ensamblado de ventanas de 12 canales e inferencia ONNX.

pub mod activity_classifier;
pub mod csv_loader;
pub mod display;
pub mod feature_extractor;
pub mod sample_buffer;
pub mod source;
pub mod types;
pub mod window_assembler;
