/*
Reconocimiento de Actividad Humana en Tiempo Real - Rust Puro + ONNX

Sistema de reconocimiento de actividades que:
1. Recibe lecturas tri-axiales de 3 sensores (acelerómetro, giroscopio, aceleración lineal)
2. Acumula 100 muestras por canal y ensambla ventanas de 12 canales con WindowAssembler
3. Realiza inferencia usando ONNX Runtime (modelo LSTM, entrada [1, 100, 12])
4. Presenta el ranking de actividades por consola

Antes de todo, asegurarse de tener onnxruntime instalado.
wget https://github.com/microsoft/onnxruntime/releases/download/v1.22.0/onnxruntime-linux-x64-1.22.0.tgz
tar -xzf onnxruntime-linux-x64-1.22.0.tgz

Para compilar y ejecutar:
set -x LD_LIBRARY_PATH (pwd)/onnxruntime-linux-x64-1.22.0/lib $LD_LIBRARY_PATH
     ./target/release/actiscopio traza.csv

Sin argumentos arranca la demo con la fuente sintética:
     ./target/release/actiscopio
*/

use std::env;
use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Result};
use crossbeam_channel::{bounded, Receiver};

use actiscopio::activity_classifier::{Classifier, OrtClassifier};
use actiscopio::csv_loader::load_samples_from_csv;
use actiscopio::display::{ConsoleDisplay, ResultSink};
use actiscopio::source::{run_replay_source, run_synthetic_source, SyntheticOscillator};
use actiscopio::types::SensorSample;
use actiscopio::window_assembler::WindowAssembler;

const DEFAULT_MODEL: &str = "model_lstm_har.onnx";
const DEFAULT_CLASSES: &str = "classes.json";
const TOP_N: usize = 6; // Actividades mostradas por ventana
const CHANNEL_CAPACITY: usize = 100;
const DEMO_SAMPLE_RATE_HZ: f32 = 50.0;
const DEMO_SEED: u64 = 2024;

struct CliOptions {
    trace: Option<PathBuf>,
    model: String,
    classes: String,
    realtime: bool,
}

fn parse_args() -> Result<CliOptions> {
    let mut realtime = false;
    let mut positional: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--tiempo-real" => realtime = true,
            _ => positional.push(arg),
        }
    }

    if positional.len() > 3 {
        bail!("Uso: actiscopio [--tiempo-real] [traza.csv] [modelo.onnx] [classes.json]");
    }

    let mut positional = positional.into_iter();
    Ok(CliOptions {
        trace: positional.next().map(PathBuf::from),
        model: positional
            .next()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        classes: positional
            .next()
            .unwrap_or_else(|| DEFAULT_CLASSES.to_string()),
        realtime,
    })
}

fn main() -> Result<()> {
    println!("🏃 Human Activity Recognition - Rust + ONNX\n");

    let opts = parse_args()?;

    let trace_path = match &opts.trace {
        Some(path) => path.clone(),
        None => {
            println!("🔧 Modo: DEMO - Fuente Sintética\n");
            return demo_mode(&opts);
        }
    };

    println!("🔧 Modo: Reproducción de traza");
    println!("🎞️  Traza: {:?}\n", trace_path);

    let samples = load_samples_from_csv(&trace_path)?;
    println!("✅ {} muestras cargadas", samples.len());

    println!("🔧 Inicializando clasificador ONNX...");
    let mut classifier = OrtClassifier::new(&opts.model, &opts.classes)?;
    println!(
        "✅ Clasificador cargado ({} clases)\n",
        classifier.get_labels().len()
    );

    let mut display = ConsoleDisplay::new(TOP_N);

    let (windows, processed) = if opts.realtime {
        // Productor en segundo plano respetando los timestamps de la traza
        let (tx, rx) = bounded::<SensorSample>(CHANNEL_CAPACITY);
        thread::spawn(move || {
            let sent = run_replay_source(samples, tx, true);
            println!("📡 Traza reproducida por completo ({} muestras)", sent);
        });
        println!("🎬 Reproduciendo a ritmo real...\n");
        run_stream(rx, &mut classifier, &mut display)
    } else {
        run_offline(&samples, &mut classifier, &mut display)
    };

    println!(
        "\n📊 Resumen: {} muestras procesadas, {} ventanas clasificadas",
        processed, windows
    );
    Ok(())
}

/// Modo DEMO: oscilador sintético en un hilo productor y el pipeline
/// completo en el consumidor. Corre hasta Ctrl+C.
fn demo_mode(opts: &CliOptions) -> Result<()> {
    println!("🔧 Inicializando clasificador ONNX...");
    let mut classifier = OrtClassifier::new(&opts.model, &opts.classes)?;
    println!("✅ Clasificador cargado\n");

    let (tx, rx) = bounded::<SensorSample>(CHANNEL_CAPACITY);

    thread::spawn(move || {
        let oscillator = SyntheticOscillator::new(DEMO_SAMPLE_RATE_HZ, DEMO_SEED);
        let sent = run_synthetic_source(oscillator, None, true, tx);
        println!("📡 Fuente sintética terminada ({} muestras)", sent);
    });

    println!("🎬 Iniciando reconocimiento en tiempo real...\n");

    let mut display = ConsoleDisplay::new(TOP_N);
    run_stream(rx, &mut classifier, &mut display);

    Ok(())
}

/// Consumidor del canal: alimenta el ensamblador muestra a muestra hasta
/// que el productor cierra. Devuelve (ventanas, muestras procesadas).
fn run_stream(
    rx: Receiver<SensorSample>,
    classifier: &mut dyn Classifier,
    sink: &mut dyn ResultSink,
) -> (u64, usize) {
    let mut assembler = WindowAssembler::new();
    let mut processed = 0usize;

    for sample in rx {
        processed += 1;
        if let Some(window) = assembler.push_sample(&sample) {
            classify_and_report(&window, classifier, sink);
        }
    }

    (assembler.windows_emitted(), processed)
}

/// Camino síncrono: procesa una traza ya cargada, sin hilos ni canales
fn run_offline(
    samples: &[SensorSample],
    classifier: &mut dyn Classifier,
    sink: &mut dyn ResultSink,
) -> (u64, usize) {
    let mut assembler = WindowAssembler::new();
    let mut processed = 0usize;

    for sample in samples {
        processed += 1;
        if let Some(window) = assembler.push_sample(sample) {
            classify_and_report(&window, classifier, sink);
        }
    }

    (assembler.windows_emitted(), processed)
}

/// Un fallo de inferencia no tumba el flujo: se reporta y se sigue con
/// la siguiente ventana
fn classify_and_report(window: &[f32], classifier: &mut dyn Classifier, sink: &mut dyn ResultSink) {
    match classifier.classify(window) {
        Ok(results) => sink.update(&results),
        Err(e) => eprintln!("❌ Error clasificando: {}", e),
    }
}
