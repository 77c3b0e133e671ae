use std::path::Path;

fn main() {
    // Configurar la ruta de búsqueda para un ONNX Runtime descargado junto
    // al proyecto. Si no está, ort resuelve sus binarios por su cuenta.
    let local_lib = "onnxruntime-linux-x64-1.22.0/lib";
    if Path::new(local_lib).exists() {
        println!("cargo:rustc-link-search=native={}", local_lib);
        println!("cargo:rustc-link-lib=dylib=onnxruntime");
    }

    // Recompilar si cambia el directorio de ONNX Runtime
    println!("cargo:rerun-if-changed=onnxruntime-linux-x64-1.22.0/");
}
