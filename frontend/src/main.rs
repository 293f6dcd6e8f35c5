//! Entry point for the WASM application

pub fn main() {
    dimension_frontend::start();
}
