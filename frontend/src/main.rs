// Mounting happens in the library's wasm start hook.
fn main() {}
