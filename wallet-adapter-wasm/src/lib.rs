pub mod detector;
pub mod injected;
pub mod util;
#[cfg(all(test, target_arch = "wasm32"))]
mod test_utils;

pub use detector::WindowDetector;
pub use injected::InjectedAptosProvider;
