pub mod normalizer;
pub mod loader;
