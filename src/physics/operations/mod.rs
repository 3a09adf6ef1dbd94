pub mod expand;

pub use expand::{generate, WrapMode};
