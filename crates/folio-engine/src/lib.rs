pub mod io;
pub mod render;

// Re-export key types for easier usage
pub use io::*;
pub use render::{escape_html, render};
