// handlers/mod.rs
// Re-exports all handlers - routes.rs uses `use handlers::*`

mod plugin;
mod volumes;

pub use plugin::*;
pub use volumes::*;
