//! Volume-to-dataset mapping and lifecycle.

mod driver;
mod projector;
mod registry;
pub mod resolver;
mod types;

pub use driver::VolumeDriver;
pub use projector::VolumeProjector;
pub use registry::DatasetRegistry;
pub use types::{Capabilities, Scope, Volume, LOCAL_CAPABILITIES};
