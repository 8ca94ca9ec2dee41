// ABOUTME: Validated domain types for releases.
// ABOUTME: Environment, zone and version values shared by every layer.

mod environment;
mod version;
mod zone;

pub use environment::{Environment, InvalidEnvironment};
pub use version::{MissingVersion, Version};
pub use zone::Zone;
