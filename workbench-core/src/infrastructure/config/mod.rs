pub mod project;
pub mod source;

pub use crate::domain::project::ProjectConfig;
pub use project::{load_project_config, load_project_config_or_default};
pub use source::{DiscoverOptions, discover_sources, load_sources, save_sources};
