//! Node endpoint registry

pub mod apply;
pub mod env;
pub mod group;
pub mod registry;
pub mod translate;

pub use apply::Location;
pub use env::{EnvChain, EnvSource, GlobalEnv, ProcessEnv};
pub use group::{group_endpoints, EndpointGroup};
pub use registry::{default_dev_nodes, DevNode, Endpoint, EndpointRegistry, EndpointUi};
pub use translate::{CatalogTranslate, DefaultTranslate, TOptions, Translate};
