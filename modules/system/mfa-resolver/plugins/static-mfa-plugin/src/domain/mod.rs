pub mod catalog;
pub mod error;
pub mod provider;
pub mod registry;

pub use catalog::ServiceCatalog;
pub use error::StaticPluginError;
pub use provider::StaticMultifactorProvider;
pub use registry::StaticProviderRegistry;
