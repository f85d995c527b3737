pub mod directory;
pub mod resolver;

pub use directory::StaticDirectory;
pub use resolver::DirectoryGroupsRoleResolver;
