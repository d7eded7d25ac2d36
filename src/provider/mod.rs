//! # Dependency Providers
//!
//! A provider answers one question: which packages does a given package
//! depend on directly. The graph builder is agnostic to where the answer
//! comes from.
//!
//! - **OfflineProvider**: a static JSON mapping, used for testing and for
//!   air-gapped environments
//! - **NuGetProvider**: the live NuGet v3 registry, resolving the latest
//!   stable version of every package
//!
//! Version information is dropped at this boundary; the core only ever sees
//! plain package identifiers.

mod nuget;
mod offline;

pub use nuget::NuGetProvider;
pub use offline::OfflineProvider;

use crate::error::DepGraphError;

/// Source of direct dependencies for a package
pub trait DependencyProvider {
    /// Return the direct dependencies of `package` in declaration order
    fn direct_dependencies(&self, package: &str) -> Result<Vec<String>, DepGraphError>;
}

impl<P: DependencyProvider + ?Sized> DependencyProvider for Box<P> {
    fn direct_dependencies(&self, package: &str) -> Result<Vec<String>, DepGraphError> {
        (**self).direct_dependencies(package)
    }
}
