//! Common functionality shared by the command-line layer

use crate::cli::Cli;
use crate::error::DepGraphError;

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, DepGraphError>;
}

/// Trait for configurations that can be created from parsed CLI arguments
pub trait FromCommand: Sized {
    fn from_command(cli: Cli) -> Result<Self, DepGraphError>;
}

/// Macro to implement `TryFrom<Cli>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Cli> for $config {
            type Error = $crate::error::DepGraphError;

            fn try_from(cli: $crate::cli::Cli) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(cli)
            }
        }
    };
}
