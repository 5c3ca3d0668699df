//! Error types for the verdure-loader crate.

use verdure_world::WorldError;

/// Errors from loading or validating a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Building the world from the configured grids failed.
    #[error("world construction failed: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A species section is internally inconsistent.
    #[error("invalid species '{species}': {context}")]
    InvalidSpecies {
        /// The offending species name.
        species: String,
        /// What is wrong with it.
        context: String,
    },

    /// A run-level setting is unusable.
    #[error("invalid run config: {context}")]
    InvalidRun {
        /// What is wrong with it.
        context: String,
    },
}

impl From<serde_yml::Error> for LoaderError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
