use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all kondi operations.
#[derive(Debug, Error, Diagnostic)]
pub enum KondiError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Kondi.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Kondi.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid global configuration.
    #[error("Config error: {message}")]
    Config { message: String },

    /// A coordinate string that is not `group:artifact[:classifier]:version`.
    #[error("Invalid artifact coordinate '{value}'")]
    #[diagnostic(help("Use group:artifact:version or group:artifact:classifier:version"))]
    InvalidCoordinate { value: String },

    /// The same coordinate was installed twice into a registry.
    #[error("Artifact {coords} is declared more than once")]
    DuplicateArtifact { coords: String },

    /// A declaration references a coordinate that no installed artifact has.
    #[error("{artifact} references unknown {role} {reference}")]
    #[diagnostic(
        code(kondi::malformed_declaration),
        help("Every referenced coordinate must be installed before resolving")
    )]
    MalformedDeclaration {
        artifact: String,
        reference: String,
        role: String,
    },

    /// Dependency resolution failed.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },
}

/// Convenience alias for fallible kondi library operations.
pub type KondiResult<T> = Result<T, KondiError>;
