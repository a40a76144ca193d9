use crate::tools::Tool;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access config file {path}")]
    ConfigAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is malformed")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("the {0} command is set neither in the config file nor as an argument")]
    CommandNotSet(Tool),

    #[error("{tool} could not be launched")]
    Launch {
        tool: Tool,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} returned an error ({status})")]
    ToolFailed { tool: Tool, status: ExitStatus },

    #[error("{tool} finished but did not produce {path}")]
    MissingOutput { tool: Tool, path: PathBuf },

    #[error("Mineways could not load the world {world:?}")]
    BadWorld { world: PathBuf },

    #[error("output file {0} already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{context} {path}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot trim {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Invalid input, detected before any external tool is launched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error(
        "the box to render is not specified; use --pos with --size, \
         or two --pos options (one for each inclusive corner)"
    )]
    RegionNotSpecified,

    #[error("the size must be positive in each dimension, got {0:?}")]
    NonPositiveSize([i32; 3]),

    #[error("the box from {0:?} to {1:?} is too large")]
    RegionTooLarge([i32; 3], [i32; 3]),

    #[error("rotation must be one of 0, 1, 2 or 3, got {0}")]
    InvalidRotation(String),

    #[error("unknown dimension {0:?}")]
    UnknownDimension(String),
}

impl Error {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
