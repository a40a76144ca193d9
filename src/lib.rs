//! Isometric renders of Minecraft world snippets.
//!
//! Mineways exports a box of blocks to a Wavefront OBJ model, which Blender
//! then renders to a 2048x2048 PNG, optionally trimmed to its content. Both
//! tools are launched as subprocesses; their commands come from the call site
//! or from the config file.

pub mod config;
pub mod error;
pub mod finish;
pub mod options;
pub mod pipeline;
pub mod region;
pub mod tools;

pub use config::{config_path, ensure_config_exists, Config};
pub use error::{Error, Result, UsageError};
pub use options::{Dimension, RenderOptions, Rotation, DIMENSION_ALIASES};
pub use pipeline::{
    make_model, render, render_model, ModelRenderJob, RenderJob, Stage, StageObserver,
};
pub use region::RenderRegion;
pub use tools::mineways::{ModelFiles, ModelRequest};
pub use tools::{CommandSource, Tool, ToolCommands, Tools};
