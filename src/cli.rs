use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use mcrender::{
    Dimension, RenderOptions, RenderRegion, Rotation, ToolCommands, UsageError, DIMENSION_ALIASES,
};
use std::path::PathBuf;

// The position is an option rather than a positional argument so negative
// coordinates work without "--". The size follows suit.
#[derive(Parser, Debug)]
#[command(
    name = "mcrender",
    version,
    about = "Render a Minecraft world snippet with Mineways and Blender.",
    long_about = "Render a Minecraft world snippet with Mineways and Blender.\n\n\
        You can specify the box to render in two ways:\n\
        1. Using --pos and --size.\n\
        2. Using two --pos options: one for each corner (inclusive)."
)]
pub struct Cli {
    /// Minecraft world directory
    #[arg(value_name = "WORLD_PATH", value_parser = validate_world_path)]
    pub world_path: PathBuf,

    /// Where to write the PNG render
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// Render-box corner
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        action = ArgAction::Append
    )]
    pub pos: Vec<i32>,

    /// Render-box size
    #[arg(short, long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub size: Option<Vec<i32>>,

    /// Rotation of the camera, in quarter turns
    #[arg(long, value_name = "0|1|2|3", default_value = "0", value_parser = validate_rotation)]
    pub rotation: Rotation,

    /// World dimension*
    #[arg(long, value_name = "ID", default_value = "overworld", value_parser = validate_dimension)]
    pub dimension: Dimension,

    /// Exposure for post-processing
    #[arg(long, value_name = "FLOAT", default_value_t = 0.0, allow_negative_numbers = true)]
    pub exposure: f32,

    /// Trim the output image (default)**
    #[arg(long, overrides_with = "no_trim")]
    pub trim: bool,

    /// Keep the full 2048x2048 canvas
    #[arg(long, overrides_with = "trim")]
    pub no_trim: bool,

    /// Overwrite any existing file at the output path
    #[arg(short, long)]
    pub force: bool,

    /// Command to run Mineways
    #[arg(long, value_name = "CMD")]
    pub mineways_cmd: Option<String>,

    /// Command to run Blender
    #[arg(long, value_name = "CMD")]
    pub blender_cmd: Option<String>,

    /// Print more information, including the tools' own output
    #[arg(short, long, overrides_with = "quiet")]
    pub verbose: bool,

    /// Cancel a previous --verbose
    #[arg(short, long, overrides_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn region(&self) -> Result<RenderRegion, UsageError> {
        let positions: Vec<[i32; 3]> =
            self.pos.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        let size = match self.size.as_deref() {
            None => None,
            Some(&[x, y, z]) => Some([x, y, z]),
            Some(_) => return Err(UsageError::RegionNotSpecified),
        };
        RenderRegion::from_positions(&positions, size)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            rotation: self.rotation,
            dimension: self.dimension,
            exposure: self.exposure,
            trim: self.trim || !self.no_trim,
            force: self.force,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn tool_commands(&self) -> ToolCommands {
        ToolCommands {
            mineways: self.mineways_cmd.clone(),
            blender: self.blender_cmd.clone(),
        }
    }
}

pub fn epilog(config_location: &str) -> String {
    let dimensions: Vec<&str> = DIMENSION_ALIASES.iter().map(|(alias, _)| *alias).collect();
    format!(
        "*: Dimension options: {{{}}}\n\n\
         **: The render is always created at a resolution of 2048x2048 pixels, but the model \
         may not be square. If --trim is set (which it is by default), the image is trimmed down \
         to the model's bounding box. Otherwise, the model will be centered in the image.\n\n\
         Config file location: {config_location}",
        dimensions.join(", ")
    )
}

/// Reports a region problem the same way clap reports its own parse errors.
pub fn usage_error(err: &UsageError) -> clap::Error {
    let kind = match err {
        UsageError::RegionNotSpecified => ErrorKind::MissingRequiredArgument,
        _ => ErrorKind::ValueValidation,
    };
    Cli::command().error(kind, err)
}

fn validate_world_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("world directory '{s}' does not exist"))
    }
}

fn validate_rotation(s: &str) -> Result<Rotation, String> {
    s.parse().map_err(|e: UsageError| e.to_string())
}

fn validate_dimension(s: &str) -> Result<Dimension, String> {
    s.parse().map_err(|e: UsageError| e.to_string())
}
