//! Stage 2: render an OBJ model with Blender.

use crate::error::{Error, Result};
use crate::tools::{CommandLine, Tool, Tools};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const DRIVER_SCRIPT: &str = include_str!("../../data/render_model.py");
const DRIVER_FILE: &str = "render_model.py";

/// Side length of the square canvas the driver script renders to.
pub const RESOLUTION: u32 = 2048;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModelRequest {
    pub model_path: PathBuf,
    pub output_path: PathBuf,
    pub exposure: f32,
}

pub fn build_args(request: &RenderModelRequest, script_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "--background",
        "--factory-startup",
        "--python-exit-code",
        "1",
        "--python",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(script_path.into());
    args.push("--".into());
    args.push("--exposure".into());
    args.push(request.exposure.to_string().into());
    args.push(request.model_path.clone().into());
    args.push(request.output_path.clone().into());
    args
}

/// Runs the driver script and waits for the PNG at `request.output_path`.
pub fn render_model(
    request: &RenderModelRequest,
    command: &CommandLine,
    tools: &Tools,
) -> Result<()> {
    let work_dir = tempfile::Builder::new()
        .prefix("mcrender-blender-")
        .tempdir()
        .map_err(|e| Error::io("cannot create temporary directory in", std::env::temp_dir(), e))?;
    let script_path = work_dir.path().join(DRIVER_FILE);
    fs::write(&script_path, DRIVER_SCRIPT)
        .map_err(|e| Error::io("cannot write Blender script", &script_path, e))?;

    let mut child = tools.spawn(Tool::Blender, command, build_args(request, &script_path))?;
    let status = child
        .wait()
        .map_err(|e| Error::io("cannot wait for Blender rendering", &request.model_path, e))?;
    if !status.success() {
        return Err(Error::ToolFailed {
            tool: Tool::Blender,
            status,
        });
    }

    if !request.output_path.is_file() {
        return Err(Error::MissingOutput {
            tool: Tool::Blender,
            path: request.output_path.clone(),
        });
    }
    log::info!("Blender rendered {}", request.output_path.display());
    Ok(())
}
