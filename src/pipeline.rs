//! The three library entry points: world to image, world to model, model to image.
//!
//! Every call runs strictly in sequence and blocks on the external tools. A
//! failure in any stage ends the call; temporary directories are removed on
//! every path.

use crate::error::{Error, Result};
use crate::finish;
use crate::options::RenderOptions;
use crate::region::RenderRegion;
use crate::tools::blender::{self, RenderModelRequest};
use crate::tools::mineways::{self, ModelFiles, ModelRequest};
use crate::tools::{CommandLine, Tool, Tools};
use std::fmt;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

const MODEL_NAME: &str = "snippet";
const RENDER_FILE: &str = "render.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    ConfigResolving,
    ModelGeneration,
    Rendering,
    Finishing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validating => "Checking arguments",
            Stage::ConfigResolving => "Resolving tool commands",
            Stage::ModelGeneration => "Running Mineways",
            Stage::Rendering => "Rendering with Blender",
            Stage::Finishing => "Finishing image",
            Stage::Done => "Done",
        })
    }
}

/// Notified on every stage transition.
pub trait StageObserver {
    fn on_stage(&mut self, stage: Stage);
}

impl StageObserver for () {
    fn on_stage(&mut self, _stage: Stage) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub world_path: PathBuf,
    pub output_path: PathBuf,
    pub region: RenderRegion,
    pub options: RenderOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRenderJob {
    pub model_path: PathBuf,
    pub output_path: PathBuf,
    pub exposure: f32,
    pub trim: bool,
    pub force: bool,
}

/// Renders a region of a world to a PNG at `job.output_path`.
pub fn render(job: &RenderJob, tools: &Tools, observer: &mut impl StageObserver) -> Result<()> {
    enter(observer, Stage::Validating);
    finish::check_output(&job.output_path, job.options.force)?;

    enter(observer, Stage::ConfigResolving);
    let mineways_cmd = tools.command(Tool::Mineways)?;
    let blender_cmd = tools.command(Tool::Blender)?;

    enter(observer, Stage::ModelGeneration);
    let model_dir = temp_dir("mcrender-model-")?;
    let request = ModelRequest {
        output_dir: model_dir.path().to_path_buf(),
        name: MODEL_NAME.to_string(),
        world_path: job.world_path.clone(),
        region: job.region,
        rotation: job.options.rotation,
        dimension: job.options.dimension,
    };
    let model = mineways::make_model(&request, &mineways_cmd, tools)?;

    let finishing = ModelRenderJob {
        model_path: model.obj,
        output_path: job.output_path.clone(),
        exposure: job.options.exposure,
        trim: job.options.trim,
        force: job.options.force,
    };
    render_and_finish(&finishing, &blender_cmd, tools, observer)
}

/// Exports a region of a world to `<output_dir>/<name>.obj` plus its materials and textures.
pub fn make_model(request: &ModelRequest, tools: &Tools) -> Result<ModelFiles> {
    let command = tools.command(Tool::Mineways)?;
    mineways::make_model(request, &command, tools)
}

/// Renders an existing model to a PNG at `job.output_path`.
pub fn render_model(
    job: &ModelRenderJob,
    tools: &Tools,
    observer: &mut impl StageObserver,
) -> Result<()> {
    enter(observer, Stage::Validating);
    finish::check_output(&job.output_path, job.force)?;
    if !job.model_path.is_file() {
        let source = io::Error::new(io::ErrorKind::NotFound, "no such model file");
        return Err(Error::io("cannot read model", &job.model_path, source));
    }

    enter(observer, Stage::ConfigResolving);
    let command = tools.command(Tool::Blender)?;

    render_and_finish(job, &command, tools, observer)
}

fn render_and_finish(
    job: &ModelRenderJob,
    command: &CommandLine,
    tools: &Tools,
    observer: &mut impl StageObserver,
) -> Result<()> {
    enter(observer, Stage::Rendering);
    let render_dir = temp_dir("mcrender-render-")?;
    let raw = render_dir.path().join(RENDER_FILE);
    let request = RenderModelRequest {
        model_path: job.model_path.clone(),
        output_path: raw.clone(),
        exposure: job.exposure,
    };
    blender::render_model(&request, command, tools)?;

    enter(observer, Stage::Finishing);
    if job.trim {
        finish::trim_in_place(&raw)?;
    }
    finish::place_output(&raw, &job.output_path, job.force)?;

    enter(observer, Stage::Done);
    log::info!("Created {}", job.output_path.display());
    Ok(())
}

fn enter(observer: &mut impl StageObserver, stage: Stage) {
    log::debug!("{stage}");
    observer.on_stage(stage);
}

fn temp_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(|e| Error::io("cannot create temporary directory in", std::env::temp_dir(), e))
}
