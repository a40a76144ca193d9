//! Stage 1: export a region of a world to a Wavefront OBJ model with Mineways.
//!
//! Mineways is driven by a script file. When it cannot load the world it only
//! writes an error to its log and keeps running, so the log is polled while the
//! process is alive and the process is killed as soon as a known error shows up.

use crate::error::{Error, Result};
use crate::options::{Dimension, Rotation};
use crate::region::RenderRegion;
use crate::tools::{CommandLine, Tool, Tools};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::Duration;

/// Log line prefixes Mineways writes when the world cannot be loaded.
/// Version dependent; the config file can replace this list.
pub const WORLD_ERROR_MARKERS: &[&str] =
    &["Error reading line 2: Mineways attempted to load world"];

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SCRIPT_FILE: &str = "script.mwscript";
const LOG_FILE: &str = "log.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogVerdict {
    Clean,
    BadWorld,
}

pub fn classify_log(log: &str, markers: &[&str]) -> LogVerdict {
    let bad = log
        .lines()
        .map(str::trim_start)
        .any(|line| markers.iter().any(|marker| !marker.is_empty() && line.starts_with(marker)));
    if bad {
        LogVerdict::BadWorld
    } else {
        LogVerdict::Clean
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub output_dir: PathBuf,
    /// File stem of the exported model; `<name>.obj` ends up in `output_dir`.
    pub name: String,
    pub world_path: PathBuf,
    pub region: RenderRegion,
    pub rotation: Rotation,
    pub dimension: Dimension,
}

impl ModelRequest {
    pub fn obj_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.obj", self.name))
    }
}

/// Files written by a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub obj: PathBuf,
    /// Material library and texture images next to the model.
    pub assets: Vec<PathBuf>,
}

pub fn build_script(request: &ModelRequest, log_path: &Path) -> String {
    let [x, y, z] = request.region.origin();
    let [max_x, max_y, max_z] = request.region.max_corner();

    // Line order matters: the world must stay on line 2 for the error markers to match.
    let lines = [
        format!("Save Log file: {}", log_path.display()),
        format!("Minecraft world: {}", request.world_path.display()),
        format!("View {}", request.dimension.mineways_name()),
        format!("Selection location min to max: {x}, {y}, {z} to {max_x}, {max_y}, {max_z}"),
        "Set render type: Wavefront OBJ absolute indices".to_string(),
        "File type: Export all textures to three large images".to_string(),
        format!("Rotate model {} degrees", request.rotation.degrees()),
        "Scale model by making each block 100 cm high".to_string(),
        "Tree leaves solid: yes".to_string(),
        "Use biomes: yes".to_string(),
        format!("Export for Rendering: {}", request.obj_path().display()),
        "Close".to_string(),
    ];
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

pub fn make_model(
    request: &ModelRequest,
    command: &CommandLine,
    tools: &Tools,
) -> Result<ModelFiles> {
    let work_dir = tempfile::Builder::new()
        .prefix("mcrender-mineways-")
        .tempdir()
        .map_err(|e| Error::io("cannot create temporary directory in", std::env::temp_dir(), e))?;
    let script_path = work_dir.path().join(SCRIPT_FILE);
    let log_path = work_dir.path().join(LOG_FILE);

    fs::write(&script_path, build_script(request, &log_path))
        .map_err(|e| Error::io("cannot write Mineways script", &script_path, e))?;
    fs::create_dir_all(&request.output_dir)
        .map_err(|e| Error::io("cannot create output directory", &request.output_dir, e))?;

    let args: Vec<OsString> = ["-m", "-suppress", "-s", "none"]
        .into_iter()
        .map(OsString::from)
        .chain([script_path.clone().into_os_string()])
        .collect();
    let child = tools.spawn(Tool::Mineways, command, &args)?;

    let markers = tools.world_error_markers();
    let status = watch(child, &log_path, &markers, &request.world_path)?;
    if log_verdict(&log_path, &markers) == LogVerdict::BadWorld {
        return Err(Error::BadWorld {
            world: request.world_path.clone(),
        });
    }
    if !status.success() {
        return Err(Error::ToolFailed {
            tool: Tool::Mineways,
            status,
        });
    }

    let obj = request.obj_path();
    if !obj.is_file() {
        return Err(Error::MissingOutput {
            tool: Tool::Mineways,
            path: obj,
        });
    }
    let assets = collect_assets(request, &obj)?;
    log::info!("Mineways exported {} with {} asset file(s)", obj.display(), assets.len());

    Ok(ModelFiles { obj, assets })
}

/// Waits for Mineways to exit, killing it early if the log reports a world it can't load.
fn watch(mut child: Child, log_path: &Path, markers: &[&str], world: &Path) -> Result<ExitStatus> {
    loop {
        let exited = child
            .try_wait()
            .map_err(|e| Error::io("cannot wait for Mineways running", log_path, e))?;
        if let Some(status) = exited {
            return Ok(status);
        }

        if log_verdict(log_path, markers) == LogVerdict::BadWorld {
            log::warn!("Mineways could not load {}, stopping it", world.display());
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::BadWorld {
                world: world.to_path_buf(),
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn log_verdict(log_path: &Path, markers: &[&str]) -> LogVerdict {
    match fs::read(log_path) {
        Ok(bytes) => classify_log(&String::from_utf8_lossy(&bytes), markers),
        // Mineways may not have created its log yet.
        Err(_) => LogVerdict::Clean,
    }
}

fn collect_assets(request: &ModelRequest, obj: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(&request.output_dir)
        .map_err(|e| Error::io("cannot list output directory", &request.output_dir, e))?;

    let mut assets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path != obj && path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(request.name.as_str()))
        })
        .collect();
    assets.sort();
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dimension: Dimension) -> ModelRequest {
        ModelRequest {
            output_dir: PathBuf::from("/tmp/out"),
            name: "snippet".to_string(),
            world_path: PathBuf::from("/saves/My World"),
            region: RenderRegion::from_corner_size([0, 60, 0], [64, 128, 64]).unwrap(),
            rotation: Rotation::R90,
            dimension,
        }
    }

    #[test]
    fn script_carries_region_rotation_and_dimension() {
        let script = build_script(&request(Dimension::Overworld), Path::new("/tmp/w/log.txt"));
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines[0], "Save Log file: /tmp/w/log.txt");
        assert_eq!(lines[1], "Minecraft world: /saves/My World");
        assert!(lines.contains(&"View Overworld"));
        assert!(lines.contains(&"Selection location min to max: 0, 60, 0 to 63, 187, 63"));
        assert!(lines.contains(&"Rotate model 90 degrees"));
        assert!(lines.contains(&"Export for Rendering: /tmp/out/snippet.obj"));
        assert_eq!(lines.last(), Some(&"Close"));
    }

    #[test]
    fn dimension_aliases_build_identical_scripts() {
        let log = Path::new("log.txt");
        let short: Dimension = "end".parse().unwrap();
        let long: Dimension = "the_end".parse().unwrap();
        assert_eq!(build_script(&request(short), log), build_script(&request(long), log));
        assert!(build_script(&request(short), log).contains("View The End"));
    }

    #[test]
    fn classifies_world_errors_by_line_prefix() {
        let log = "Mineways version 11\n\
                   Error reading line 2: Mineways attempted to load world /x but could not.\n";
        assert_eq!(classify_log(log, WORLD_ERROR_MARKERS), LogVerdict::BadWorld);

        let quoted = "Note: Error reading line 2: Mineways attempted to load world";
        assert_eq!(classify_log(quoted, WORLD_ERROR_MARKERS), LogVerdict::Clean);
        assert_eq!(classify_log("Export complete\n", WORLD_ERROR_MARKERS), LogVerdict::Clean);
        assert_eq!(classify_log("", WORLD_ERROR_MARKERS), LogVerdict::Clean);
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let log = "World not found: /x\n";
        assert_eq!(classify_log(log, WORLD_ERROR_MARKERS), LogVerdict::Clean);
        assert_eq!(classify_log(log, &["World not found"]), LogVerdict::BadWorld);
        assert_eq!(classify_log(log, &[""]), LogVerdict::Clean);
    }

    #[test]
    fn missing_log_is_clean() {
        assert_eq!(
            log_verdict(Path::new("/nonexistent/mcrender/log.txt"), WORLD_ERROR_MARKERS),
            LogVerdict::Clean
        );
    }
}
