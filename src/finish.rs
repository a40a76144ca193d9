use crate::error::{Error, Result};
use image::RgbaImage;
use std::fs;
use std::path::Path;

/// `(x, y, width, height)` of a rectangle inside an image.
pub type Bounds = (u32, u32, u32, u32);

/// Smallest rectangle containing every pixel that is not fully transparent.
pub fn content_bounds(image: &RgbaImage) -> Option<Bounds> {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0, 0);
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] != 0 {
            found = true;
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }

    found.then(|| (min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1))
}

pub fn trim(image: &RgbaImage) -> Option<RgbaImage> {
    let (x, y, width, height) = content_bounds(image)?;
    Some(image::imageops::crop_imm(image, x, y, width, height).to_image())
}

/// Crops the PNG at `path` to its content. An empty render is left as it is.
pub fn trim_in_place(path: &Path) -> Result<()> {
    let image_error = |source| Error::Image {
        path: path.to_path_buf(),
        source,
    };
    let image = image::open(path).map_err(image_error)?.to_rgba8();

    match trim(&image) {
        Some(trimmed) => {
            log::info!(
                "Trimmed render from {}x{} to {}x{}",
                image.width(),
                image.height(),
                trimmed.width(),
                trimmed.height()
            );
            trimmed.save(path).map_err(image_error)
        }
        None => {
            log::warn!("Render {} is empty, not trimming", path.display());
            Ok(())
        }
    }
}

pub fn check_output(path: &Path, force: bool) -> Result<()> {
    if path.is_dir() || (path.exists() && !force) {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

/// Moves the finished render to `dst`, creating parent directories as needed.
/// Falls back to copying when `src` and `dst` are on different filesystems.
pub fn place_output(src: &Path, dst: &Path, force: bool) -> Result<()> {
    check_output(dst, force)?;

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io("cannot create directory", parent, e))?;
    }

    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) if src.is_file() => {
            log::debug!("rename to {} failed ({err}), copying instead", dst.display());
            fs::copy(src, dst).map_err(|e| Error::io("cannot write output file", dst, e))?;
            fs::remove_file(src).map_err(|e| Error::io("cannot remove temporary file", src, e))
        }
        Err(err) => Err(Error::io("cannot move render from", src, err)),
    }
}
