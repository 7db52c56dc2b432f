//! PNG output for debug images.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use strata_worldgen::debug_viz::DebugImage;

/// Failure writing one preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("cannot create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

/// Writes `image` as `<dir>/<name>.png`, creating `dir` if needed.
pub fn write(dir: &Path, name: &str, image: &DebugImage) -> Result<PathBuf, PreviewError> {
    std::fs::create_dir_all(dir).map_err(|source| PreviewError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{name}.png"));
    let file = File::create(&path).map_err(|source| PreviewError::Io {
        path: path.clone(),
        source,
    })?;

    let encode = |source| PreviewError::Encode {
        path: path.clone(),
        source,
    };
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(encode)?;
    writer.write_image_data(&image.pixels).map_err(encode)?;
    writer.finish().map_err(encode)?;

    tracing::debug!("wrote {}", path.display());
    Ok(path)
}
