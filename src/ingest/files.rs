use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::frame::Frame;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Configuration for a still-image directory source.
#[derive(Clone, Debug)]
pub struct ImageDirConfig {
    /// Directory of still images, replayed in lexicographic order.
    pub dir: PathBuf,
}

/// Still-image directory source for replaying recorded sequences.
pub struct ImageDirSource {
    config: ImageDirConfig,
    files: Vec<PathBuf>,
    next_index: usize,
    frames_decoded: u64,
}

impl ImageDirSource {
    pub fn new(config: ImageDirConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
            next_index: 0,
            frames_decoded: 0,
        }
    }

    /// Scan the directory. Fails when it holds no decodable images.
    pub fn connect(&mut self) -> Result<()> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.config.dir)
            .with_context(|| format!("read image dir {}", self.config.dir.display()))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| is_supported_image(path))
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(anyhow!(
                "no jpg/jpeg/png files in {}",
                self.config.dir.display()
            ));
        }
        log::info!(
            "ImageDirSource: connected to {} ({} frames)",
            self.config.dir.display(),
            files.len()
        );
        self.files = files;
        self.next_index = 0;
        Ok(())
    }

    /// Decode the next image. Returns `None` when the sequence is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.files.get(self.next_index) else {
            return Ok(None);
        };
        self.next_index += 1;
        let image = image::open(path)
            .with_context(|| format!("decode image {}", path.display()))?
            .to_rgb8();
        self.frames_decoded += 1;
        Ok(Some(Frame::from(&image)))
    }

    pub fn stats(&self) -> ImageDirStats {
        ImageDirStats {
            frames_decoded: self.frames_decoded,
            total_files: self.files.len(),
            dir: self.config.dir.clone(),
        }
    }
}

/// Statistics for an image directory source.
#[derive(Clone, Debug)]
pub struct ImageDirStats {
    pub frames_decoded: u64,
    pub total_files: usize,
    pub dir: PathBuf,
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
