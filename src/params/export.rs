//! Headless run and export configuration.

use std::path::PathBuf;

use crate::error::{require_positive, OceanError, Result};

/// Headless export configuration (how long to run, where to write frames)
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Number of ticks to simulate
    pub frames: usize,

    /// Time step per tick (seconds)
    pub dt_s: f32,

    /// Write every n-th frame (1 = every frame)
    pub every: usize,

    /// Output directory for images and vertex dumps
    pub output_dir: PathBuf,
}

impl ExportConfig {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            dt_s: 1.0 / 60.0,
            every: 1,
            output_dir: PathBuf::from("frames"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("dt_s", self.dt_s)?;
        if self.every == 0 {
            return Err(OceanError::invalid("every", "must be >= 1"));
        }
        Ok(())
    }

    /// Total simulated time (seconds)
    pub fn duration_s(&self) -> f32 {
        self.frames as f32 * self.dt_s
    }

    /// Whether frame `index` should be written
    pub fn should_export(&self, index: usize) -> bool {
        index % self.every == 0 || index + 1 == self.frames
    }

    /// Caustics image path for a frame
    pub fn caustics_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("caustics_{:05}.png", index))
    }

    /// Height image path for a frame
    pub fn height_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("height_{:05}.png", index))
    }

    /// Raw vertex dump path for a frame
    pub fn vertices_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("vertices_{:05}.bin", index))
    }
}
