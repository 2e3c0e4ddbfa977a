//! Green-dominance heuristic for camera frames.
//!
//! This is not image recognition. A pixel counts as "green" when its green
//! channel exceeds both red and blue by more than [`GREEN_MARGIN`]; a frame is
//! plant-like when strictly more than a quarter of its pixels are green.

use serde::Serialize;
use thiserror::Error;

/// Per-channel margin on the 0-255 scale.
pub const GREEN_MARGIN: u16 = 15;

/// Green pixel share a frame must exceed to count as plant-like, as a
/// fraction so the comparison stays in integers.
pub const PLANT_RATIO: (usize, usize) = (1, 4);

/// [`PLANT_RATIO`] as a float, for reporting.
pub const PLANT_RATIO_THRESHOLD: f64 = PLANT_RATIO.0 as f64 / PLANT_RATIO.1 as f64;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame is {len} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
    #[error("frame dimensions {width}x{height} overflow")]
    TooLarge { width: u32, height: u32 },
}

/// A tightly packed RGBA8 frame whose buffer length matches its dimensions.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, FrameError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(FrameError::TooLarge { width, height })?;
        if rgba.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                len: rgba.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

/// Outcome of scanning a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GreenAnalysis {
    pub green: usize,
    pub total: usize,
    /// `green / total`, or 0 for an empty frame.
    pub ratio: f64,
    pub plant_like: bool,
}

pub fn is_green_dominant(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (r as u16, g as u16, b as u16);
    g > r + GREEN_MARGIN && g > b + GREEN_MARGIN
}

/// Scan every RGBA sample in `rgba`. A trailing partial sample is ignored.
pub fn analyze(rgba: &[u8]) -> GreenAnalysis {
    let mut green = 0usize;
    let mut total = 0usize;
    for px in rgba.chunks_exact(BYTES_PER_PIXEL) {
        if is_green_dominant(px[0], px[1], px[2]) {
            green += 1;
        }
        total += 1;
    }

    let ratio = if total == 0 {
        0.0
    } else {
        green as f64 / total as f64
    };

    GreenAnalysis {
        green,
        total,
        ratio,
        // green / total > num / den, cross-multiplied
        plant_like: total > 0 && green * PLANT_RATIO.1 > total * PLANT_RATIO.0,
    }
}

/// `true` when the frame looks predominantly green.
pub fn classify(frame: &Frame) -> bool {
    analyze(frame.pixels()).plant_like
}
