//! Reduces a frame source to one averaged color per group of frames and lays
//! the colors out as vertical stripes.

use std::path::Path;

use image::RgbImage;

use crate::frame::Bgr;
use crate::source::FrameSource;
use crate::Error;

/// Validated parameters for building a slit scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlitScanBuilder {
    height: u32,
    frame_aggregation_count: u32,
    strict: bool,
}

impl SlitScanBuilder {
    pub fn new(height: u32, frame_aggregation_count: u32) -> Result<Self, Error> {
        if frame_aggregation_count < 1 {
            return Err(Error::InvalidArgument(format!(
                "invalid frame aggregation count {}",
                frame_aggregation_count
            )));
        }

        if height < 1 {
            return Err(Error::InvalidArgument(format!(
                "invalid output image height of {}",
                height
            )));
        }

        Ok(Self {
            height,
            frame_aggregation_count,
            strict: false,
        })
    }

    /// When strict, a decoder error aborts the build instead of ending the
    /// stream early.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_aggregation_count(&self) -> u32 {
        self.frame_aggregation_count
    }

    /// Reads `source` to the end and returns the assembled raster.
    ///
    /// The source is consumed and dropped before this returns, whichever way
    /// it returns.
    pub fn build<S: FrameSource>(&self, mut source: S) -> Result<Raster, Error> {
        log::info!("Reading frames");

        let mut colors = Vec::new();
        let mut group = Group::default();
        let mut frames_read = 0u64;

        for frame in source.frames() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(error) if self.strict => return Err(error),
                Err(error) => {
                    log::warn!(
                        "failed to read frame {}, treating it as the end of the stream: {}",
                        frames_read,
                        error
                    );
                    break;
                }
            };

            frames_read += 1;
            group.add(frame.mean_color());

            if group.frames == self.frame_aggregation_count {
                colors.extend(group.finish(colors.len()));
                group = Group::default();
            }
        }

        // trailing partial group
        colors.extend(group.finish(colors.len()));
        drop(source);

        log::info!("Generating slit scan image");
        Ok(Raster::new(self.height, colors, frames_read))
    }
}

/// Shorthand for `SlitScanBuilder::new(height, frame_aggregation_count)?.build(source)`.
pub fn build<S: FrameSource>(
    source: S,
    height: u32,
    frame_aggregation_count: u32,
) -> Result<Raster, Error> {
    SlitScanBuilder::new(height, frame_aggregation_count)?.build(source)
}

#[derive(Default)]
struct Group {
    sum: [f64; 3],
    frames: u32,
}

impl Group {
    fn add(&mut self, mean: [f64; 3]) {
        for (sum, channel) in self.sum.iter_mut().zip(mean) {
            *sum += channel;
        }
        self.frames += 1;
    }

    /// Rounds half away from zero. Empty groups produce nothing.
    fn finish(&self, index: usize) -> Option<Bgr> {
        if self.frames == 0 {
            return None;
        }

        let color = Bgr(self
            .sum
            .map(|sum| (sum / f64::from(self.frames)).round().clamp(0.0, 255.0) as u8));
        log::debug!(
            "stripe {}: {} frames -> bgr {:?}",
            index,
            self.frames,
            color.0
        );
        Some(color)
    }
}

/// Slit scan image: column `i` is filled with the `i`th group color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    height: u32,
    colors: Vec<Bgr>,
    frames_read: u64,
}

impl Raster {
    fn new(height: u32, colors: Vec<Bgr>, frames_read: u64) -> Self {
        Self {
            height,
            colors,
            frames_read,
        }
    }

    pub fn width(&self) -> u32 {
        self.colors.len() as u32
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Group colors in frame order.
    pub fn colors(&self) -> &[Bgr] {
        &self.colors
    }

    /// Number of frames that contributed to the stripes.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgr> {
        if x >= self.width() || y >= self.height {
            return None;
        }
        Some(self.colors[x as usize])
    }

    /// Row-major BGR24 pixels, `height * width * 3` bytes.
    pub fn to_bgr_bytes(&self) -> Vec<u8> {
        let row: Vec<u8> = self.colors.iter().flat_map(|color| color.0).collect();
        row.repeat(self.height as usize)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height, |x, _y| {
            self.colors[x as usize].to_rgb()
        })
    }

    /// Writes the raster as a PNG. A raster without stripes cannot be
    /// encoded and is rejected before anything is written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        if self.colors.is_empty() {
            return Err(Error::EmptyImage);
        }

        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
