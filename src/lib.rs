//! Condenses a video into a slit scan: every group of consecutive frames is
//! averaged into one color, and the colors are drawn side by side as
//! vertical stripes.
//!
//! ```no_run
//! use slitscan::{open_source, SlitScanBuilder};
//!
//! let builder = SlitScanBuilder::new(400, 5)?;
//! let raster = builder.build(open_source("movie.mp4")?)?;
//! raster.save("slitscan.png")?;
//! # Ok::<(), slitscan::Error>(())
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "ffmpeg")]
use ffmpeg_next as ffmpeg;

pub mod frame;
pub mod paths;
pub mod sequence;
pub mod slitscan;
pub mod source;
#[cfg(feature = "ffmpeg")]
pub mod video;

pub use frame::{Bgr, Frame};
pub use sequence::ImageSequence;
pub use slitscan::{build, Raster, SlitScanBuilder};
pub use source::{FrameSource, Frames};
#[cfg(feature = "ffmpeg")]
pub use video::VideoStream;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub enum Error {
    Static(&'static str),
    InvalidArgument(String),
    /// The raster has no stripes, so there is no image to write.
    EmptyImage,
    Io(io::Error),
    Image(image::ImageError),
    #[cfg(feature = "ffmpeg")]
    Ffmpeg(ffmpeg::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Static(message) => f.write_str(message),
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::EmptyImage => f.write_str("no frames could be read, the slit scan is empty"),
            Error::Io(error) => write!(f, "io error: {}", error),
            Error::Image(error) => write!(f, "image error: {}", error),
            #[cfg(feature = "ffmpeg")]
            Error::Ffmpeg(error) => write!(f, "ffmpeg error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::Image(error) => Some(error),
            #[cfg(feature = "ffmpeg")]
            Error::Ffmpeg(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(feature = "ffmpeg")]
impl From<ffmpeg::Error> for Error {
    fn from(error: ffmpeg::Error) -> Self {
        Error::Ffmpeg(error)
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Static(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<image::ImageError> for Error {
    fn from(error: image::ImageError) -> Self {
        Error::Image(error)
    }
}

/// Opens `path` as a frame source: directories are read as image sequences,
/// anything else is decoded as a video.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn FrameSource>, Error> {
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(Box::new(ImageSequence::open(path)?));
    }

    #[cfg(feature = "ffmpeg")]
    {
        Ok(Box::new(VideoStream::new(path)?))
    }
    #[cfg(not(feature = "ffmpeg"))]
    {
        Err(Error::Static(
            "decoding video files requires the `ffmpeg` feature",
        ))
    }
}

/// Renders the slit scan of `input` and writes it as a PNG.
///
/// `outfile` defaults to `slitscan.png` beside the input and is resolved
/// relative to the input's directory. Paths are checked before the input is
/// opened. Returns the path that was written.
pub fn render_file(
    input: &Path,
    outfile: Option<&Path>,
    builder: &SlitScanBuilder,
) -> Result<PathBuf, Error> {
    let input = paths::absolute(input)?;
    let output = paths::resolve_output(&input, outfile)?;

    let source = open_source(&input)?;
    let raster = builder.build(source)?;
    log::info!(
        "{} frames condensed into {} stripes",
        raster.frames_read(),
        raster.width()
    );

    raster.save(&output)?;
    Ok(output)
}
