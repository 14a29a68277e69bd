use std::fs;
use std::path::{Path, PathBuf};

use crate::frame::Frame;
use crate::source::FrameSource;
use crate::Error;

const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// A directory of still images read as frames in file name order.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequence {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && is_frame_image(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        log::debug!(
            "found {} frame images in {}",
            paths.len(),
            dir.as_ref().display()
        );

        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn is_open(&self) -> bool {
        self.next < self.paths.len()
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        let image = image::open(path)?.to_rgb8();
        Frame::from_rgb_image(&image).map(Some)
    }
}

fn is_frame_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
