use crate::frame::Frame;
use crate::Error;

/// A sequential reader of decoded frames.
///
/// Dropping the source releases whatever it holds open.
pub trait FrameSource {
    /// Whether the source may still have frames to give.
    fn is_open(&self) -> bool;

    /// Reads the next frame. `Ok(None)` marks the end of the stream.
    fn read_frame(&mut self) -> Result<Option<Frame>, Error>;

    fn frames(&mut self) -> Frames<'_, Self>
    where
        Self: Sized,
    {
        Frames {
            source: self,
            done: false,
        }
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        (**self).read_frame()
    }
}

/// Iterator over the frames of a source. Stops after the first error.
pub struct Frames<'a, S: FrameSource> {
    source: &'a mut S,
    done: bool,
}

impl<S: FrameSource> Iterator for Frames<'_, S> {
    type Item = Result<Frame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.source.is_open() {
            return None;
        }

        match self.source.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
