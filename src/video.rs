use std::path::Path;

use ffmpeg_next as ffmpeg;
use ffmpeg::codec::context::Context as CodecContext;
use ffmpeg::codec::decoder::video::Video as Decoder;
use ffmpeg::format::context::Input;
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{Context as Scaler, Flags};
use ffmpeg::util::error::EAGAIN;
use ffmpeg::util::format::pixel::Pixel as PixelFormat;
use ffmpeg::util::frame::video::Video as InnerFrame;

use crate::frame::Frame;
use crate::source::FrameSource;
use crate::Error;

/// Decodes the best video stream of a file into BGR frames.
pub struct VideoStream {
    input: Input,
    stream: usize,
    decoder: Decoder,
    scaler: Scaler,
    flushed: bool,
    open: bool,
}

impl VideoStream {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        ffmpeg::init()?;

        let input = ffmpeg::format::input(&path)?;

        let (stream, decoder) = {
            let stream = input.streams().best(Type::Video).ok_or("Failed to get stream")?;
            let context = CodecContext::from_parameters(stream.parameters())?;
            (stream.index(), context.decoder().video()?)
        };

        let scaler = Scaler::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            PixelFormat::BGR24,
            decoder.width(),
            decoder.height(),
            Flags::BILINEAR,
        )?;

        log::debug!(
            "opened {} ({}x{}, stream {})",
            path.as_ref().display(),
            decoder.width(),
            decoder.height(),
            stream
        );

        Ok(Self {
            input,
            stream,
            decoder,
            scaler,
            flushed: false,
            open: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    fn convert(&mut self, decoded: &InnerFrame) -> Result<Frame, Error> {
        let mut output = InnerFrame::empty();
        self.scaler.run(decoded, &mut output)?;

        let (width, height) = (output.width(), output.height());
        Frame::from_bgr(width, height, as_vec(&output))
    }
}

impl FrameSource for VideoStream {
    fn is_open(&self) -> bool {
        self.open
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        let mut decoded = InnerFrame::empty();

        loop {
            match received(self.decoder.receive_frame(&mut decoded))? {
                Received::Frame => return self.convert(&decoded).map(Some),
                Received::Drained => {
                    self.open = false;
                    return Ok(None);
                }
                Received::Pending if self.flushed => {
                    self.open = false;
                    return Ok(None);
                }
                Received::Pending => {}
            }

            let next = self
                .input
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));

            match next {
                Some((stream, packet)) => {
                    if stream == self.stream {
                        self.decoder.send_packet(&packet)?;
                    }
                }
                None => {
                    self.decoder.send_eof()?;
                    self.flushed = true;
                }
            }
        }
    }
}

enum Received {
    Frame,
    /// The decoder wants more packets first.
    Pending,
    Drained,
}

fn received(result: Result<(), ffmpeg::Error>) -> Result<Received, Error> {
    match result {
        Ok(()) => Ok(Received::Frame),
        Err(ffmpeg::Error::Eof) => Ok(Received::Drained),
        Err(ffmpeg::Error::Other { errno }) if errno == EAGAIN => Ok(Received::Pending),
        Err(error) => Err(error.into()),
    }
}

fn as_vec(output: &InnerFrame) -> Vec<u8> {
    let index = 0;
    let stride = output.stride(index);
    let width = output.width() as usize * 3;
    let data = output.data(index);

    // Rows may be padded past the pixel data, skip over the padding
    if stride == width {
        data[..width * output.height() as usize].to_vec()
    } else {
        let mut vec = Vec::with_capacity(width * output.height() as usize);

        for row in data.chunks(stride).take(output.height() as usize) {
            vec.extend_from_slice(&row[..width]);
        }

        vec
    }
}
