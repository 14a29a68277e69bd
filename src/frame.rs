use image::{Rgb, RgbImage};

use crate::Error;

/// One byte-color triple in blue, green, red order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr(pub [u8; 3]);

impl Bgr {
    pub fn b(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn r(self) -> u8 {
        self.0[2]
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r(), self.g(), self.b()])
    }
}

/// A decoded frame as packed BGR24 rows without padding.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "frame dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "frame of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgb_image(image: &RgbImage) -> Result<Self, Error> {
        let data = image
            .pixels()
            .flat_map(|Rgb([r, g, b])| [*b, *g, *r])
            .collect();
        Self::from_bgr(image.width(), image.height(), data)
    }

    pub fn filled(width: u32, height: u32, color: Bgr) -> Result<Self, Error> {
        let data = color.0.repeat(width as usize * height as usize);
        Self::from_bgr(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mean color of the whole frame, channels in BGR order.
    ///
    /// Each row is reduced to its mean first and the row means are then
    /// averaged, so every pixel carries the same weight.
    pub fn mean_color(&self) -> [f64; 3] {
        let row_bytes = self.width as usize * 3;
        let mut total = [0f64; 3];

        for row in self.data.chunks_exact(row_bytes) {
            let mut sum = [0u64; 3];
            for pixel in row.chunks_exact(3) {
                sum[0] += u64::from(pixel[0]);
                sum[1] += u64::from(pixel[1]);
                sum[2] += u64::from(pixel[2]);
            }
            for (channel, sum) in total.iter_mut().zip(sum) {
                *channel += sum as f64 / f64::from(self.width);
            }
        }

        total.map(|channel| channel / f64::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_frame_mean_is_its_color() {
        let frame = Frame::filled(4, 3, Bgr([10, 20, 30])).unwrap();
        assert_eq!(frame.mean_color(), [10.0, 20.0, 30.0]);
    }

    #[test]
    fn mean_weights_every_pixel() {
        // two rows: black/white and white/white
        let data = vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255];
        let frame = Frame::from_bgr(2, 2, data).unwrap();
        assert_eq!(frame.mean_color(), [191.25; 3]);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(matches!(
            Frame::from_bgr(2, 2, vec![0; 11]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Frame::from_bgr(0, 2, Vec::new()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn rgb_images_are_swapped_to_bgr() {
        let image = RgbImage::from_pixel(2, 1, Rgb([1, 2, 3]));
        let frame = Frame::from_rgb_image(&image).unwrap();
        assert_eq!(frame.as_bytes(), &[3, 2, 1, 3, 2, 1]);
        assert_eq!(Bgr([3, 2, 1]).to_rgb(), Rgb([1, 2, 3]));
    }
}
