//! In-memory RGBA8 raster.

/// Bytes per RGBA sample.
pub const CHANNELS: usize = 4;

/// Index of the red channel inside a sample.
pub const R: usize = 0;
/// Index of the green channel inside a sample.
pub const G: usize = 1;
/// Index of the blue channel inside a sample.
pub const B: usize = 2;
/// Index of the alpha channel inside a sample.
pub const A: usize = 3;

/// A width x height grid of RGBA8 samples stored row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Raster {
    /// Create a raster filled with one RGBA value.
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing RGBA8 byte vector.
    ///
    /// Returns `None` when the length does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * CHANNELS {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Get the pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Set the pixel at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate over pixels as 4-byte slices.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterate mutably over pixels as 4-byte slices.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Smallest and largest value of one channel, or `None` for an empty raster.
    pub fn channel_range(&self, channel: usize) -> Option<(u8, u8)> {
        self.pixels().map(|p| p[channel]).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Number of stacked square frames when this raster is a flipbook.
    ///
    /// A flipbook is an image whose height is an integer multiple (at least
    /// two) of its width. Returns `None` for ordinary images.
    pub fn flipbook_frames(&self) -> Option<u32> {
        if self.width == 0 || self.height % self.width != 0 {
            return None;
        }
        let frames = self.height / self.width;
        (frames >= 2).then_some(frames)
    }

    /// Force every alpha sample to 255.
    pub fn make_opaque(&mut self) {
        for p in self.pixels_mut() {
            p[A] = 255;
        }
    }
}

/// Clamp a float to the 0..=255 byte range.
#[inline]
pub fn clamp_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_access() {
        let mut r = Raster::new(3, 2, [1, 2, 3, 4]);
        assert_eq!(r.data.len(), 24);
        assert_eq!(r.get(2, 1), [1, 2, 3, 4]);
        r.set(1, 1, [9, 8, 7, 6]);
        assert_eq!(r.get(1, 1), [9, 8, 7, 6]);
        assert_eq!(r.offset(1, 1), 16);
    }

    #[test]
    fn test_from_rgba8_rejects_bad_length() {
        assert!(Raster::from_rgba8(2, 2, vec![0; 15]).is_none());
        assert!(Raster::from_rgba8(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn test_channel_range() {
        let mut r = Raster::new(2, 1, [10, 0, 0, 255]);
        r.set(1, 0, [200, 0, 0, 255]);
        assert_eq!(r.channel_range(R), Some((10, 200)));
        assert_eq!(Raster::new(0, 0, [0; 4]).channel_range(R), None);
    }

    #[test]
    fn test_flipbook_detection() {
        assert_eq!(Raster::new(16, 64, [0; 4]).flipbook_frames(), Some(4));
        assert_eq!(Raster::new(16, 16, [0; 4]).flipbook_frames(), None);
        assert_eq!(Raster::new(16, 40, [0; 4]).flipbook_frames(), None);
        assert_eq!(Raster::new(0, 0, [0; 4]).flipbook_frames(), None);
    }

    #[test]
    fn test_make_opaque() {
        let mut r = Raster::new(2, 2, [1, 2, 3, 0]);
        r.make_opaque();
        assert!(r.pixels().all(|p| p[A] == 255));
    }
}
