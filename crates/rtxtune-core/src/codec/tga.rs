//! Uncompressed 32-bit TGA writer.
//!
//! Only one profile is produced: image type 2, 32 bits per pixel, 8 alpha
//! bits, bottom-left origin, no ID field and no color map.

use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::CodecError;
use crate::raster::{Raster, A, B, G, R};

/// TGA header size in bytes.
pub const TGA_HEADER_SIZE: usize = 18;

/// Image type 2: uncompressed true-color.
pub const TGA_IMAGE_TYPE_TRUECOLOR: u8 = 2;

/// Bits per pixel written by this encoder.
pub const TGA_PIXEL_DEPTH: u8 = 32;

/// Image descriptor: 8 alpha bits, bottom-left screen origin.
pub const TGA_DESCRIPTOR: u8 = 8;

/// Write a raster as an uncompressed 32-bit TGA file.
///
/// The file is created (or truncated) in place.
pub fn write_tga(raster: &Raster, path: &Path) -> Result<(), CodecError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_tga_to_writer(raster, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a raster as an uncompressed 32-bit TGA into any writer.
pub fn write_tga_to_writer<W: Write>(raster: &Raster, mut w: W) -> Result<(), CodecError> {
    let width = u16::try_from(raster.width).map_err(|_| {
        CodecError::InvalidDimensions(format!("width {} exceeds TGA limit", raster.width))
    })?;
    let height = u16::try_from(raster.height).map_err(|_| {
        CodecError::InvalidDimensions(format!("height {} exceeds TGA limit", raster.height))
    })?;
    if raster.data.len() != raster.pixel_count() * 4 {
        return Err(CodecError::InvalidDimensions(format!(
            "expected {} bytes for {}x{}, got {}",
            raster.pixel_count() * 4,
            raster.width,
            raster.height,
            raster.data.len()
        )));
    }

    w.write_u8(0)?; // ID length
    w.write_u8(0)?; // color-map type
    w.write_u8(TGA_IMAGE_TYPE_TRUECOLOR)?;
    w.write_u16::<LittleEndian>(0)?; // color-map first entry
    w.write_u16::<LittleEndian>(0)?; // color-map length
    w.write_u8(0)?; // color-map entry size
    w.write_u16::<LittleEndian>(0)?; // x origin
    w.write_u16::<LittleEndian>(0)?; // y origin
    w.write_u16::<LittleEndian>(width)?;
    w.write_u16::<LittleEndian>(height)?;
    w.write_u8(TGA_PIXEL_DEPTH)?;
    w.write_u8(TGA_DESCRIPTOR)?;

    let row_bytes = raster.width as usize * 4;
    let mut row = vec![0u8; row_bytes];
    for y in (0..raster.height).rev() {
        let start = raster.offset(0, y);
        let src = &raster.data[start..start + row_bytes];
        for (dst, px) in row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            dst[0] = px[B];
            dst[1] = px[G];
            dst[2] = px[R];
            dst[3] = px[A];
        }
        w.write_all(&row)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raster: &Raster) -> Vec<u8> {
        let mut out = Vec::new();
        write_tga_to_writer(raster, &mut out).unwrap();
        out
    }

    #[test]
    fn test_header_bytes() {
        let raster = Raster::new(300, 2, [0, 0, 0, 255]);
        let bytes = encode(&raster);
        assert_eq!(
            &bytes[..TGA_HEADER_SIZE],
            &[0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x2c, 0x01, 2, 0, 32, 8]
        );
        assert_eq!(bytes.len(), TGA_HEADER_SIZE + 300 * 2 * 4);
    }

    #[test]
    fn test_rows_bottom_up_bgra() {
        let mut raster = Raster::new(1, 2, [0; 4]);
        raster.set(0, 0, [1, 2, 3, 4]);
        raster.set(0, 1, [5, 6, 7, 8]);
        let bytes = encode(&raster);
        let pixels = &bytes[TGA_HEADER_SIZE..];
        // bottom row (y = 1) comes first
        assert_eq!(pixels, &[7, 6, 5, 8, 3, 2, 1, 4]);
    }

    #[test]
    fn test_rejects_oversized() {
        let raster = Raster {
            width: 70_000,
            height: 0,
            data: Vec::new(),
        };
        let err = write_tga_to_writer(&raster, Vec::new()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidDimensions(_)));
    }

    #[test]
    fn test_rejects_truncated_data() {
        let raster = Raster {
            width: 2,
            height: 2,
            data: vec![0; 12],
        };
        assert!(write_tga_to_writer(&raster, Vec::new()).is_err());
    }
}
