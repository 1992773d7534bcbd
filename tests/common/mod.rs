//! Minimal real image files for exercising the EXIF decoder.

use std::{io::Cursor, path::PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

const GPS_INFO_POINTER: u16 = 0x8825;
const GPS_LATITUDE_REF: u16 = 0x0001;
const GPS_LATITUDE: u16 = 0x0002;
const GPS_LONGITUDE_REF: u16 = 0x0003;
const GPS_LONGITUDE: u16 = 0x0004;
const MAKE: u16 = 0x010F;

const ASCII: u16 = 2;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

/// Little-endian TIFF body, offsets relative to its start.
#[derive(Default)]
struct Tiff {
    bytes: Vec<u8>,
}

impl Tiff {
    fn new() -> Self {
        let mut tiff = Self::default();
        tiff.bytes.extend_from_slice(b"II");
        tiff.u16(42).u32(8)
    }

    fn u16(mut self, v: u16) -> Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn u32(mut self, v: u32) -> Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    fn entry(self, tag: u16, kind: u16, count: u32, value: [u8; 4]) -> Self {
        self.u16(tag).u16(kind).u32(count).raw(&value)
    }

    fn rational(self, num: u32, den: u32) -> Self {
        self.u32(num).u32(den)
    }
}

/// GPS IFD with latitude 51°30'0" N and longitude 0°7'30" E.
pub fn tiff_with_gps() -> Vec<u8> {
    let gps_ifd: u32 = 26;
    let lat_data: u32 = 80;
    let lon_data: u32 = 104;

    Tiff::new()
        .u16(1)
        .entry(GPS_INFO_POINTER, LONG, 1, gps_ifd.to_le_bytes())
        .u32(0)
        .u16(4)
        .entry(GPS_LATITUDE_REF, ASCII, 2, *b"N\0\0\0")
        .entry(GPS_LATITUDE, RATIONAL, 3, lat_data.to_le_bytes())
        .entry(GPS_LONGITUDE_REF, ASCII, 2, *b"E\0\0\0")
        .entry(GPS_LONGITUDE, RATIONAL, 3, lon_data.to_le_bytes())
        .u32(0)
        .rational(51, 1)
        .rational(30, 1)
        .rational(0, 1)
        .rational(0, 1)
        .rational(7, 1)
        .rational(30, 1)
        .bytes
}

/// IFD0 whose `Make` value points past the end of the block, followed by a
/// valid GPS IFD holding both reference tags.
pub fn tiff_with_gps_and_broken_make() -> Vec<u8> {
    let gps_ifd: u32 = 38;

    Tiff::new()
        .u16(2)
        .entry(MAKE, ASCII, 11, 0xFFFF_u32.to_le_bytes())
        .entry(GPS_INFO_POINTER, LONG, 1, gps_ifd.to_le_bytes())
        .u32(0)
        .u16(2)
        .entry(GPS_LATITUDE_REF, ASCII, 2, *b"N\0\0\0")
        .entry(GPS_LONGITUDE_REF, ASCII, 2, *b"E\0\0\0")
        .u32(0)
        .bytes
}

/// IFD0 with only a `Make` tag.
pub fn tiff_without_gps() -> Vec<u8> {
    let make = b"TestCamera\0";
    let make_offset: u32 = 26;

    Tiff::new()
        .u16(1)
        .entry(MAKE, ASCII, make.len() as u32, make_offset.to_le_bytes())
        .u32(0)
        .raw(make)
        .bytes
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let pixel = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])));
    let mut bytes = Vec::new();
    pixel
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode 1x1 image");
    bytes
}

/// A 1x1 JPEG with `tiff` in an APP1 segment right after SOI.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);

    let jpeg = encode(ImageFormat::Jpeg);
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn plain_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

pub fn plain_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture dir"),
        }
    }

    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }
}
