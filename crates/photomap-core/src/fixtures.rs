//! Synthetic photos for tests.
//!
//! Builds small JPEGs in memory and splices an APP1 EXIF segment carrying a
//! GPS IFD into them, so tests don't depend on binary sample files.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub const WIDTH: u32 = 16;
pub const HEIGHT: u32 = 8;

const RATIONAL_DENOMINATOR: u32 = 1000;

/// GPS tags to embed; `None` leaves the tag out entirely
#[derive(Debug, Clone, Default)]
pub struct GpsFixture {
    pub latitude: Option<(f64, f64, f64)>,
    pub latitude_ref: Option<char>,
    pub longitude: Option<(f64, f64, f64)>,
    pub longitude_ref: Option<char>,
}

impl GpsFixture {
    /// Fully tagged fixture
    pub fn new(latitude: (f64, f64, f64), lat_ref: char, longitude: (f64, f64, f64), lon_ref: char) -> Self {
        Self {
            latitude: Some(latitude),
            latitude_ref: Some(lat_ref),
            longitude: Some(longitude),
            longitude_ref: Some(lon_ref),
        }
    }
}

/// A valid JPEG with no metadata at all
pub fn plain_jpeg() -> Bytes {
    let img = RgbImage::from_fn(WIDTH, HEIGHT, |x, y| Rgb([(x * 16) as u8, (y * 32) as u8, 128]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encoding a JPEG into memory cannot fail");
    Bytes::from(buf)
}

/// A valid JPEG carrying the given GPS tags
pub fn geotagged_jpeg(gps: &GpsFixture) -> Bytes {
    let jpeg = plain_jpeg();
    let tiff = gps_tiff(gps);

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    // SOI
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    Bytes::from(out)
}

/// Big-endian TIFF block: IFD0 with a single GPS pointer, then the GPS IFD
fn gps_tiff(gps: &GpsFixture) -> Vec<u8> {
    enum Entry {
        Ascii(u16, char),
        Rationals(u16, (f64, f64, f64)),
    }

    let mut entries = Vec::new();
    if let Some(r) = gps.latitude_ref {
        entries.push(Entry::Ascii(0x0001, r));
    }
    if let Some(t) = gps.latitude {
        entries.push(Entry::Rationals(0x0002, t));
    }
    if let Some(r) = gps.longitude_ref {
        entries.push(Entry::Ascii(0x0003, r));
    }
    if let Some(t) = gps.longitude {
        entries.push(Entry::Rationals(0x0004, t));
    }

    const IFD0_OFFSET: u32 = 8;
    const GPS_IFD_OFFSET: u32 = IFD0_OFFSET + 2 + 12 + 4;
    let data_offset = GPS_IFD_OFFSET + 2 + 12 * entries.len() as u32 + 4;

    let mut out = Vec::new();
    out.extend_from_slice(b"MM");
    out.extend_from_slice(&42u16.to_be_bytes());
    out.extend_from_slice(&IFD0_OFFSET.to_be_bytes());

    // IFD0: GPSInfo pointer (LONG)
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0x8825u16.to_be_bytes());
    out.extend_from_slice(&4u16.to_be_bytes());
    out.extend_from_slice(&1u32.to_be_bytes());
    out.extend_from_slice(&GPS_IFD_OFFSET.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());

    // GPS IFD
    let mut data = Vec::new();
    out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
    for entry in &entries {
        match entry {
            Entry::Ascii(tag, c) => {
                out.extend_from_slice(&tag.to_be_bytes());
                out.extend_from_slice(&2u16.to_be_bytes());
                out.extend_from_slice(&2u32.to_be_bytes());
                out.extend_from_slice(&[*c as u8, 0, 0, 0]);
            }
            Entry::Rationals(tag, (d, m, s)) => {
                out.extend_from_slice(&tag.to_be_bytes());
                out.extend_from_slice(&5u16.to_be_bytes());
                out.extend_from_slice(&3u32.to_be_bytes());
                out.extend_from_slice(&(data_offset + data.len() as u32).to_be_bytes());
                for v in [d, m, s] {
                    let numerator = (v * RATIONAL_DENOMINATOR as f64).round() as u32;
                    data.extend_from_slice(&numerator.to_be_bytes());
                    data.extend_from_slice(&RATIONAL_DENOMINATOR.to_be_bytes());
                }
            }
        }
    }
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&data);
    out
}
