//! Test fixtures: encoded images and spooled upload files.

use std::io::Cursor;
use std::path::Path;

use folio_core::UploadedFile;
use image::{ImageFormat, Rgb, RgbImage};

/// A small, fully decodable PNG.
pub fn create_test_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

pub fn create_test_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(6, 4, Rgb([40, 90, 160]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode test image");
    buf.into_inner()
}

/// Write `data` where the multipart layer would have spooled it.
pub fn spool_upload(dir: &Path, original_name: &str, mime_type: &str, data: &[u8]) -> UploadedFile {
    let path = dir.join(format!("upload-{}", uuid::Uuid::new_v4()));
    std::fs::write(&path, data).expect("write spooled upload");
    UploadedFile::new(path, original_name, mime_type)
}
