//! Screenshot capture: dumps the current RGB24 frame to a PNG file.

use std::fs::File;
use std::io::BufWriter;

pub fn save_png(path: &std::path::Path, rgb: &[u8], width: u32, height: u32) -> std::io::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| std::io::Error::other(format!("PNG header: {e}")))?;
    writer
        .write_image_data(rgb)
        .map_err(|e| std::io::Error::other(format!("PNG write: {e}")))?;
    Ok(())
}
