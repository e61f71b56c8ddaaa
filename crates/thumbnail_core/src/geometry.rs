use std::path::Path;

/// Height that keeps the source aspect ratio at `target_width`.
///
/// Computes `round(target_width * height / width)`, clamped to at least one
/// pixel. A zero-width source yields the source height unchanged.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return height.max(1);
    }
    let scaled = (u64::from(target_width) * u64::from(height)) as f64 / f64::from(width);
    let rounded = scaled.round();
    if rounded < 1.0 {
        1
    } else if rounded > f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// `<stem>_<width><ext>`, e.g. `a.jpg` at 32 becomes `a_32.jpg`.
pub fn thumbnail_filename(filename: &str, width: u32) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{width}.{ext}"),
        None => format!("{stem}_{width}"),
    }
}
