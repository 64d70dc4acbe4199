//! Path utilities for image files and archive entries.
//!
//! Every image written by cardforged is a JPEG, and archive entries are
//! compared by their extension-less basename.

/// Extension used for every downloaded image.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Append the image extension to a bare file stem.
///
/// # Examples
///
/// ```
/// use cardforged_common::paths::with_image_extension;
///
/// assert_eq!(with_image_extension("Damnation [MH2] {85}"), "Damnation [MH2] {85}.jpg");
/// ```
pub fn with_image_extension(stem: &str) -> String {
    format!("{stem}.{IMAGE_EXTENSION}")
}

/// Basename of an archive entry with directories and extension removed.
///
/// Archive entry names always use `/` as separator regardless of platform.
///
/// # Examples
///
/// ```
/// use cardforged_common::paths::entry_stem;
///
/// assert_eq!(entry_stem("normal/Damnation [MH2] {85}.jpg"), "Damnation [MH2] {85}");
/// assert_eq!(entry_stem("README"), "README");
/// ```
pub fn entry_stem(entry: &str) -> &str {
    let base = entry.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(entry);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}

/// Last path segment of a URL-ish path (`pics/art_th/mh2/085.jpg` -> `085.jpg`).
pub fn url_basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last `/` of a URL-ish path, or `""` when there is none.
pub fn url_dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
