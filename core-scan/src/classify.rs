//! Audio File Classification
//!
//! A file is audio when its declared media type starts with `audio/`, or,
//! independently as a fallback for sources that declare none, when its name
//! carries one of the recognized audio extensions. The extension match is
//! case-insensitive; real filesystems yield mixed-case extensions.

/// Media-type prefix identifying an audio payload.
pub const AUDIO_MEDIA_TYPE_PREFIX: &str = "audio/";

/// Recognized audio file extensions for the name-based fallback.
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".ogg", ".wav", ".flac", ".aac"];

/// Classify a file as audio from its display name and declared media type,
/// using the default prefix and extension list.
pub fn is_audio_file(name: &str, media_type: Option<&str>) -> bool {
    is_audio_file_with(name, media_type, AUDIO_MEDIA_TYPE_PREFIX, AUDIO_EXTENSIONS)
}

/// Classify against a caller-supplied media-type prefix and extension list.
///
/// The extension match is case-insensitive on the file name; the supplied
/// extensions are expected to be lowercase and dot-prefixed.
pub fn is_audio_file_with<S: AsRef<str>>(
    name: &str,
    media_type: Option<&str>,
    media_type_prefix: &str,
    extensions: &[S],
) -> bool {
    if let Some(media_type) = media_type {
        if media_type.starts_with(media_type_prefix) {
            return true;
        }
    }

    let lowered = name.to_lowercase();
    extensions.iter().any(|ext| lowered.ends_with(ext.as_ref()))
}
