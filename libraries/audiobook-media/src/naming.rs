/// Display name for an uploaded track
///
/// Drops the extension, turns underscores into spaces and strips a leading
/// track number together with the separator after it, so that
/// `"01 - Prologue.mp3"` and `"02._The_Storm.mp3"` become `"Prologue"` and
/// `"The Storm"`.
pub fn track_name_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() && !file_name[dot..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    };

    let spaced = stem.replace('_', " ");

    let rest = spaced.trim_start_matches(|c: char| c.is_ascii_digit());
    let name = if rest.len() < spaced.len() {
        rest.trim_start_matches(|c: char| c == '-' || c == '.' || c.is_whitespace())
    } else {
        spaced.as_str()
    };

    name.trim().to_string()
}
