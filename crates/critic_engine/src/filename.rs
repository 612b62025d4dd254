const MAX_TITLE_CHARS: usize = 80;

/// Export file name: `{prefix}_{sanitized_title}_{millis}.{extension}`.
pub fn export_filename(
    prefix: &str,
    title: Option<&str>,
    fallback: &str,
    millis: i64,
    extension: &str,
) -> String {
    let title = sanitize_title(title.unwrap_or(fallback), fallback);
    format!("{prefix}_{title}_{millis}.{extension}")
}

/// File extension for an image MIME type; unknown types are saved as JPEG.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "jpg",
    }
}

fn sanitize_title(input: &str, fallback: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.trim_matches(&['_', ' ', '.'][..]).chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let truncated: String = compacted.chars().take(MAX_TITLE_CHARS).collect();
    let truncated = truncated.trim_end().to_string();
    if truncated.is_empty() {
        fallback.to_string()
    } else {
        truncated
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_spaces_and_unicode() {
        assert_eq!(
            export_filename("artl_analysis", Some("Nighthawks 夜鷹"), "artwork", 42, "png"),
            "artl_analysis_Nighthawks 夜鷹_42.png"
        );
    }

    #[test]
    fn path_separators_never_survive() {
        let name = export_filename("artl_artwork", Some("../../etc/passwd"), "artwork", 1, "jpg");
        assert_eq!(name, "artl_artwork_etc_passwd_1.jpg");
    }

    #[test]
    fn missing_or_blank_title_uses_fallback() {
        assert_eq!(export_filename("p", None, "artwork", 7, "png"), "p_artwork_7.png");
        assert_eq!(export_filename("p", Some(" ?? "), "artwork", 7, "png"), "p_artwork_7.png");
    }

    #[test]
    fn long_titles_truncate_on_char_boundary() {
        let title = "畫".repeat(100);
        let name = sanitize_title(&title, "artwork");
        assert_eq!(name.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn mime_types_map_to_extensions() {
        assert_eq!(extension_for_mime("image/PNG"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("application/octet-stream"), "jpg");
    }
}
