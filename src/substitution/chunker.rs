// @module: Translation reflow for the non-wrapping renderer

/// Manual line-break marker understood by the game's renderer
pub const LINE_BREAK_MARKER: &str = "/r";

/// Default segment width in characters
pub const DEFAULT_CHUNK_WIDTH: usize = 24;

/// Split a translation into segments of at most `width` characters joined by
/// the line-break marker. Author-placed markers are kept and each segment
/// between them is reflowed on its own.
pub fn chunk_translation(translation: &str, width: usize) -> String {
    if translation.contains(LINE_BREAK_MARKER) {
        return translation
            .split(LINE_BREAK_MARKER)
            .map(|segment| chunk_translation(segment, width))
            .collect::<Vec<_>>()
            .join(LINE_BREAK_MARKER);
    }

    let width = width.max(1);
    let chars: Vec<char> = translation.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(LINE_BREAK_MARKER)
}
