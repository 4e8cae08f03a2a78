//! Removal of large non-lyric sections before the text is split into lines.
//!
//! Lyrics pages carry credit and translation/romanization sections whose
//! individual lines may still contain kana. A section starts at its header
//! and runs up to the line break before the next line holding Japanese
//! script; with no such line it runs to the end of the document.

use crate::services::script;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHeader {
    Contributors,
    Translations,
    Romanization,
}

/// Application order used by the normalizer.
pub const HEADERS: [BlockHeader; 3] = [
    BlockHeader::Contributors,
    BlockHeader::Translations,
    BlockHeader::Romanization,
];

impl BlockHeader {
    pub fn marker(self) -> &'static str {
        match self {
            BlockHeader::Contributors => "Contributors",
            BlockHeader::Translations => "Translations",
            BlockHeader::Romanization => "Romanization",
        }
    }
}

/// Removes every block introduced by `header`.
pub fn strip(text: &str, header: BlockHeader) -> String {
    let marker = header.marker();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(marker) {
        out.push_str(&rest[..start]);
        let span = &rest[start..];
        rest = match span_end(span) {
            Some(end) => &span[end..],
            None => "",
        };
    }

    out.push_str(rest);
    out
}

/// Strips all header kinds in [`HEADERS`] order.
pub fn strip_all(text: &str) -> String {
    HEADERS
        .iter()
        .fold(text.to_string(), |acc, &header| strip(&acc, header))
}

/// Byte offset of the line break that precedes the first following line
/// containing Japanese script. The header's own line is never inspected.
fn span_end(span: &str) -> Option<usize> {
    let mut newline = span.find('\n')?;

    loop {
        let line_start = newline + 1;
        let next = span[line_start..].find('\n').map(|i| line_start + i);
        let line = &span[line_start..next.unwrap_or(span.len())];

        if script::contains_japanese(line) {
            return Some(newline);
        }

        newline = next?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_header_up_to_next_japanese_line() {
        let doc = "Contributors\nfoo bar\n夢ならば\n123";
        assert_eq!(strip(doc, BlockHeader::Contributors), "\n夢ならば\n123");
    }

    #[test]
    fn header_mid_line_starts_the_span() {
        let doc = "12 Contributors Lemon Lyrics\n夢ならば";
        assert_eq!(strip(doc, BlockHeader::Contributors), "12 \n夢ならば");
    }

    #[test]
    fn japanese_on_the_header_line_does_not_end_the_span() {
        let doc = "Translations日本語 English\nsome text\nまだ見てる";
        assert_eq!(strip(doc, BlockHeader::Translations), "\nまだ見てる");
    }

    #[test]
    fn kanji_only_line_ends_the_span() {
        let doc = "Romanization\nyume naraba\n未来\nmirai";
        assert_eq!(strip(doc, BlockHeader::Romanization), "\n未来\nmirai");
    }

    #[test]
    fn no_following_japanese_drops_the_rest() {
        let doc = "夢ならば\nRomanization\nyume naraba\ndore hodo";
        assert_eq!(strip(doc, BlockHeader::Romanization), "夢ならば\n");

        let doc = "夢ならば\nContributors";
        assert_eq!(strip(doc, BlockHeader::Contributors), "夢ならば\n");
    }

    #[test]
    fn every_occurrence_is_removed() {
        let doc = "Translations\nA\n夢\nTranslations\nB\n愛";
        assert_eq!(strip(doc, BlockHeader::Translations), "\n夢\n\n愛");
    }

    #[test]
    fn absent_header_is_a_no_op() {
        let doc = "夢ならば\nまだ見てる";
        assert_eq!(strip_all(doc), doc);
    }

    #[test]
    fn marker_is_case_sensitive() {
        let doc = "contributors\n夢";
        assert_eq!(strip(doc, BlockHeader::Contributors), doc);
    }

    #[test]
    fn strip_all_handles_each_kind() {
        let doc = "5 Contributors\nx\n夢ならば\nTranslations\nEnglish\n한국어\nまだ見てる\nRomanization\nmada miteru";
        assert_eq!(strip_all(doc), "5 \n夢ならば\n\nまだ見てる\n");
    }
}
