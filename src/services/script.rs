//! Character script classes used by the lyrics filters and the tokenizer.

pub const HIRAGANA: std::ops::RangeInclusive<char> = '\u{3040}'..='\u{309F}';
pub const KATAKANA: std::ops::RangeInclusive<char> = '\u{30A0}'..='\u{30FF}';
pub const KANJI: std::ops::RangeInclusive<char> = '\u{4E00}'..='\u{9FAF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hiragana,
    Katakana,
    Kanji,
    Latin,
    Digit,
    Whitespace,
    Symbol,
}

impl Script {
    pub fn of(ch: char) -> Self {
        if HIRAGANA.contains(&ch) {
            Script::Hiragana
        } else if KATAKANA.contains(&ch) {
            Script::Katakana
        } else if KANJI.contains(&ch) {
            Script::Kanji
        } else if ch.is_whitespace() {
            Script::Whitespace
        } else if ch.is_ascii_digit() || ('０'..='９').contains(&ch) {
            Script::Digit
        } else if ch.is_alphabetic() {
            Script::Latin
        } else {
            Script::Symbol
        }
    }

    pub fn is_japanese(self) -> bool {
        matches!(self, Script::Hiragana | Script::Katakana | Script::Kanji)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Script::Hiragana => "hiragana",
            Script::Katakana => "katakana",
            Script::Kanji => "kanji",
            Script::Latin => "latin",
            Script::Digit => "number",
            Script::Whitespace => "space",
            Script::Symbol => "symbol",
        }
    }
}

pub fn is_japanese(ch: char) -> bool {
    Script::of(ch).is_japanese()
}

pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese)
}

/// Hiragana shifted into the katakana block; everything else passes through.
pub fn to_katakana(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}' => {
                char::from_u32(ch as u32 + 0x60).unwrap_or(ch)
            }
            _ => ch,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_edges_are_japanese() {
        for ch in ['\u{3040}', '\u{309F}', '\u{30A0}', '\u{30FF}', '\u{4E00}', '\u{9FAF}'] {
            assert!(is_japanese(ch), "{ch:?} should be japanese");
        }
        for ch in ['\u{303F}', '\u{3100}', '\u{4DFF}', '\u{9FB0}', 'a', '1', '한'] {
            assert!(!is_japanese(ch), "{ch:?} should not be japanese");
        }
    }

    #[test]
    fn classifies_scripts() {
        assert_eq!(Script::of('夢'), Script::Kanji);
        assert_eq!(Script::of('な'), Script::Hiragana);
        assert_eq!(Script::of('ー'), Script::Katakana);
        assert_eq!(Script::of('z'), Script::Latin);
        assert_eq!(Script::of('7'), Script::Digit);
        assert_eq!(Script::of('　'), Script::Whitespace);
        assert_eq!(Script::of('、'), Script::Symbol);
    }

    #[test]
    fn katakana_conversion() {
        assert_eq!(to_katakana("ならば"), "ナラバ");
        assert_eq!(to_katakana("レモン"), "レモン");
        assert_eq!(to_katakana("夢"), "夢");
    }
}
