//! Grapheme clustering over UTF-16 text.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClusterKind {
    Glyph,
    Tab,
    Space,
    Newline,
}

/// One caret stop: an extended grapheme cluster (`\r\n` is a single cluster).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cluster {
    pub(crate) start: u32,
    pub(crate) len: u32,
    pub(crate) kind: ClusterKind,
    pub(crate) can_wrap_after: bool,
}

impl Cluster {
    #[inline]
    pub(crate) fn end(&self) -> u32 {
        self.start + self.len
    }

    #[inline]
    pub(crate) fn is_whitespace(&self) -> bool {
        matches!(
            self.kind,
            ClusterKind::Space | ClusterKind::Tab | ClusterKind::Newline
        )
    }
}

fn is_newline_char(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn classify(g: &str) -> ClusterKind {
    if g.chars().any(is_newline_char) {
        ClusterKind::Newline
    } else if g == "\t" {
        ClusterKind::Tab
    } else if g.chars().all(char::is_whitespace) {
        ClusterKind::Space
    } else {
        ClusterKind::Glyph
    }
}

/// Decode `text` (unpaired surrogates become U+FFFD, still one code unit) and
/// split it into clusters.
pub(crate) fn segment_clusters(text: &[u16]) -> Vec<Cluster> {
    let decoded: String = char::decode_utf16(text.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();

    let mut clusters = Vec::new();
    let mut unit = 0u32;
    for g in decoded.graphemes(true) {
        let len: u32 = g.chars().map(|c| c.len_utf16() as u32).sum();
        let kind = classify(g);
        clusters.push(Cluster {
            start: unit,
            len,
            kind,
            can_wrap_after: kind != ClusterKind::Glyph || g == "-",
        });
        unit += len;
    }

    if let Some(last) = clusters.last_mut() {
        last.can_wrap_after = true;
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn crlf_is_one_cluster() {
        let clusters = segment_clusters(&utf16("a\r\nb"));
        let spans: Vec<(u32, u32)> = clusters.iter().map(|c| (c.start, c.len)).collect();
        assert_eq!(spans, vec![(0, 1), (1, 2), (3, 1)]);
        assert_eq!(clusters[1].kind, ClusterKind::Newline);
    }

    #[test]
    fn astral_character_spans_two_units() {
        let clusters = segment_clusters(&utf16("x\u{1F600}y"));
        let spans: Vec<(u32, u32)> = clusters.iter().map(|c| (c.start, c.len)).collect();
        assert_eq!(spans, vec![(0, 1), (1, 2), (3, 1)]);
    }

    #[test]
    fn combining_mark_joins_its_base() {
        let clusters = segment_clusters(&utf16("e\u{0301}x"));
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len, 2);
    }

    #[test]
    fn lone_surrogate_keeps_unit_count() {
        let clusters = segment_clusters(&[0x61, 0xD800, 0x62]);
        let total: u32 = clusters.iter().map(|c| c.len).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn wrap_opportunities_follow_whitespace_and_end() {
        let clusters = segment_clusters(&utf16("ab cd"));
        let wraps: Vec<bool> = clusters.iter().map(|c| c.can_wrap_after).collect();
        assert_eq!(wraps, vec![false, false, true, false, true]);
    }
}
