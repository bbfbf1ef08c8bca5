//! Header terminator detection and `Content-Length` extraction.
//!
//! Every accepted terminator spelling goes through [`find_terminator`]; the
//! rest of the framer only ever sees a start offset and a length.

use super::FramingError;

/// Header bytes accepted before a terminator must have been seen.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 4096;

const FIELD_NAME: &[u8] = b"content-length";

/// Spelling of the blank line that ends a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminatorKind {
    /// `\r\n\r\n`, the canonical form.
    CrLf,
    /// `\n\n`, sent by hosts that write bare line feeds.
    Lf,
    /// The eight literal characters `\r\n\r\n`, from hosts that escape their
    /// header text twice.
    #[cfg(feature = "escaped-header-compat")]
    EscapedLiteral,
}

impl TerminatorKind {
    /// Every terminator the framer accepts.
    pub const ALL: &'static [TerminatorKind] = &[
        TerminatorKind::CrLf,
        TerminatorKind::Lf,
        #[cfg(feature = "escaped-header-compat")]
        TerminatorKind::EscapedLiteral,
    ];

    /// Bytes that make up this terminator on the wire.
    pub fn pattern(self) -> &'static [u8] {
        match self {
            TerminatorKind::CrLf => b"\r\n\r\n",
            TerminatorKind::Lf => b"\n\n",
            #[cfg(feature = "escaped-header-compat")]
            TerminatorKind::EscapedLiteral => br"\r\n\r\n",
        }
    }
}

/// Location of a header terminator within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminator {
    /// Which spelling matched.
    pub kind: TerminatorKind,
    /// Offset of the first terminator byte; also the header length.
    pub start: usize,
}

impl Terminator {
    /// Offset of the first body byte.
    pub fn end(&self) -> usize {
        self.start + self.kind.pattern().len()
    }
}

/// Find the terminator that completes first in `buf`.
///
/// "First" means the smallest end offset, which is the terminator a reader
/// consuming one byte at a time would have stopped on.
pub fn find_terminator(buf: &[u8]) -> Option<Terminator> {
    TerminatorKind::ALL
        .iter()
        .filter_map(|&kind| {
            find_subslice(buf, kind.pattern()).map(|start| Terminator { kind, start })
        })
        .min_by_key(Terminator::end)
}

/// Extract the `Content-Length` value from raw header bytes.
///
/// The field name is matched case-insensitively. After it, a colon and any
/// spaces or tabs are skipped and the first run of ASCII digits is taken;
/// whatever follows the digits is ignored. Occurrences at the start of a
/// line are tried first, so a longer field such as `X-Content-Length-Hint`
/// never shadows the real one.
pub fn parse_content_length(header: &[u8]) -> Result<usize, FramingError> {
    let positions = find_all_ignore_case(header, FIELD_NAME);
    let (anchored, embedded): (Vec<usize>, Vec<usize>) = positions
        .into_iter()
        .partition(|&at| starts_line(header, at));

    for at in anchored.into_iter().chain(embedded) {
        if let Some(digits) = value_digits(&header[at + FIELD_NAME.len()..]) {
            let text = String::from_utf8_lossy(digits);
            return text
                .parse::<usize>()
                .map_err(|_| FramingError::InvalidLength(text.into_owned()));
        }
    }
    Err(FramingError::MissingLength)
}

/// Digits of a field value: separators skipped, then the first digit run.
fn value_digits(rest: &[u8]) -> Option<&[u8]> {
    let value_at = rest
        .iter()
        .position(|b| !matches!(b, b':' | b' ' | b'\t'))?;
    let value = &rest[value_at..];
    let digits = value.iter().take_while(|b| b.is_ascii_digit()).count();
    (digits > 0).then(|| &value[..digits])
}

/// Whether `at` begins a header line, including after an escaped `\n`.
fn starts_line(header: &[u8], at: usize) -> bool {
    at == 0 || header[at - 1] == b'\n' || header[..at].ends_with(br"\n")
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn find_all_ignore_case(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| window.eq_ignore_ascii_case(needle))
        .map(|(at, _)| at)
        .collect()
}
