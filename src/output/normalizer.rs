use std::borrow::Cow;

/// A text normalizer.
///
/// Applied to text and attribute values as they are written. If you enable
/// the `icu` feature, [`Nfc`](crate::output::Nfc) normalizes to Unicode
/// Normalization Form C.
pub trait Normalizer {
    /// Given a piece of text, give back the normalized version.
    fn normalize<'a>(&self, content: Cow<'a, str>) -> Cow<'a, str>;
}

/// A normalizer that does nothing at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl Normalizer for NoopNormalizer {
    #[inline]
    fn normalize<'a>(&self, content: Cow<'a, str>) -> Cow<'a, str> {
        content
    }
}
