use std::borrow::Cow;

use icu::normalizer::ComposingNormalizer;

use super::Normalizer;

/// Unicode Normalization Form C, using the rules specified in [Character
/// Model for the World Wide Web 1.0:
/// Normalization](https://www.w3.org/TR/xslt-xquery-serialization/#charmod-norm).
pub struct Nfc {
    normalizer: ComposingNormalizer,
}

impl Nfc {
    /// Create an NFC normalizer from the compiled Unicode data.
    pub fn new() -> Self {
        Nfc {
            normalizer: ComposingNormalizer::new_nfc(),
        }
    }
}

impl Default for Nfc {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for Nfc {
    fn normalize<'a>(&self, content: Cow<'a, str>) -> Cow<'a, str> {
        if self.normalizer.is_normalized(&content) {
            content
        } else {
            self.normalizer.normalize(&content).into()
        }
    }
}
