//! Code values produced by the generator.

use std::fmt;

/// Numeric code delivered by email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailCode(u32);

impl EmailCode {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmailCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rendered image captcha
///
/// `image_base64` goes back to the requester unchanged. `answer` is the
/// secret kept server side; it is redacted from `Debug` output.
#[derive(Clone)]
pub struct ImageCode {
    pub image_base64: String,
    answer: String,
}

impl ImageCode {
    pub fn new(image_base64: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            image_base64: image_base64.into(),
            answer: answer.into(),
        }
    }

    /// The ground-truth answer
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Split into (image payload, answer)
    pub fn into_parts(self) -> (String, String) {
        (self.image_base64, self.answer)
    }
}

impl fmt::Debug for ImageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCode")
            .field("image_base64_len", &self.image_base64.len())
            .field("answer", &"<redacted>")
            .finish()
    }
}

/// Canonical form used when comparing stored and presented codes:
/// surrounding whitespace removed, letters uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
