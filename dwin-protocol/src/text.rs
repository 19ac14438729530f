//! Text payload sources
//!
//! Strings reach the encoder either from RAM (formatted at runtime) or
//! from read-only storage (string tables baked into the firmware image).
//! Both resolve to a byte slice before copying; the variant only records
//! where the text lives.

/// Text to be drawn by the controller
///
/// Bytes are sent as-is. The controller interprets them in its configured
/// font encoding (ASCII or GB2312), so no UTF-8 validation happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSource<'a> {
    /// No text; encodes nothing
    #[default]
    Null,
    /// Text built at runtime
    Runtime(&'a [u8]),
    /// Text from immutable storage
    Static(&'static [u8]),
}

impl<'a> TextSource<'a> {
    /// Raw bytes of the text (empty for [`TextSource::Null`])
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            TextSource::Null => &[],
            TextSource::Runtime(bytes) => bytes,
            TextSource::Static(bytes) => bytes,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True for null and zero-length text
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl<'a> From<&'a str> for TextSource<'a> {
    fn from(text: &'a str) -> Self {
        TextSource::Runtime(text.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for TextSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        TextSource::Runtime(bytes)
    }
}

impl<'a> From<Option<&'a str>> for TextSource<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(TextSource::Null, TextSource::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TITLE: &str = "Main Menu";

    #[test]
    fn test_static_text() {
        let text = TextSource::Static(TITLE.as_bytes());
        assert_eq!(text.len(), 9);
        assert_eq!(text.as_bytes(), b"Main Menu");
    }

    #[test]
    fn test_runtime_text_from_str() {
        let mut buf = heapless::String::<16>::new();
        let _ = buf.push_str("X: 12.5");
        let text = TextSource::from(buf.as_str());

        assert_eq!(text, TextSource::Runtime(b"X: 12.5"));
        assert!(!text.is_empty());
    }

    #[test]
    fn test_null_text() {
        assert!(TextSource::Null.is_empty());
        assert_eq!(TextSource::from(None::<&str>), TextSource::Null);
        assert_eq!(TextSource::default(), TextSource::Null);
    }
}
