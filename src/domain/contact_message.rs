use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 5000;

/// Free-form enquiry text. Line breaks are kept as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("message is empty".into());
        }

        if s.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!("message is longer than {MAX_GRAPHEMES} characters"));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
