use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(s: String) -> Result<Self, String> {
        let s = s.trim().to_string();

        if s.is_empty() {
            return Err("name is empty".into());
        }

        if s.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!("name is longer than {MAX_GRAPHEMES} characters"));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
