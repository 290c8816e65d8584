const MAX_LENGTH: usize = 64;

/// How to reach the visitor by phone, as they typed it ("07700 900000 ext 12",
/// "evenings only: ..."). Only checked for presence and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPhone(String);

impl ContactPhone {
    pub fn parse(s: String) -> Result<Self, String> {
        let s = s.trim().to_string();

        if s.is_empty() {
            return Err("phone number is empty".into());
        }

        if s.chars().count() > MAX_LENGTH {
            return Err(format!("phone number is longer than {MAX_LENGTH} characters"));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for ContactPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
