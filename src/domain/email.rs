#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(s: String) -> Result<Self, String> {
        let s = s.trim().to_string();

        if s.is_empty() {
            return Err("email address is empty".into());
        }

        if validator::validate_email(s.as_str()) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid email address"))
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
