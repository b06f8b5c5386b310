pub const DEFAULT_SUBJECT: &str = "Algemeen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

impl ContactSubject {
    /// An absent or empty subject falls back to [`DEFAULT_SUBJECT`].
    pub fn parse(s: Option<String>) -> ContactSubject {
        match s {
            Some(subject) if !subject.is_empty() => Self(subject),
            _ => Self(DEFAULT_SUBJECT.to_string()),
        }
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
