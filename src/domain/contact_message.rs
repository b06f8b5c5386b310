pub const MIN_MESSAGE_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Counts characters as written, whitespace included.
    pub fn parse(s: String) -> Result<ContactMessage, String> {
        let length = s.chars().count();
        if length < MIN_MESSAGE_LENGTH {
            Err(format!(
                "A message of {} characters is shorter than the minimum of {}.",
                length, MIN_MESSAGE_LENGTH
            ))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
