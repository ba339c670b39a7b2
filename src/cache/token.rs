
/// Bearer token as held by [`TokenManager`](crate::cache::token_manager::TokenManager)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: i64, // UNIX TIMESTAMP
}

impl AccessToken {
    pub fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// A token expiring exactly at `now` is already unusable
    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.expires_at
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}
