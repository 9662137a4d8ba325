use crate::models::AnonymousSession;

/// Ceiling on assistant replies per anonymous session. The counter only grows;
/// there is no window or decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaGuard {
    limit: i32,
}

impl QuotaGuard {
    pub fn new(limit: i32) -> Self {
        Self {
            limit: limit.max(0),
        }
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    pub fn allows(&self, session: &AnonymousSession) -> bool {
        session.message_count < self.limit
    }

    pub fn remaining(&self, session: &AnonymousSession) -> i32 {
        (self.limit - session.message_count).max(0)
    }
}
