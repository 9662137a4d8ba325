use crate::db::stats::Totals;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub user_count: i64,
    pub message_count: i64,
    pub pro_users: i64,
    pub anonymous_sessions: i64,
}

impl From<Totals> for Stats {
    fn from(totals: Totals) -> Self {
        Self {
            user_count: totals.user_count,
            message_count: totals.message_count,
            pro_users: totals.pro_users,
            anonymous_sessions: totals.anonymous_sessions,
        }
    }
}
