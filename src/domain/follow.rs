use serde::{Deserialize, Serialize};

/// A follower/followee pair. The pair itself is the identity; there is no
/// surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: i64,
    pub followee_id: i64,
}
