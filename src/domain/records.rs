// Raw records returned by the panel endpoints
use serde::Deserialize;
use std::fmt;

/// A post author id. JSONPlaceholder sends numbers, but strings are accepted.
/// A string in canonical integer form (`"1"`, not `"01"`) is the same id as
/// the number.
///
/// Ordering puts numeric ids first (numerically), then string ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "RawUserId")]
pub enum UserId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Number(n) => UserId::Number(n),
            RawUserId::Text(s) => match s.parse::<i64>() {
                Ok(n) if n.to_string() == s => UserId::Number(n),
                _ => UserId::Text(s),
            },
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// One post from the posts endpoint. Only the author is read.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// One coin from the markets endpoint. CoinGecko sends a `null` price for
/// coins it has no quote for.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinRecord {
    pub name: String,
    pub current_price: Option<f64>,
}
