// Transformers - Raw endpoint payloads to bar chart data
use crate::domain::chart::ChartData;
use crate::domain::error::LoadError;
use crate::domain::panel::PanelKind;
use crate::domain::records::{CoinRecord, PostRecord, UserId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Decode a payload for `kind` and reduce it to chart data.
///
/// `null` counts as no data. Anything other than an array of the panel's
/// records is a payload error.
pub fn transform(kind: PanelKind, payload: Value) -> Result<ChartData, LoadError> {
    match kind {
        PanelKind::Posts => decode_records::<PostRecord>(payload).map(|posts| posts_per_user(&posts)),
        PanelKind::Market => decode_records::<CoinRecord>(payload).map(|coins| price_per_coin(&coins)),
    }
}

fn decode_records<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, LoadError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        array @ Value::Array(_) => {
            serde_json::from_value(array).map_err(|e| LoadError::Payload(e.to_string()))
        }
        other => Err(LoadError::Payload(format!(
            "expected a JSON array, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Count posts per author, labelled by author id in ascending order.
pub fn posts_per_user(posts: &[PostRecord]) -> ChartData {
    let mut counts: BTreeMap<&UserId, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(&post.user_id).or_insert(0) += 1;
    }

    ChartData::from_pairs(
        counts
            .into_iter()
            .map(|(user_id, count)| (user_id.to_string(), count as f64)),
    )
}

/// Coin names against their current price, in input order.
pub fn price_per_coin(coins: &[CoinRecord]) -> ChartData {
    ChartData::from_pairs(
        coins
            .iter()
            .map(|coin| (coin.name.clone(), coin.current_price)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts(ids: &[i64]) -> Vec<PostRecord> {
        ids.iter()
            .map(|&id| PostRecord {
                user_id: UserId::Number(id),
            })
            .collect()
    }

    #[test]
    fn test_posts_grouped_by_user() {
        let data = transform(
            PanelKind::Posts,
            json!([{ "userId": 1 }, { "userId": 1 }, { "userId": 2 }]),
        )
        .unwrap();

        assert_eq!(data.labels(), ["1", "2"]);
        assert_eq!(data.values(), [Some(2.0), Some(1.0)]);
    }

    #[test]
    fn test_posts_counts_sum_to_input_len() {
        let input = posts(&[7, 3, 3, 10, 1, 7, 7, 2, 10, 3, 3]);
        let data = posts_per_user(&input);

        assert_eq!(data.labels().len(), data.values().len());
        assert_eq!(data.values().iter().flatten().sum::<f64>() as usize, input.len());
        assert_eq!(data.labels(), ["1", "2", "3", "7", "10"]);
        assert_eq!(data.values(), [Some(1.0), Some(1.0), Some(4.0), Some(3.0), Some(2.0)]);
    }

    #[test]
    fn test_posts_order_independent_of_input_order() {
        let forward = posts_per_user(&posts(&[1, 2, 3, 2]));
        let backward = posts_per_user(&posts(&[2, 3, 2, 1]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_market_keeps_input_order() {
        let data = transform(
            PanelKind::Market,
            json!([
                { "name": "Bitcoin", "current_price": 50000, "symbol": "btc" },
                { "name": "Ethereum", "current_price": 3012.55 },
                { "name": "Tether", "current_price": 1.0 }
            ]),
        )
        .unwrap();

        assert_eq!(data.labels(), ["Bitcoin", "Ethereum", "Tether"]);
        assert_eq!(data.values(), [Some(50000.0), Some(3012.55), Some(1.0)]);
    }

    #[test]
    fn test_single_coin() {
        let data = transform(
            PanelKind::Market,
            json!([{ "name": "Bitcoin", "current_price": 50000 }]),
        )
        .unwrap();
        assert_eq!(data.labels(), ["Bitcoin"]);
        assert_eq!(data.values(), [Some(50000.0)]);
    }

    #[test]
    fn test_unpriced_coin_keeps_its_bar_slot() {
        let data = transform(
            PanelKind::Market,
            json!([
                { "name": "Bitcoin", "current_price": 50000 },
                { "name": "NewCoin", "current_price": null }
            ]),
        )
        .unwrap();
        assert_eq!(data.labels(), ["Bitcoin", "NewCoin"]);
        assert_eq!(data.values(), [Some(50000.0), None]);
    }

    #[test]
    fn test_numeric_and_string_ids_share_a_group() {
        let data = transform(
            PanelKind::Posts,
            json!([{ "userId": 1 }, { "userId": "1" }, { "userId": "01" }]),
        )
        .unwrap();
        assert_eq!(data.labels(), ["1", "01"]);
        assert_eq!(data.values(), [Some(2.0), Some(1.0)]);
    }

    #[test]
    fn test_empty_and_null_payloads() {
        for kind in [PanelKind::Posts, PanelKind::Market] {
            assert_eq!(transform(kind, json!([])).unwrap(), ChartData::default());
            assert_eq!(transform(kind, Value::Null).unwrap(), ChartData::default());
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        let payload = json!([{ "userId": 4 }, { "userId": "x" }, { "userId": 4 }]);
        let first = transform(PanelKind::Posts, payload.clone()).unwrap();
        let second = transform(PanelKind::Posts, payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.labels(), ["4", "x"]);
    }

    #[test]
    fn test_wrong_shape_is_payload_error() {
        let err = transform(PanelKind::Market, json!({ "status": { "error_code": 429 } }))
            .unwrap_err();
        assert_eq!(err, LoadError::Payload("expected a JSON array, got object".to_string()));

        let err = transform(PanelKind::Posts, json!([{ "id": 1 }])).unwrap_err();
        assert_eq!(err.kind(), "payload");
    }
}
