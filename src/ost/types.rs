use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Numeric wire field; the backend sends most numbers as JSON strings
///
/// The `Text` form is exact. The `Number` form is read through serde_json's
/// `f64` representation, so a decimal sent as a bare JSON number keeps at
/// most about 17 significant digits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Text(String),
    Number(Number),
}

impl WireNumber {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.trim()),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// Ids arrive as strings in current responses and as integers in older ones
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match WireNumber::deserialize(deserializer)? {
        WireNumber::Text(s) => Ok(s),
        WireNumber::Number(n) => Ok(n.to_string()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OstUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// `[[chain_id, address], ...]`, or a flat `[chain_id, address]`
    #[serde(default)]
    pub addresses: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    pub airdropped_tokens: WireNumber,
    pub token_balance: WireNumber,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OstTransaction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub from_user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub to_user_id: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub action_id: String,
    pub timestamp: WireNumber,
    pub status: String,
    pub gas_price: WireNumber,
    #[serde(default)]
    pub gas_used: Option<WireNumber>,
    #[serde(default)]
    pub transaction_fee: Option<WireNumber>,
    #[serde(default)]
    pub block_number: Option<WireNumber>,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub commission_amount: Option<WireNumber>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OstAction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub kind: String,
    pub currency: String,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub arbitrary_amount: Option<bool>,
    #[serde(default)]
    pub commission_percent: Option<WireNumber>,
    #[serde(default)]
    pub arbitrary_commission: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_number_accepts_both_forms() {
        let text: WireNumber = serde_json::from_value(json!("100")).unwrap();
        let number: WireNumber = serde_json::from_value(json!(100)).unwrap();
        assert_eq!(text.as_text(), "100");
        assert_eq!(number.as_text(), "100");
    }

    #[test]
    fn test_wire_number_rejects_null() {
        assert!(serde_json::from_value::<WireNumber>(Value::Null).is_err());
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let action: OstAction = serde_json::from_value(json!({
            "id": 20145,
            "name": "Like",
            "kind": "user_to_user",
            "currency": "BT"
        }))
        .unwrap();
        assert_eq!(action.id, "20145");
        assert_eq!(action.arbitrary_amount, None);
    }
}
