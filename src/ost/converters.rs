use super::types::{self as ost_types, WireNumber};
use crate::core::kernel::response::json_kind;
use crate::core::types::{Action, Address, Transaction, User};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;

fn parse_i64(field: &str, raw: &WireNumber) -> Result<i64, String> {
    let text = raw.as_text();
    text.parse::<i64>()
        .map_err(|e| format!("`{}` is not an integer ({:?}): {}", field, text, e))
}

fn parse_decimal(field: &str, raw: &WireNumber) -> Result<Decimal, String> {
    let text = raw.as_text();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| format!("`{}` is not a decimal ({:?}): {}", field, text, e))
}

fn optional<T>(
    field: &str,
    raw: Option<&WireNumber>,
    parse: fn(&str, &WireNumber) -> Result<T, String>,
) -> Result<Option<T>, String> {
    raw.map(|value| parse(field, value)).transpose()
}

fn decode<T: DeserializeOwned>(entity: &str, fragment: Value) -> Result<T, String> {
    if !fragment.is_object() {
        return Err(format!("{} is {}, not an object", entity, json_kind(&fragment)));
    }
    serde_json::from_value(fragment).map_err(|e| format!("invalid {}: {}", entity, e))
}

fn chain_id(raw: &Value) -> Result<u64, String> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("chain id {} is not an unsigned integer", n)),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("chain id {:?} is not an integer: {}", s, e)),
        other => Err(format!("chain id is {}", json_kind(other))),
    }
}

fn address_pair(pair: &[Value]) -> Result<Address, String> {
    match pair {
        [chain, Value::String(address), ..] => Ok(Address {
            chain_id: chain_id(chain)?,
            address: address.clone(),
        }),
        [_, other, ..] => Err(format!("address is {}", json_kind(other))),
        _ => Err(format!("address pair has {} element(s)", pair.len())),
    }
}

/// Convert the `addresses` wire field into the user's single address
///
/// Accepts `[[chain_id, address], ...]` (first pair wins) and a flat
/// `[chain_id, address]`; `null`, a missing field or `[]` mean no address.
pub fn convert_address(raw: Option<&Value>) -> Result<Option<Address>, String> {
    let items = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(format!("addresses is {}", json_kind(other))),
    };

    match items.first() {
        None => Ok(None),
        Some(Value::Array(pair)) => address_pair(pair).map(Some),
        Some(_) => address_pair(items).map(Some),
    }
}

/// Convert OST user to core user type
pub fn convert_ost_user(user: ost_types::OstUser) -> Result<User, String> {
    Ok(User {
        address: convert_address(user.addresses.as_ref())?,
        airdropped_tokens: parse_i64("airdropped_tokens", &user.airdropped_tokens)?,
        token_balance: parse_i64("token_balance", &user.token_balance)?,
        id: user.id,
        name: user.name,
    })
}

/// Convert OST transaction to core transaction type
pub fn convert_ost_transaction(tx: ost_types::OstTransaction) -> Result<Transaction, String> {
    Ok(Transaction {
        timestamp: parse_i64("timestamp", &tx.timestamp)?,
        gas_price: parse_i64("gas_price", &tx.gas_price)?,
        gas_used: optional("gas_used", tx.gas_used.as_ref(), parse_i64)?,
        transaction_fee: optional("transaction_fee", tx.transaction_fee.as_ref(), parse_decimal)?,
        block_number: optional("block_number", tx.block_number.as_ref(), parse_i64)?,
        amount: optional("amount", tx.amount.as_ref(), parse_decimal)?,
        commission_amount: optional(
            "commission_amount",
            tx.commission_amount.as_ref(),
            parse_decimal,
        )?,
        id: tx.id,
        from_user_id: tx.from_user_id,
        to_user_id: tx.to_user_id,
        transaction_hash: tx.transaction_hash,
        action_id: tx.action_id,
        status: tx.status,
    })
}

/// Convert OST action to core action type; absent flags read as `false`
pub fn convert_ost_action(action: ost_types::OstAction) -> Result<Action, String> {
    Ok(Action {
        amount: optional("amount", action.amount.as_ref(), parse_decimal)?,
        arbitrary_amount: action.arbitrary_amount.unwrap_or(false),
        commission_percent: optional(
            "commission_percent",
            action.commission_percent.as_ref(),
            parse_decimal,
        )?,
        arbitrary_commission: action.arbitrary_commission.unwrap_or(false),
        id: action.id,
        name: action.name,
        kind: action.kind,
        currency: action.currency,
    })
}

pub fn user_from_json(fragment: Value) -> Result<User, String> {
    decode("user", fragment).and_then(convert_ost_user)
}

pub fn transaction_from_json(fragment: Value) -> Result<Transaction, String> {
    decode("transaction", fragment).and_then(convert_ost_transaction)
}

pub fn action_from_json(fragment: Value) -> Result<Action, String> {
    decode("action", fragment).and_then(convert_ost_action)
}

/// Map every element of a JSON array with `convert`, failing on the first bad one
pub fn list_from_json<T>(
    fragment: Value,
    convert: fn(Value) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    match fragment {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| convert(item).map_err(|e| format!("[{}]: {}", index, e)))
            .collect(),
        other => Err(format!("expected an array, got {}", json_kind(&other))),
    }
}
