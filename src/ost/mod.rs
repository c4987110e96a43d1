pub mod actions;
pub mod client;
pub mod converters;
pub mod transactions;
pub mod types;
pub mod users;

use crate::core::errors::OstError;
use crate::core::kernel::Params;
use crate::core::types::ListParams;

pub use actions::Actions;
pub use client::{OstClient, OstClientBuilder};
pub use transactions::Transactions;
pub use users::Users;

/// Form-url-encode a free-text parameter value before it is signed
pub fn encode_text(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Reject an id or enum value that would change the path, query or form body
///
/// Such values are sent unencoded and signed as-is, so any reserved
/// character would alter the parameter set the backend reconstructs.
pub(crate) fn validate_id(field: &str, id: &str) -> Result<(), OstError> {
    if id.is_empty()
        || id.contains(&['/', '?', '#', '&', '=', '+', '%'][..])
        || id.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(OstError::InvalidParameters(format!(
            "invalid {} {:?}",
            field, id
        )));
    }
    Ok(())
}

/// `<collection>/<id>` for a validated id
pub(crate) fn entity_path(collection: &str, id: &str) -> Result<String, OstError> {
    validate_id("id", id)?;
    Ok(format!("{}/{}", collection, id))
}

pub(crate) fn list_params(params: &ListParams, with_order_by: bool) -> Params {
    let mut out = Params::new();
    out.insert("page_no".to_string(), params.page_no.to_string());
    out.insert("limit".to_string(), params.limit.to_string());
    out.insert("order".to_string(), params.order.as_str().to_string());
    if with_order_by {
        out.insert("order_by".to_string(), params.order_by.as_str().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Order, OrderBy};

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("Alice"), "Alice");
        assert_eq!(encode_text("Alice Smith"), "Alice+Smith");
        assert_eq!(encode_text("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("action_id", "a1").is_ok());
        assert!(validate_id("action_id", "0x5fA3-b_7").is_ok());
        for bad in ["", "u1&amount=1000", "u1=2", "a+b", "a%26b", "u1\n", "u/1"] {
            assert!(
                matches!(
                    validate_id("from_user_id", bad),
                    Err(OstError::InvalidParameters(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_entity_path() {
        assert_eq!(entity_path("/users", "u1").unwrap(), "/users/u1");
        assert!(entity_path("/users", "").is_err());
        assert!(entity_path("/users", "../admin").is_err());
        assert!(entity_path("/users", "u1?x=1").is_err());
        assert!(entity_path("/users", "u 1").is_err());
    }

    #[test]
    fn test_list_params() {
        let params = ListParams::default()
            .page(2)
            .limit(100)
            .order_by(OrderBy::Name)
            .order(Order::Asc);
        let with = list_params(&params, true);
        assert_eq!(with["page_no"], "2");
        assert_eq!(with["limit"], "100");
        assert_eq!(with["order_by"], "name");
        assert_eq!(with["order"], "asc");

        let without = list_params(&params, false);
        assert!(!without.contains_key("order_by"));
    }
}
