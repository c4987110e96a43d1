use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-chain address of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub chain_id: u64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// At most one address per user in this API version
    pub address: Option<Address>,
    pub name: Option<String>,
    pub airdropped_tokens: i64,
    pub token_balance: i64,
}

/// A token transfer executed through an action
///
/// `from_user_id`, `to_user_id` and `action_id` are plain ids; nothing is
/// resolved eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub transaction_hash: Option<String>,
    pub action_id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub status: String,
    pub gas_price: i64,
    pub gas_used: Option<i64>,
    pub transaction_fee: Option<Decimal>,
    pub block_number: Option<i64>,
    pub amount: Option<Decimal>,
    pub commission_amount: Option<Decimal>,
}

impl Transaction {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub name: String,
    /// `user_to_user`, `company_to_user` or `user_to_company`
    pub kind: String,
    /// `USD` or `BT`
    pub currency: String,
    pub amount: Option<Decimal>,
    pub arbitrary_amount: bool,
    pub commission_percent: Option<Decimal>,
    pub arbitrary_commission: bool,
}

impl Action {
    /// Start an execution of this action between two users
    pub fn execute_request(
        &self,
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
    ) -> ExecuteAction {
        ExecuteAction::new(from_user_id, to_user_id, self.id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Created,
    Name,
}

impl OrderBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging and ordering for list calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page_no: u32,
    pub limit: u32,
    pub order_by: OrderBy,
    pub order: Order,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page_no: 1,
            limit: 10,
            order_by: OrderBy::Created,
            order: Order::Desc,
        }
    }
}

impl ListParams {
    pub fn page(mut self, page_no: u32) -> Self {
        self.page_no = page_no;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }
}

/// Transfer request for `Actions::execute`
///
/// `amount` and `commission_percent` override the action's configured
/// values; the backend only accepts them for arbitrary actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteAction {
    pub from_user_id: String,
    pub to_user_id: String,
    pub action_id: String,
    pub amount: Option<Decimal>,
    pub commission_percent: Option<Decimal>,
}

impl ExecuteAction {
    pub fn new(
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            action_id: action_id.into(),
            amount: None,
            commission_percent: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn commission_percent(mut self, commission_percent: Decimal) -> Self {
        self.commission_percent = Some(commission_percent);
        self
    }
}

/// Definition for `Actions::create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAction {
    pub name: String,
    pub kind: String,
    pub currency: String,
    /// `None` creates an arbitrary-amount action
    pub amount: Option<Decimal>,
    /// Only sent for `user_to_user` actions; `None` there means arbitrary
    pub commission_percent: Option<Decimal>,
}

impl NewAction {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            currency: currency.into(),
            amount: None,
            commission_percent: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn commission_percent(mut self, commission_percent: Decimal) -> Self {
        self.commission_percent = Some(commission_percent);
        self
    }

    pub fn is_user_to_user(&self) -> bool {
        self.kind == "user_to_user"
    }
}
