use serde::{Deserialize, Serialize};
use serde_json::Value;

use sweetshop_core::validation::{self, Validator};
use sweetshop_core::{DomainError, DomainResult, Entity, SweetId, ValueObject};

use crate::stock::{StockAmount, StockTransition};

/// Non-negative, finite unit price.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        validation::check_non_negative_number("price", value)
            .map(Self)
            .map_err(DomainError::validation)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

/// A sellable catalogue entry.
///
/// Only constructible through validation, so every `Sweet` in memory holds a
/// positive id, trimmed non-empty name and category, a valid price and a
/// non-negative quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Sweet {
    id: SweetId,
    name: String,
    category: String,
    price: Price,
    quantity: u64,
}

impl Sweet {
    /// Validate raw field values, reporting every violated rule.
    pub fn new(
        id: i64,
        name: &str,
        category: &str,
        price: f64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let mut v = Validator::new();
        let id = v.check(validation::check_positive_integer("id", id));
        let name = v.check(validation::check_non_empty("name", name));
        let category = v.check(validation::check_non_empty("category", category));
        let price = v.check(validation::check_non_negative_number("price", price));
        let quantity = v.check(validation::check_non_negative_integer("quantity", quantity));

        match (id, name, category, price, quantity) {
            (Some(id), Some(name), Some(category), Some(price), Some(quantity)) => Ok(Self {
                id: SweetId::try_from(id)?,
                name,
                category,
                price: Price(price),
                quantity,
            }),
            _ => Err(DomainError::validation(v.into_failure())),
        }
    }

    /// Validate an untyped JSON record (`{id, name, category, price, quantity}`).
    ///
    /// Wrong JSON types (e.g. a string price) are violations of their field,
    /// not parse errors.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let record = as_record(value)?;
        let mut v = Validator::new();
        let id = v.check(validation::positive_integer("id", record.get("id")));
        let draft = draft_fields(&mut v, record);

        match (id, draft) {
            (Some(id), Some(draft)) => Ok(draft.into_sweet(SweetId::try_from(id)?)),
            _ => Err(DomainError::validation(v.into_failure())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Whether a purchase of `amount` units would be accepted.
    pub fn can_purchase(&self, amount: u64) -> bool {
        amount > 0 && self.quantity >= amount
    }

    pub fn purchase(&mut self, amount: StockAmount) -> DomainResult<()> {
        *self = StockTransition::Purchase(amount).apply(self)?;
        Ok(())
    }

    pub fn restock(&mut self, amount: StockAmount) -> DomainResult<()> {
        *self = StockTransition::Restock(amount).apply(self)?;
        Ok(())
    }

    /// Snapshot with a different quantity; all other fields unchanged.
    pub(crate) fn with_quantity(&self, quantity: u64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Entity for Sweet {
    type Id = SweetId;

    fn id(&self) -> SweetId {
        self.id
    }
}

impl TryFrom<Value> for Sweet {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

/// A sweet that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct SweetDraft {
    name: String,
    category: String,
    price: Price,
    quantity: u64,
}

impl SweetDraft {
    pub fn new(name: &str, category: &str, price: f64, quantity: i64) -> DomainResult<Self> {
        let mut v = Validator::new();
        let name = v.check(validation::check_non_empty("name", name));
        let category = v.check(validation::check_non_empty("category", category));
        let price = v.check(validation::check_non_negative_number("price", price));
        let quantity = v.check(validation::check_non_negative_integer("quantity", quantity));

        match (name, category, price, quantity) {
            (Some(name), Some(category), Some(price), Some(quantity)) => Ok(Self {
                name,
                category,
                price: Price(price),
                quantity,
            }),
            _ => Err(DomainError::validation(v.into_failure())),
        }
    }

    /// Validate an untyped JSON record; any `id` field is ignored.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let record = as_record(value)?;
        let mut v = Validator::new();
        draft_fields(&mut v, record).ok_or_else(|| DomainError::validation(v.into_failure()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_sweet(self, id: SweetId) -> Sweet {
        Sweet {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl TryFrom<Value> for SweetDraft {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

fn as_record(value: &Value) -> DomainResult<&serde_json::Map<String, Value>> {
    match value {
        Value::Null => Err(DomainError::invalid_entity("sweet cannot be null")),
        Value::Object(map) => Ok(map),
        _ => Err(DomainError::invalid_entity("sweet must be a JSON object")),
    }
}

fn draft_fields(v: &mut Validator, record: &serde_json::Map<String, Value>) -> Option<SweetDraft> {
    let name = v.check(validation::non_empty_string("name", record.get("name")));
    let category = v.check(validation::non_empty_string("category", record.get("category")));
    let price = v.check(validation::non_negative_number("price", record.get("price")));
    let quantity = v.check(validation::non_negative_integer("quantity", record.get("quantity")));

    Some(SweetDraft {
        name: name?,
        category: category?,
        price: Price(price?),
        quantity: quantity?,
    })
}
