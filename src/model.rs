//! Record shapes stored by the service and exchanged as JSON.
//!
//! Request bodies decode into the same types. Every field is optional on the
//! wire: missing strings become empty, a missing `products` list becomes
//! empty, and any `id` a client sends is overwritten by the store.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Parsed from paths as a `u32`.
pub type Id = u32;

/// A product listed in the catalogue.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Product {
    pub id: Id,
    pub name: String,
    /// Decimal price kept as text, e.g. `"9.99"`.
    pub price: String,
    pub category: String,
    /// Identifier of the owning user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Id>,
}

/// A user together with snapshot copies of the products linked to them.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Copies taken when each product was created. They are not refreshed
    /// when the product itself is later updated or deleted.
    pub products: Vec<Product>,
}

/// A record that lives in a [`Collection`](crate::store::Collection).
pub trait Record: Clone {
    /// Capitalised noun used in log fields and client-facing messages.
    const KIND: &'static str;

    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);
}

impl Record for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Id { self.id }
    fn set_id(&mut self, id: Id) { self.id = id; }
}

impl Record for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> Id { self.id }
    fn set_id(&mut self, id: Id) { self.id = id; }
}
