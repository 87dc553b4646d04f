//! The record store: users and products held in memory for the life of the
//! process.
//!
//! Both collections sit behind one [`RwLock`]. Product creation and the
//! linkage of the new product into its owner are therefore a single atomic
//! step, and concurrent requests never observe a half-applied mutation.

mod collection;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;

use crate::model::{Id, Product, Record, User};

pub use collection::Collection;

/// `kind` is the record noun, e.g. `"User"`.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum StoreError {
    /// A lookup that matched nothing.
    #[error("{kind} not found")]
    NotFound { kind: &'static str },

    /// Every identifier of this kind has been handed out.
    #[error("{kind} identifiers exhausted")]
    IdsExhausted { kind: &'static str },
}

impl StoreError {
    fn not_found<T: Record>() -> Self {
        Self::NotFound { kind: T::KIND }
    }

    fn ids_exhausted<T: Record>() -> Self {
        Self::IdsExhausted { kind: T::KIND }
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Collection<User>,
    products: Collection<Product>,
}

/// Owns every user and product record.
///
/// Build one at startup and share it through an `Arc`.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self { Self::default() }

    // Each mutation below leaves both collections valid after every step. The
    // one two-step write, linking in `create_product`, runs after the insert,
    // so a panic between the two only loses the link. Recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Users ────────────────────────────────────────────────────────────────

    pub fn list_users(&self) -> Vec<User> {
        self.read().users.list().to_vec()
    }

    pub fn create_user(&self, user: User) -> Result<User, StoreError> {
        self.write().users.insert(user).ok_or_else(StoreError::ids_exhausted::<User>)
    }

    pub fn get_user(&self, id: Id) -> Result<User, StoreError> {
        self.read().users.get(id).cloned().ok_or_else(StoreError::not_found::<User>)
    }

    pub fn update_user(&self, id: Id, user: User) -> Result<User, StoreError> {
        self.write().users.replace(id, user).ok_or_else(StoreError::not_found::<User>)
    }

    pub fn delete_user(&self, id: Id) -> Result<User, StoreError> {
        self.write().users.remove(id).ok_or_else(StoreError::not_found::<User>)
    }

    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    // ── Products ─────────────────────────────────────────────────────────────

    pub fn list_products(&self) -> Vec<Product> {
        self.read().products.list().to_vec()
    }

    /// Stores `product` and, when its `owner` names an existing user, appends
    /// a snapshot of it to that user's `products`. An unknown owner is not an
    /// error.
    pub fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut tables = self.write();
        let stored = tables.products.insert(product).ok_or_else(StoreError::ids_exhausted::<Product>)?;

        if let Some(owner) = stored.owner {
            match tables.users.get_mut(owner) {
                Some(user) => {
                    user.products.push(stored.clone());
                    debug!(id = stored.id, owner, "product linked to owner");
                }
                None => debug!(id = stored.id, owner, "product owner not found; left unlinked"),
            }
        }
        Ok(stored)
    }

    pub fn get_product(&self, id: Id) -> Result<Product, StoreError> {
        self.read().products.get(id).cloned().ok_or_else(StoreError::not_found::<Product>)
    }

    /// Embedded copies held by users are left as they were.
    pub fn update_product(&self, id: Id, product: Product) -> Result<Product, StoreError> {
        self.write().products.replace(id, product).ok_or_else(StoreError::not_found::<Product>)
    }

    /// Embedded copies held by users are left as they were.
    pub fn delete_product(&self, id: Id) -> Result<Product, StoreError> {
        self.write().products.remove(id).ok_or_else(StoreError::not_found::<Product>)
    }

    pub fn product_count(&self) -> usize {
        self.read().products.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn user(name: &str) -> User {
        User { name: name.to_owned(), email: format!("{name}@example.com"), ..User::default() }
    }

    fn product(name: &str, owner: Option<Id>) -> Product {
        Product {
            name: name.to_owned(),
            price: "9.99".to_owned(),
            category: "Tools".to_owned(),
            owner,
            ..Product::default()
        }
    }

    #[test]
    fn creating_users_assigns_sequential_ids() {
        let store = Store::new();
        let ids: Vec<Id> = (0..5).map(|i| store.create_user(user(&format!("u{i}"))).unwrap().id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn id_after_delete_is_not_reused() {
        let store = Store::new();
        store.create_user(user("alice")).unwrap();
        store.create_user(user("bob")).unwrap();
        store.delete_user(1).unwrap();

        // A count-based scheme would hand out 2 again here.
        let carol = store.create_user(user("carol")).unwrap();
        assert_eq!(carol.id, 3);
        assert_eq!(store.get_user(2).unwrap().name, "bob");
    }

    #[test]
    fn missing_ids_report_not_found() {
        let store = Store::new();
        let err = StoreError::NotFound { kind: "User" };
        assert_eq!(store.get_user(1), Err(err));
        assert_eq!(store.update_user(1, user("x")), Err(err));
        assert_eq!(store.delete_user(1), Err(err));

        let err = StoreError::NotFound { kind: "Product" };
        assert_eq!(store.get_product(1), Err(err));
        assert_eq!(store.update_product(1, product("x", None)), Err(err));
        assert_eq!(store.delete_product(1), Err(err));
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn update_keeps_original_id() {
        let store = Store::new();
        store.create_product(product("Widget", None)).unwrap();
        let updated = store
            .update_product(1, Product { id: 50, ..product("Gadget", None) })
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(store.get_product(1).unwrap().name, "Gadget");
        assert_eq!(store.product_count(), 1);
    }

    #[test]
    fn delete_removes_only_the_match_and_keeps_order() {
        let store = Store::new();
        for name in ["a", "b", "c"] {
            store.create_user(user(name)).unwrap();
        }
        let removed = store.delete_user(2).unwrap();
        assert_eq!(removed.name, "b");
        let names: Vec<String> = store.list_users().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(store.user_count(), 2);
    }

    #[test]
    fn product_is_linked_to_owner() {
        let store = Store::new();
        store.create_user(user("bob")).unwrap();
        let alice = store.create_user(user("alice")).unwrap();

        let widget = store.create_product(product("Widget", Some(alice.id))).unwrap();
        assert_eq!(widget.id, 1);

        let alice = store.get_user(alice.id).unwrap();
        assert_eq!(alice.products, vec![widget]);
        assert!(store.get_user(1).unwrap().products.is_empty());
    }

    #[test]
    fn product_with_unknown_owner_is_still_created() {
        let store = Store::new();
        let p = store.create_product(product("Widget", Some(9))).unwrap();
        assert_eq!(store.get_product(p.id).unwrap(), p);
    }

    #[test]
    fn embedded_copies_are_snapshots() {
        let store = Store::new();
        let alice = store.create_user(user("alice")).unwrap();
        store.create_product(product("Widget", Some(alice.id))).unwrap();

        store.update_product(1, product("Renamed", Some(alice.id))).unwrap();
        store.delete_product(1).unwrap();

        let alice = store.get_user(alice.id).unwrap();
        assert_eq!(alice.products.len(), 1);
        assert_eq!(alice.products[0].name, "Widget");
    }

    #[test]
    fn exhausted_identifiers_are_an_error_and_store_nothing() {
        let store = Store::new();
        {
            let mut tables = store.write();
            tables.users = Collection::starting_at(Id::MAX);
            tables.products = Collection::starting_at(Id::MAX);
        }

        assert_eq!(store.create_user(user("bob")).unwrap().id, Id::MAX);
        assert_eq!(store.create_user(user("carol")), Err(StoreError::IdsExhausted { kind: "User" }));
        assert_eq!(store.user_count(), 1);

        store.create_product(product("Widget", Some(Id::MAX))).unwrap();
        let err = store.create_product(product("Gadget", Some(Id::MAX))).unwrap_err();
        assert_eq!(err.to_string(), "Product identifiers exhausted");
        assert_eq!(store.product_count(), 1);
        assert_eq!(store.get_user(Id::MAX).unwrap().products.len(), 1);
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(Store::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50).map(|i| store.create_user(user(&format!("{t}-{i}"))).unwrap().id).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<Id> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=400).collect::<Vec<_>>());
    }
}
