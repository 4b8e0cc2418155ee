//! In-memory customer store.
//!
//! One concurrent map keyed by customer id. No persistence - data is lost on
//! restart. Every single-key operation is atomic; `get_all` returns a
//! snapshot with no ordering guarantee.

use crate::models::{Customer, CustomerId};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe in-memory store
#[derive(Clone, Default)]
pub struct CustomerStore {
    customers: Arc<DashMap<CustomerId, Customer>>,
}

impl CustomerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            customers: Arc::new(DashMap::new()),
        }
    }

    /// Current number of customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Insert a customer, overwriting any existing record with the same id.
    pub fn create(&self, customer: Customer) -> Customer {
        let replaced = self.customers.insert(customer.id, customer.clone());

        debug!(
            customer_id = %customer.id,
            replaced = replaced.is_some(),
            "Stored customer"
        );

        customer
    }

    /// Look up a customer by id
    pub fn get_by_id(&self, id: &CustomerId) -> Option<Customer> {
        self.customers.get(id).map(|entry| entry.value().clone())
    }

    /// Snapshot of all customers, in no particular order
    pub fn get_all(&self) -> Vec<Customer> {
        self.customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Replace an existing customer wholesale.
    ///
    /// The existence check and the write happen under the same shard lock.
    pub fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut entry = self
            .customers
            .get_mut(&customer.id)
            .ok_or(StoreError::NotFound(customer.id))?;

        *entry.value_mut() = customer.clone();
        drop(entry);

        debug!(customer_id = %customer.id, "Updated customer");

        Ok(customer)
    }

    /// Remove a customer. Absent ids are a no-op.
    pub fn delete(&self, id: &CustomerId) -> Option<Customer> {
        let removed = self.customers.remove(id).map(|(_, customer)| customer);

        debug!(
            customer_id = %id,
            existed = removed.is_some(),
            "Deleted customer"
        );

        removed
    }
}

/// Store errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("customer {0} not found")]
    NotFound(CustomerId),
}
