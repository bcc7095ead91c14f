//! Customer use-case service.
//!
//! # Responsibility
//! - Expose the five store operations the web layer calls.
//! - Emit one structured log line per mutation.
//!
//! # Invariants
//! - Never bypasses repository validation.
//! - Missing ids on update/delete are reported as `Ok(false)`, not errors.

use crate::model::customer::{Customer, CustomerDraft, CustomerId};
use crate::repo::customer_repo::{CustomerRepository, RepoResult};
use log::{debug, info, warn};

pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every customer in primary-key order.
    pub fn list_all(&self) -> RepoResult<Vec<Customer>> {
        let customers = self.repo.list_customers()?;
        debug!(
            "event=customer_list module=service status=ok rows={}",
            customers.len()
        );
        Ok(customers)
    }

    /// Inserts a customer and returns its assigned id.
    pub fn create(&self, draft: &CustomerDraft) -> RepoResult<CustomerId> {
        match self.repo.create_customer(draft) {
            Ok(id) => {
                info!("event=customer_create module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=customer_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn get_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.repo.get_customer(id)
    }

    /// Overwrites name, email and salary. `Ok(false)` when `id` is absent.
    pub fn update(&self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<bool> {
        match self.repo.update_customer(id, draft) {
            Ok(changed) => {
                info!("event=customer_update module=service status=ok id={id} changed={changed}");
                Ok(changed)
            }
            Err(err) => {
                warn!("event=customer_update module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Permanently removes a customer. `Ok(false)` when `id` is absent.
    pub fn delete_by_id(&self, id: CustomerId) -> RepoResult<bool> {
        match self.repo.delete_customer(id) {
            Ok(changed) => {
                info!("event=customer_delete module=service status=ok id={id} changed={changed}");
                Ok(changed)
            }
            Err(err) => {
                warn!("event=customer_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
