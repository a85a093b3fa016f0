use std::sync::Arc;

use crate::{
    core::errors::AppError,
    domain::{
        dto::customers::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest},
        entities::customers::Customer,
    },
    repositories::customers::CustomerRepository,
    utils::string_utils::clean_optional_string,
};

/// Customer profiles. Each user owns at most one, and only the owner may edit it.
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    pub async fn get_all_customers(&self) -> Result<Vec<CustomerResponse>, AppError> {
        let customers = self.customer_repo.find_all().await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn get_customer_by_id(&self, id: i64) -> Result<CustomerResponse, AppError> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .map(CustomerResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn get_customer_by_user_id(&self, user_id: i64) -> Result<CustomerResponse, AppError> {
        self.customer_repo
            .find_by_user_id(user_id)
            .await?
            .map(CustomerResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Customer for user {} not found", user_id)))
    }

    /// Creates the profile of `user_id`; a second profile for the same user is a 409.
    pub async fn create_customer(
        &self,
        user_id: i64,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse, AppError> {
        if self.customer_repo.exists_by_user_id(user_id).await? {
            return Err(AppError::ConflictError(format!(
                "Customer profile already exists for user {}",
                user_id
            )));
        }

        let customer = Customer {
            id: None,
            user_id,
            name: request.name,
            phone: request.phone,
            address: clean_optional_string(request.address),
        };

        let created = self.customer_repo.save(customer).await?;
        log::info!(
            "Customer {} created for user {}",
            created.id.unwrap_or_default(),
            user_id
        );

        Ok(CustomerResponse::from(created))
    }

    /// Overwrites the present fields of customer `id` on behalf of `user_id`.
    pub async fn update_customer(
        &self,
        id: i64,
        user_id: i64,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerResponse, AppError> {
        let mut customer = self
            .customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))?;

        if !customer.is_owned_by(user_id) {
            log::warn!("User {} tried to update customer {} of user {}", user_id, id, customer.user_id);
            return Err(AppError::AuthorizationError(
                "You can only update your own customer profile".to_string(),
            ));
        }

        if let Some(name) = request.name {
            customer.name = name;
        }
        if let Some(phone) = request.phone {
            customer.phone = phone;
        }
        if request.address.is_some() {
            customer.address = clean_optional_string(request.address);
        }

        let updated = self.customer_repo.save(customer).await?;
        Ok(CustomerResponse::from(updated))
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), AppError> {
        if !self.customer_repo.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Customer {} not found", id)));
        }
        Ok(())
    }
}
