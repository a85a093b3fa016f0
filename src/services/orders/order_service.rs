use std::sync::Arc;

use crate::{
    clients::{CustomerClient, ProductClient},
    core::errors::AppError,
    domain::{
        dto::{
            customers::CustomerResponse,
            orders::{CreateOrderRequest, OrderResponse},
        },
        entities::orders::{Order, OrderStatus},
        models::auth::AuthenticatedUser,
    },
    repositories::orders::OrderRepository,
};

pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
    customer_client: Arc<dyn CustomerClient>,
    product_client: Arc<dyn ProductClient>,
}

impl OrderService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        customer_client: Arc<dyn CustomerClient>,
        product_client: Arc<dyn ProductClient>,
    ) -> Self {
        Self {
            order_repo,
            customer_client,
            product_client,
        }
    }

    pub async fn get_all_orders(&self) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.order_repo.find_all().await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_order_by_id(&self, id: i64) -> Result<OrderResponse, AppError> {
        self.order_repo
            .find_by_id(id)
            .await?
            .map(OrderResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn get_orders_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.order_repo.find_by_customer_id(customer_id).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// Orders of the customer profile belonging to the token's user.
    ///
    /// Failures other than request problems become a 500 `Error fetching orders: ...`.
    pub async fn get_self_orders(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<OrderResponse>, AppError> {
        let orders = async {
            let customer = self.current_customer(user).await?;
            self.get_orders_by_customer_id(customer.id).await
        };

        orders
            .await
            .map_err(|e| internal_unless_validation(e, "Error fetching orders", user))
    }

    /// Places a confirmed order for the caller.
    ///
    /// Request problems are 400s. Any other failure, including an unreachable customer
    /// or product service, becomes a 500 `Error creating order: ...`.
    pub async fn create_order(
        &self,
        user: &AuthenticatedUser,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        self.place_order(user, request)
            .await
            .map_err(|e| internal_unless_validation(e, "Error creating order", user))
    }

    async fn place_order(
        &self,
        user: &AuthenticatedUser,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        let customer = self.current_customer(user).await?;

        let product = self
            .product_client
            .find_by_id(request.product_id, &user.token)
            .await?
            .ok_or_else(|| AppError::ValidationError("Product not found".to_string()))?;

        if request.quantity > product.quantity {
            return Err(AppError::ValidationError(
                "Insufficient product quantity".to_string(),
            ));
        }

        let order = Order::confirmed(customer.id, product.id, request.quantity, product.price)?;
        let created = self.order_repo.save(order).await?;

        log::info!(
            "Order {} placed by customer {}: {} x product {} = {}",
            created.id.unwrap_or_default(),
            created.customer_id,
            created.quantity,
            created.product_id,
            created.total_price
        );

        Ok(OrderResponse::from(created))
    }

    async fn current_customer(&self, user: &AuthenticatedUser) -> Result<CustomerResponse, AppError> {
        let user_id = user.require_user_id()?;

        self.customer_client
            .find_by_user_id(user_id, &user.token)
            .await?
            .ok_or_else(|| AppError::ValidationError("Customer not found for current user".to_string()))
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<OrderResponse, AppError> {
        let updated = self
            .order_repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

        log::info!("Order {} is now {}", id, status);
        Ok(OrderResponse::from(updated))
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), AppError> {
        if !self.order_repo.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}

/// Request problems pass through as 400s; anything else becomes `prefix: error` (500).
fn internal_unless_validation(
    error: AppError,
    prefix: &str,
    user: &AuthenticatedUser,
) -> AppError {
    match error {
        AppError::ValidationError(_) => error,
        other => {
            log::error!("{} for user '{}': {}", prefix, user.username, other);
            AppError::InternalError(format!("{}: {}", prefix, other))
        }
    }
}
