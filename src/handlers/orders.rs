//! Order endpoints. Every route requires a bearer token; `POST /orders` and
//! `GET /orders/self` also need its `userId` claim.

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::orders::{CreateOrderRequest, StatusQuery};
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::services::orders::OrderService;

#[get("")]
pub async fn get_orders(order_service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = order_service.get_all_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[get("/self")]
pub async fn get_self_orders(
    order_service: web::Data<OrderService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = order_service.get_self_orders(&user).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[get("/customer/{customer_id}")]
pub async fn get_orders_by_customer(
    order_service: web::Data<OrderService>,
    customer_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let orders = order_service
        .get_orders_by_customer_id(customer_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[get("/{id}")]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.get_order_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// Places an order for the caller's customer profile.
///
/// ```json
/// { "productId": 5, "quantity": 2 }
/// ```
#[post("")]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    payload: web::Json<CreateOrderRequest>,
    principal: OptionalUser,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "Order request from '{}' for product {}",
        principal.username(),
        payload.product_id
    );
    let user = principal.into_authenticated()?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let order = order_service
        .create_order(&user, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(order))
}

/// `PUT /orders/{id}/status?status=SHIPPED`
#[put("/{id}/status")]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    id: web::Path<i64>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let order = order_service
        .update_status(id.into_inner(), query.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(order))
}

#[delete("/{id}")]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    order_service.delete_order(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
