use std::sync::Arc;

use crate::{
    core::errors::AppError,
    domain::{
        dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest},
        entities::products::Product,
    },
    repositories::products::ProductRepository,
};

pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.product_repo.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn get_product_by_id(&self, id: i64) -> Result<ProductResponse, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let product = Product {
            id: None,
            name: request.name,
            price: request.price,
            quantity: request.quantity,
        };

        let created = self.product_repo.save(product).await?;
        log::info!("Product created: {} (id {})", created.name, created.id.unwrap_or_default());

        Ok(ProductResponse::from(created))
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let mut product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(quantity) = request.quantity {
            product.quantity = quantity;
        }

        let updated = self.product_repo.save(product).await?;
        Ok(ProductResponse::from(updated))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if !self.product_repo.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }
}
