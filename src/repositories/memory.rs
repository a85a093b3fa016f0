//! In-memory repositories for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    core::errors::AppError,
    domain::{
        entities::{Customer, Order, OrderStatus, Product, User},
        models::oauth::{AuthorizationCodeGrant, RefreshTokenRecord},
    },
    repositories::{
        customers::CustomerRepository, oauth::AuthorizationRepository, orders::OrderRepository,
        products::ProductRepository, users::UserRepository,
    },
};

/// Id-keyed table with a monotonically increasing sequence.
struct Table<T> {
    rows: Mutex<(i64, Vec<T>)>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Mutex::new((0, Vec::new())),
        }
    }

    fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().1.clone()
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.lock().unwrap().1.iter().find(|row| predicate(row)).cloned()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .1
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    fn save(&self, row: T, id_of: impl Fn(&T) -> Option<i64>, set_id: impl Fn(&mut T, i64)) -> T {
        let mut guard = self.rows.lock().unwrap();
        let (sequence, rows) = &mut *guard;
        match id_of(&row) {
            Some(id) => {
                rows.retain(|existing| id_of(existing) != Some(id));
                rows.push(row.clone());
                row
            }
            None => {
                *sequence += 1;
                let mut row = row;
                set_id(&mut row, *sequence);
                rows.push(row.clone());
                row
            }
        }
    }

    fn delete(&self, predicate: impl Fn(&T) -> bool) -> bool {
        let mut guard = self.rows.lock().unwrap();
        let before = guard.1.len();
        guard.1.retain(|row| !predicate(row));
        guard.1.len() != before
    }

    fn update(&self, predicate: impl Fn(&T) -> bool, change: impl Fn(&mut T)) -> Option<T> {
        let mut guard = self.rows.lock().unwrap();
        let row = guard.1.iter_mut().find(|row| predicate(row))?;
        change(row);
        Some(row.clone())
    }
}

pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.table.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.table.find(|user| user.id == Some(id)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.table.find(|user| user.username == username))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.table.find(|user| user.username == username).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.table.find(|user| user.email == email).is_some())
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        Ok(self.table.save(user, |u| u.id, |u, id| u.id = Some(id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.delete(|user| user.id == Some(id)))
    }
}

pub struct InMemoryCustomerRepository {
    table: Table<Customer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.table.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.table.find(|customer| customer.id == Some(id)))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.table.find(|customer| customer.user_id == user_id))
    }

    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(self.table.find(|customer| customer.user_id == user_id).is_some())
    }

    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        Ok(self.table.save(customer, |c| c.id, |c, id| c.id = Some(id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.delete(|customer| customer.id == Some(id)))
    }
}

pub struct InMemoryProductRepository {
    table: Table<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.table.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.table.find(|product| product.id == Some(id)))
    }

    async fn save(&self, product: Product) -> Result<Product, AppError> {
        Ok(self.table.save(product, |p| p.id, |p, id| p.id = Some(id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.delete(|product| product.id == Some(id)))
    }
}

pub struct InMemoryOrderRepository {
    table: Table<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.table.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        Ok(self.table.find(|order| order.id == Some(id)))
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Order>, AppError> {
        Ok(self.table.filter(|order| order.customer_id == customer_id))
    }

    async fn save(&self, order: Order) -> Result<Order, AppError> {
        Ok(self.table.save(order, |o| o.id, |o, id| o.id = Some(id)))
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>, AppError> {
        Ok(self
            .table
            .update(|order| order.id == Some(id), |order| order.status = status))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.delete(|order| order.id == Some(id)))
    }
}

/// Codes and refresh tokens in maps; TTLs are ignored.
pub struct InMemoryAuthorizationRepository {
    codes: Mutex<HashMap<String, AuthorizationCodeGrant>>,
    refresh_tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryAuthorizationRepository {
    pub fn new() -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            refresh_tokens: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryAuthorizationRepository {
    async fn save_code(
        &self,
        code: &str,
        grant: &AuthorizationCodeGrant,
        _ttl_seconds: u64,
    ) -> Result<(), AppError> {
        self.codes
            .lock()
            .unwrap()
            .insert(code.to_string(), grant.clone());
        Ok(())
    }

    async fn take_code(&self, code: &str) -> Result<Option<AuthorizationCodeGrant>, AppError> {
        Ok(self.codes.lock().unwrap().remove(code))
    }

    async fn save_refresh_token(
        &self,
        token: &str,
        record: &RefreshTokenRecord,
        _ttl_seconds: u64,
    ) -> Result<(), AppError> {
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), record.clone());
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        Ok(self.refresh_tokens.lock().unwrap().get(token).cloned())
    }
}
