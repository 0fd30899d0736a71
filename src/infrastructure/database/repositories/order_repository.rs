use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use tracing::warn;

use super::{db_err, write_err};
use crate::domain::order::{Order, OrderItem, OrderQuery, OrderRepository, OrderStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{order, order_item};
use crate::shared::errors::InfraError;

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run `select` and attach each order's items.
    async fn load(&self, select: Select<order::Entity>) -> DomainResult<Vec<Order>> {
        let models = select.all(&self.db).await.map_err(db_err)?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let item_models = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for m in item_models {
            items_by_order
                .entry(m.order_id.clone())
                .or_default()
                .push(item_model_to_domain(m));
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let items = items_by_order.remove(&m.id).unwrap_or_default();
                model_to_domain(m, items)
            })
            .collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn item_model_to_domain(m: order_item::Model) -> OrderItem {
    OrderItem {
        id: Some(m.id),
        product_id: m.product_id,
        name: m.name,
        qty: m.qty,
        price: m.price,
        product_name: m.product_name,
    }
}

fn model_to_domain(m: order::Model, items: Vec<OrderItem>) -> Order {
    let status = OrderStatus::parse(&m.status).unwrap_or_else(|| {
        warn!(order_id = %m.id, status = %m.status, "Unknown stored order status, using Pending");
        OrderStatus::Pending
    });
    let drone_path = serde_json::from_str(&m.drone_path).unwrap_or_default();

    // The stored total is authoritative; it was computed from these items.
    Order {
        id: m.id,
        customer_name: m.customer_name,
        customer_phone: m.customer_phone,
        customer_email: m.customer_email,
        address: m.address,
        restaurant: m.restaurant,
        restaurant_id: m.restaurant_id,
        user_id: m.user_id,
        payment_session_id: m.payment_session_id,
        payment_method: m.payment_method,
        payment_status: m.payment_status,
        note: m.note,
        internal_notes: m.internal_notes,
        drone_id: m.drone_id,
        drone_path,
        vnpay_transaction_id: m.vnpay_transaction_id,
        confirmed_at: m.confirmed_at,
        cancelled_at: m.cancelled_at,
        confirmed_by: m.confirmed_by,
        status,
        total: m.total,
        created_at: m.created_at,
        updated_at: m.updated_at,
        items,
    }
}

fn domain_to_active(o: &Order) -> DomainResult<order::ActiveModel> {
    let drone_path = serde_json::to_string(&o.drone_path).map_err(InfraError::Serialization)?;
    Ok(order::ActiveModel {
        id: Set(o.id.clone()),
        customer_name: Set(o.customer_name.clone()),
        customer_phone: Set(o.customer_phone.clone()),
        customer_email: Set(o.customer_email.clone()),
        address: Set(o.address.clone()),
        restaurant: Set(o.restaurant.clone()),
        restaurant_id: Set(o.restaurant_id.clone()),
        user_id: Set(o.user_id.clone()),
        payment_session_id: Set(o.payment_session_id.clone()),
        payment_method: Set(o.payment_method.clone()),
        payment_status: Set(o.payment_status.clone()),
        note: Set(o.note.clone()),
        internal_notes: Set(o.internal_notes.clone()),
        drone_id: Set(o.drone_id.clone()),
        drone_path: Set(drone_path),
        vnpay_transaction_id: Set(o.vnpay_transaction_id.clone()),
        confirmed_at: Set(o.confirmed_at),
        cancelled_at: Set(o.cancelled_at),
        confirmed_by: Set(o.confirmed_by.clone()),
        status: Set(o.status.as_str().to_string()),
        total: Set(o.total),
        created_at: Set(o.created_at),
        updated_at: Set(o.updated_at),
    })
}

/// Substring match on the phone column; `%`, `_` and `\` in the needle
/// are literal.
fn phone_contains(needle: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    order::Column::CustomerPhone.like(LikeExpr::new(pattern).escape('\\'))
}

fn query_condition(query: &OrderQuery) -> Condition {
    match query {
        OrderQuery::PaymentSession(session) => {
            Condition::all().add(order::Column::PaymentSessionId.eq(session.as_str()))
        }
        OrderQuery::PhoneAndRestaurant {
            phone,
            restaurant_id,
        } => Condition::all()
            .add(phone_contains(phone))
            .add(order::Column::RestaurantId.eq(restaurant_id.as_str())),
        OrderQuery::Phone(phone) => Condition::all().add(phone_contains(phone)),
        OrderQuery::Restaurant(restaurant_id) => {
            Condition::all().add(order::Column::RestaurantId.eq(restaurant_id.as_str()))
        }
        OrderQuery::All => Condition::all(),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn create(&self, mut o: Order) -> DomainResult<Order> {
        let conflict = || format!("Order {} already exists", o.id);
        let active = domain_to_active(&o)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        let exists = order::Entity::find_by_id(o.id.as_str())
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_some();
        if exists {
            return Err(DomainError::Conflict(conflict()));
        }

        active
            .insert(&txn)
            .await
            .map_err(|e| write_err(e, conflict))?;

        for item in o.items.iter_mut() {
            let saved = order_item::ActiveModel {
                id: NotSet,
                order_id: Set(o.id.clone()),
                product_id: Set(item.product_id.clone()),
                name: Set(item.name.clone()),
                qty: Set(item.qty),
                price: Set(item.price),
                product_name: Set(item.product_name.clone()),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            item.id = Some(saved.id);
        }

        txn.commit().await.map_err(db_err)?;
        Ok(o)
    }

    async fn update(&self, o: &Order) -> DomainResult<()> {
        let exists = order::Entity::find_by_id(o.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Order", o.id.clone()));
        }
        domain_to_active(o)?.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Order>> {
        let found = self
            .load(order::Entity::find().filter(order::Column::Id.eq(id)))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn find(&self, query: &OrderQuery) -> DomainResult<Vec<Order>> {
        self.load(
            order::Entity::find()
                .filter(query_condition(query))
                .order_by_desc(order::Column::CreatedAt),
        )
        .await
    }

    async fn find_by_restaurant_created_after(
        &self,
        restaurant_id: &str,
        after_millis: i64,
    ) -> DomainResult<Vec<Order>> {
        self.load(
            order::Entity::find()
                .filter(order::Column::RestaurantId.eq(restaurant_id))
                .filter(order::Column::CreatedAt.gt(after_millis))
                .order_by_desc(order::Column::CreatedAt),
        )
        .await
    }

    async fn count(&self) -> DomainResult<u64> {
        order::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
