//! 订单服务
//!
//! 处理器只做提取与响应包装，订单的业务规则都在这里：
//! 服务端定价、事务内落库、状态流转、删除权限。

use std::collections::HashMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderCreate, OrderDetail, OrderUpdate};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::auth::policy::{self, Action, Resource};
use crate::db::repository::{RepoError, menu_item, order};
use crate::orders::pricing::{distinct_ids, price_order};
use crate::orders::status::ensure_transition;

/// 创建订单
///
/// 读取菜品、定价、写入订单头和全部明细在同一个事务内完成。
/// 任一菜品不存在时整个请求失败，`details.missing_ids` 列出全部缺失 ID。
pub async fn create_order(
    pool: &SqlitePool,
    user_id: i64,
    input: OrderCreate,
) -> AppResult<OrderDetail> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let ids = distinct_ids(&input.items);
    let menu: HashMap<_, _> = menu_item::find_by_ids(&mut *tx, &ids)
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    let priced = price_order(&input.items, &menu).map_err(|missing| {
        tracing::warn!(?missing, "Order references unknown menu items");
        AppError::business_rule(
            ErrorCode::OrderMenuItemsMissing,
            format!("Menu items not found: {}", join_ids(&missing)),
        )
        .with_detail("missing_ids", missing)
    })?;

    let order_id = order::insert_order(
        &mut tx,
        order::NewOrder {
            user_id,
            total: priced.total,
            table_number: input.table_number,
            customer_name: input.customer_name.as_deref(),
            notes: input.notes.as_deref(),
        },
    )
    .await?;

    for line in &priced.lines {
        order::insert_item(
            &mut tx,
            order_id,
            line.menu_item_id,
            line.quantity,
            line.unit_price,
            line.notes.as_deref(),
        )
        .await?;
    }

    let detail = order::find_detail(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::internal("Created order could not be read back"))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        order_number = detail.order.order_number,
        total = %detail.order.total,
        lines = detail.items.len(),
        "Order created"
    );
    Ok(detail)
}

pub async fn list_orders(pool: &SqlitePool) -> AppResult<Vec<OrderDetail>> {
    Ok(order::find_all(pool).await?)
}

pub async fn get_order(pool: &SqlitePool, id: i64) -> AppResult<OrderDetail> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    order::find_detail(&mut conn, id)
        .await?
        .ok_or_else(|| order::not_found(id).into())
}

/// 更新订单状态 (和可选备注)
///
/// 写入以读到的状态为条件；并发请求抢先改了状态时重新读取并按新状态校验，
/// 所以终态不会被覆盖。非法流转返回 `OrderInvalidStatusTransition`。
pub async fn update_order(pool: &SqlitePool, id: i64, input: OrderUpdate) -> AppResult<OrderDetail> {
    for _ in 0..STATUS_UPDATE_ATTEMPTS {
        let current = order::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::from(order::not_found(id)))?;

        ensure_transition(current.status, input.status)?;
        let applied =
            order::update_status(pool, id, current.status, input.status, input.notes.as_deref())
                .await?;
        if !applied {
            tracing::debug!(order_id = id, seen = %current.status, "Order status changed concurrently, re-checking");
            continue;
        }

        if current.status != input.status {
            tracing::info!(
                order_id = id,
                from = %current.status,
                to = %input.status,
                "Order status changed"
            );
        }
        return get_order(pool, id).await;
    }

    tracing::warn!(order_id = id, to = %input.status, "Order status kept changing under update");
    Err(AppError::business_rule(
        ErrorCode::OrderInvalidStatusTransition,
        "Order status changed concurrently, retry the update",
    ))
}

/// 条件写入失败后的最大重试次数
const STATUS_UPDATE_ATTEMPTS: usize = 5;

/// 删除订单
///
/// ADMIN/MANAGER 可删除任意订单，其他角色只能删除自己创建的订单。
pub async fn delete_order(pool: &SqlitePool, id: i64, user: &CurrentUser) -> AppResult<()> {
    let existing = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::from(order::not_found(id)))?;

    let allowed =
        policy::is_allowed(user.role, Resource::Order, Action::Delete) || existing.user_id == user.id;
    if !allowed {
        crate::security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id,
            role = user.role.as_str(),
            order_id = id
        );
        return Err(AppError::forbidden("Only managers or the creator can delete this order"));
    }

    order::delete(pool, id).await?;
    tracing::info!(order_id = id, deleted_by = user.id, "Order deleted");
    Ok(())
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{category, user};
    use rust_decimal::Decimal;
    use shared::models::{
        CategoryCreate, MenuItemCreate, MenuItemUpdate, OrderLineInput, OrderStatus, Role,
    };
    use std::str::FromStr;

    struct Fixture {
        db: DbService,
        staff: CurrentUser,
        garlic_bread: i64,
        soda: i64,
    }

    async fn fixture() -> Fixture {
        fixture_on(DbService::in_memory().await.unwrap()).await
    }

    async fn fixture_on(db: DbService) -> Fixture {
        let staff = user::create(&db.pool, "Staff", "staff@test.local", "x", Role::Staff)
            .await
            .unwrap();
        let cat = category::create(
            &db.pool,
            CategoryCreate {
                name: "Starters".into(),
                description: None,
            },
        )
        .await
        .unwrap();

        let mut ids = Vec::new();
        for (name, price) in [("Garlic Bread", "5.99"), ("Soda", "2.99")] {
            let item = menu_item::create(
                &db.pool,
                MenuItemCreate {
                    name: name.into(),
                    description: None,
                    price: Decimal::from_str(price).unwrap(),
                    image: None,
                    is_available: true,
                    category_id: cat.id,
                },
            )
            .await
            .unwrap();
            ids.push(item.id);
        }

        Fixture {
            db,
            staff: CurrentUser {
                id: staff.id,
                name: staff.name,
                email: staff.email,
                role: staff.role,
            },
            garlic_bread: ids[0],
            soda: ids[1],
        }
    }

    fn cart(lines: &[(i64, i64)]) -> OrderCreate {
        OrderCreate {
            table_number: Some(4),
            customer_name: None,
            notes: None,
            items: lines
                .iter()
                .map(|(id, qty)| OrderLineInput {
                    menu_item_id: *id,
                    quantity: *qty,
                    notes: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_prices_from_menu() {
        let f = fixture().await;
        let detail = create_order(&f.db.pool, f.staff.id, cart(&[(f.garlic_bread, 2), (f.soda, 1)]))
            .await
            .unwrap();

        assert_eq!(detail.order.total, Decimal::from_str("14.97").unwrap());
        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.order.order_number, 1);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.user.id, f.staff.id);
    }

    #[tokio::test]
    async fn test_missing_items_leave_nothing_behind() {
        let f = fixture().await;
        let err = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1), (404, 1), (405, 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OrderMenuItemsMissing);
        let missing = err.details.as_ref().unwrap().get("missing_ids").unwrap();
        assert_eq!(missing, &serde_json::json!([404, 405]));
        assert!(list_orders(&f.db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_menu_change() {
        let f = fixture().await;
        let created = create_order(&f.db.pool, f.staff.id, cart(&[(f.garlic_bread, 2)]))
            .await
            .unwrap();

        menu_item::update(
            &f.db.pool,
            f.garlic_bread,
            MenuItemUpdate {
                price: Some(Decimal::from_str("9.99").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let reloaded = get_order(&f.db.pool, created.order.id).await.unwrap();
        assert_eq!(reloaded.order.total, Decimal::from_str("11.98").unwrap());
        assert_eq!(reloaded.items[0].item.price, Decimal::from_str("5.99").unwrap());
    }

    #[tokio::test]
    async fn test_order_numbers_are_sequential() {
        let f = fixture().await;
        for expected in 1..=3 {
            let detail = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
                .await
                .unwrap();
            assert_eq!(detail.order.order_number, expected);
        }
    }

    #[tokio::test]
    async fn test_status_flow_and_notes() {
        let f = fixture().await;
        let created = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
            .await
            .unwrap();
        let id = created.order.id;

        let updated = update_order(
            &f.db.pool,
            id,
            OrderUpdate {
                status: OrderStatus::Preparing,
                notes: Some("rush".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.order.status, OrderStatus::Preparing);
        assert_eq!(updated.order.notes.as_deref(), Some("rush"));

        // omitted notes keep the stored value
        let updated = update_order(
            &f.db.pool,
            id,
            OrderUpdate {
                status: OrderStatus::Ready,
                notes: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.order.notes.as_deref(), Some("rush"));

        let err = update_order(
            &f.db.pool,
            id,
            OrderUpdate {
                status: OrderStatus::Pending,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidStatusTransition);
    }

    fn set_status(status: OrderStatus) -> OrderUpdate {
        OrderUpdate {
            status,
            notes: None,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_updates_cannot_reopen_cancelled_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.db");
        let f = fixture_on(DbService::new(path.to_str().unwrap()).await.unwrap()).await;

        for _ in 0..50 {
            let created = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
                .await
                .unwrap();
            let id = created.order.id;

            let cancel = tokio::spawn({
                let pool = f.db.pool.clone();
                async move { update_order(&pool, id, set_status(OrderStatus::Cancelled)).await }
            });
            let prepare = tokio::spawn({
                let pool = f.db.pool.clone();
                async move { update_order(&pool, id, set_status(OrderStatus::Preparing)).await }
            });
            let cancel = cancel.await.unwrap();
            let prepare = prepare.await.unwrap();

            // cancelling is legal from both PENDING and PREPARING
            assert!(cancel.is_ok(), "cancel failed: {:?}", cancel.err());
            if let Err(err) = prepare {
                assert_eq!(err.code, ErrorCode::OrderInvalidStatusTransition);
            }
            let stored = get_order(&f.db.pool, id).await.unwrap();
            assert_eq!(stored.order.status, OrderStatus::Cancelled);
        }
        f.db.close().await;
    }

    #[tokio::test]
    async fn test_update_after_cancel_is_rejected() {
        let f = fixture().await;
        let created = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
            .await
            .unwrap();
        let id = created.order.id;

        update_order(&f.db.pool, id, set_status(OrderStatus::Cancelled))
            .await
            .unwrap();
        let err = update_order(&f.db.pool, id, set_status(OrderStatus::Preparing))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidStatusTransition);
        assert!(err.message.contains("CANCELLED"));

        // a write conditioned on a stale status is not applied
        let applied = order::update_status(
            &f.db.pool,
            id,
            OrderStatus::Pending,
            OrderStatus::Preparing,
            None,
        )
        .await
        .unwrap();
        assert!(!applied);
        let stored = get_order(&f.db.pool, id).await.unwrap();
        assert_eq!(stored.order.status, OrderStatus::Cancelled);

        let err = update_order(&f.db.pool, 424242, set_status(OrderStatus::Ready))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let f = fixture().await;
        let created = create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
            .await
            .unwrap();

        let stranger = CurrentUser {
            id: f.staff.id + 1,
            name: "Other".into(),
            email: "other@test.local".into(),
            role: Role::Staff,
        };
        let err = delete_order(&f.db.pool, created.order.id, &stranger)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);

        delete_order(&f.db.pool, created.order.id, &f.staff).await.unwrap();
        let err = get_order(&f.db.pool, created.order.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_menu_item_in_use_cannot_be_deleted() {
        let f = fixture().await;
        create_order(&f.db.pool, f.staff.id, cart(&[(f.soda, 1)]))
            .await
            .unwrap();

        let err: AppError = menu_item::delete(&f.db.pool, f.soda).await.unwrap_err().into();
        assert_eq!(err.code, ErrorCode::MenuItemInUse);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }
}
