//! Seller earnings aggregation over completed orders

use std::collections::HashMap;

use shared::models::{EarningsReport, StationEarnings};
use sqlx::SqlitePool;

use super::money;
use crate::auth::CurrentUser;
use crate::db::{orders, stations};
use crate::error::ServiceResult;

/// Completed-order totals for the calling seller, broken down per station.
///
/// Every owned station gets a row (zero when it has no completed orders).
/// Completed orders whose station was deleted get their own rows flagged
/// `deleted`, so the breakdown always sums to the totals.
pub async fn compute(pool: &SqlitePool, caller: &CurrentUser) -> ServiceResult<EarningsReport> {
    caller.require_seller()?;

    let owned = stations::names_for_seller(pool, caller.user_id).await?;
    let mut groups: HashMap<i64, orders::EarningsGroup> =
        orders::completed_totals_by_station(pool, caller.user_id)
            .await?
            .into_iter()
            .map(|g| (g.station_id, g))
            .collect();

    let mut breakdown: Vec<StationEarnings> = owned
        .into_iter()
        .map(|(station_id, name)| {
            let group = groups.remove(&station_id);
            StationEarnings {
                station_id,
                station_name: Some(name),
                earnings: group
                    .as_ref()
                    .map(|g| money::round_money(g.earnings))
                    .unwrap_or(0.0),
                orders_count: group.map(|g| g.orders_count).unwrap_or(0),
                deleted: false,
            }
        })
        .collect();

    // Whatever is left belongs to stations that no longer exist
    let mut orphans: Vec<_> = groups.into_values().collect();
    orphans.sort_by_key(|g| g.station_id);
    breakdown.extend(orphans.into_iter().map(|g| StationEarnings {
        station_id: g.station_id,
        station_name: None,
        earnings: money::round_money(g.earnings),
        orders_count: g.orders_count,
        deleted: true,
    }));

    Ok(EarningsReport {
        total_earnings: money::sum(breakdown.iter().map(|s| s.earnings))?,
        total_orders: breakdown.iter().map(|s| s.orders_count).sum(),
        station_breakdown: breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::testing::{customer, seller, station};
    use crate::services::{orders as order_service, stations as station_service};
    use shared::error::{AppError, ErrorCode};
    use shared::models::{OrderCreate, OrderStatusUpdate};

    async fn completed_order(
        pool: &SqlitePool,
        owner: &CurrentUser,
        buyer: &CurrentUser,
        station_id: i64,
        quantity: f64,
    ) {
        let order = order_service::create(
            pool,
            buyer,
            OrderCreate {
                station_id: Some(station_id),
                fuel_type: Some("diesel".into()),
                quantity: Some(quantity),
            },
        )
        .await
        .unwrap();
        for s in ["accepted", "completed"] {
            order_service::update_status(
                pool,
                owner,
                order.id,
                OrderStatusUpdate {
                    status: Some(s.into()),
                },
            )
            .await
            .unwrap();
        }
    }

    fn assert_sums_match(report: &EarningsReport) {
        let earnings = money::sum(report.station_breakdown.iter().map(|s| s.earnings)).unwrap();
        let orders: i64 = report.station_breakdown.iter().map(|s| s.orders_count).sum();
        assert_eq!(earnings, report.total_earnings);
        assert_eq!(orders, report.total_orders);
    }

    #[tokio::test]
    async fn test_breakdown_covers_each_station_once() {
        let pool = test_pool().await;
        let owner = seller(&pool, "Meera").await;
        let rival = seller(&pool, "Vikram").await;
        let buyer = customer(&pool, "Ali").await;
        let a = station(&pool, &owner, "A", 77.0, 13.0).await;
        let b = station(&pool, &owner, "B", 77.1, 13.1).await;
        let idle = station(&pool, &owner, "Idle", 77.2, 13.2).await;
        let theirs = station(&pool, &rival, "Theirs", 77.3, 13.3).await;

        completed_order(&pool, &owner, &buyer, a.id, 10.0).await;
        completed_order(&pool, &owner, &buyer, a.id, 0.5).await;
        completed_order(&pool, &owner, &buyer, b.id, 2.0).await;
        completed_order(&pool, &rival, &buyer, theirs.id, 100.0).await;

        // Pending orders do not count
        order_service::create(
            &pool,
            &buyer,
            OrderCreate {
                station_id: Some(b.id),
                fuel_type: Some("petrol".into()),
                quantity: Some(9.0),
            },
        )
        .await
        .unwrap();

        let report = compute(&pool, &owner).await.unwrap();
        assert_eq!(report.station_breakdown.len(), 3);
        for id in [a.id, b.id, idle.id] {
            assert_eq!(
                report
                    .station_breakdown
                    .iter()
                    .filter(|s| s.station_id == id)
                    .count(),
                1
            );
        }
        let row = |id: i64| {
            report
                .station_breakdown
                .iter()
                .find(|s| s.station_id == id)
                .unwrap()
        };
        assert_eq!(row(a.id).earnings, 945.0);
        assert_eq!(row(a.id).orders_count, 2);
        assert_eq!(row(b.id).earnings, 180.0);
        assert_eq!(row(idle.id).earnings, 0.0);
        assert_eq!(row(idle.id).orders_count, 0);

        assert_eq!(report.total_earnings, 1125.0);
        assert_eq!(report.total_orders, 3);
        assert_sums_match(&report);
    }

    #[tokio::test]
    async fn test_deleted_station_earnings_are_kept() {
        let pool = test_pool().await;
        let owner = seller(&pool, "Meera").await;
        let buyer = customer(&pool, "Ali").await;
        let kept = station(&pool, &owner, "Kept", 77.0, 13.0).await;
        let gone = station(&pool, &owner, "Gone", 77.1, 13.1).await;

        completed_order(&pool, &owner, &buyer, kept.id, 1.0).await;
        completed_order(&pool, &owner, &buyer, gone.id, 2.0).await;
        station_service::delete(&pool, &owner, gone.id).await.unwrap();

        let report = compute(&pool, &owner).await.unwrap();
        assert_eq!(report.station_breakdown.len(), 2);
        let orphan = report
            .station_breakdown
            .iter()
            .find(|s| s.station_id == gone.id)
            .unwrap();
        assert!(orphan.deleted);
        assert_eq!(orphan.station_name, None);
        assert_eq!(orphan.earnings, 180.0);
        assert_eq!(report.total_earnings, 270.0);
        assert_sums_match(&report);
    }

    #[tokio::test]
    async fn test_seller_without_stations() {
        let pool = test_pool().await;
        let owner = seller(&pool, "Meera").await;
        let report = compute(&pool, &owner).await.unwrap();
        assert_eq!(report.total_earnings, 0.0);
        assert_eq!(report.total_orders, 0);
        assert!(report.station_breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_customers_have_no_earnings() {
        let pool = test_pool().await;
        let buyer = customer(&pool, "Ali").await;
        let err = compute(&pool, &buyer).await.unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::SellerRequired);
    }
}
