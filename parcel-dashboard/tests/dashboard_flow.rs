use async_trait::async_trait;
use parcel_core::{
    GeoPoint, InMemoryOrderRepository, Order, OrderId, OrderRepository, OrderStatus,
    RepositoryResult,
};
use parcel_dashboard::{checked_orders, filter_orders, run_session};
use parcel_state::{
    LoadStatus, OrderFilters, StatusFilter, StoreContext, StoreSettings, ToastKind,
};
use std::sync::Arc;
use std::time::Duration;

fn order(id: u64, sender: &str, receiver: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId(id),
        sender_city: sender.to_string(),
        receiver_city: receiver.to_string(),
        pickup: GeoPoint { lat: 55.75, lng: 37.62 },
        delivery: GeoPoint { lat: 59.93, lng: 30.33 },
        status,
        date: "2024-03-01".to_string(),
        weight: 4.0,
    }
}

fn fleet() -> Vec<Order> {
    vec![
        order(1, "Moscow", "Kazan", OrderStatus::New),
        order(2, "Kazan", "Perm", OrderStatus::InTransit),
        order(3, "Perm", "Moscow", OrderStatus::Delivered),
    ]
}

struct OfflineRepository;

#[async_trait]
impl OrderRepository for OfflineRepository {
    async fn fetch_orders(&self) -> RepositoryResult<Vec<Order>> {
        Err("network unreachable".into())
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_loads_filters_and_announces() {
    let repo = Arc::new(InMemoryOrderRepository::new(fleet()));
    let ctx = StoreContext::new(repo, &StoreSettings::default());
    let filters = OrderFilters {
        status: StatusFilter::All,
        city_query: "moscow".to_string(),
        ..OrderFilters::default()
    };

    let report = run_session(&ctx, filters).await;

    assert_eq!(report.total, 3);
    assert!(report.error.is_none());
    let shown: Vec<OrderId> = report.shown.iter().map(|order| order.id).collect();
    assert_eq!(shown, vec![OrderId(1), OrderId(3)]);

    let toasts = ctx.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, "Loaded 3 orders");

    tokio::time::sleep(Duration::from_millis(3001)).await;
    tokio::task::yield_now().await;
    assert!(ctx.toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_session_reports_configured_message() {
    let settings = StoreSettings {
        load_error_message: "Не удалось загрузить заказы".to_string(),
        toast_timeout_ms: 0,
    };
    let ctx = StoreContext::new(Arc::new(OfflineRepository), &settings);

    let report = run_session(&ctx, OrderFilters::default()).await;

    assert_eq!(report.total, 0);
    assert!(report.shown.is_empty());
    assert_eq!(report.error.as_deref(), Some("Не удалось загрузить заказы"));
    assert_eq!(ctx.orders.status(), LoadStatus::Failed);
    assert_eq!(ctx.orders.snapshot().last_failure.as_deref(), Some("network unreachable"));

    tokio::time::sleep(Duration::from_secs(60)).await;
    let toasts = ctx.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);

    ctx.toasts.remove_toast(toasts[0].id);
    assert!(ctx.toasts.is_empty());
}

#[tokio::test]
async fn test_edit_flow_reconciles_through_store() {
    let repo = Arc::new(InMemoryOrderRepository::new(fleet()));
    let ctx = StoreContext::new(repo, &StoreSettings::default());
    ctx.orders.load_orders().await;

    ctx.orders.select(Some(OrderId(2)));
    ctx.edit.open(OrderId(2));
    let mut draft = ctx.orders.selected_order().unwrap();
    draft.status = OrderStatus::Delivered;
    ctx.orders.update_order(draft);
    ctx.edit.close();

    assert!(!ctx.edit.is_open());
    assert_eq!(ctx.orders.selected_order().unwrap().status, OrderStatus::Delivered);

    ctx.filters.set_status(StatusFilter::Only(OrderStatus::Delivered));
    let orders = ctx.orders.snapshot();
    let delivered: Vec<u64> = filter_orders(&orders, &ctx.filters.snapshot())
        .iter()
        .map(|order| order.id.0)
        .collect();
    assert_eq!(delivered, vec![2, 3]);

    ctx.orders.toggle_checked(OrderId(3));
    ctx.orders.toggle_checked(OrderId(1));
    let orders = ctx.orders.snapshot();
    let checked: Vec<u64> = checked_orders(&orders).iter().map(|order| order.id.0).collect();
    assert_eq!(checked, vec![1, 3]);
}
