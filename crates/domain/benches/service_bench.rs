use common::{LineId, OrderId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CreateOrder, OrderLineInput, OrderService};
use order_store::{InMemoryOrderStore, Order, OrderLine, Sku};

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/create_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = OrderService::new(InMemoryOrderStore::new());
                let cmd = CreateOrder::with_lines(vec![
                    OrderLineInput::new("A1", 2),
                    OrderLineInput::new("B1", 1),
                ]);
                service.create_order(Some(cmd)).await.unwrap();
            });
        });
    });
}

fn bench_update_existing_line(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = OrderService::new(InMemoryOrderStore::with_demo_data());
    let mut quantity = 1;

    c.bench_function("domain/update_existing_line", |b| {
        b.iter(|| {
            quantity = quantity % 100 + 1;
            rt.block_on(async {
                service
                    .update_order_line(
                        OrderId::new(1),
                        OrderLineInput::existing(LineId::new(1), "A1", quantity),
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_add_then_delete_line(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = OrderService::new(InMemoryOrderStore::with_demo_data());

    c.bench_function("domain/add_then_delete_line", |b| {
        b.iter(|| {
            rt.block_on(async {
                let line_id = service
                    .update_order_line(OrderId::new(2), OrderLineInput::new("A1", 1))
                    .await
                    .unwrap();
                service
                    .delete_order_line(OrderId::new(2), line_id)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get_order_large_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryOrderStore::new();

    // Pre-populate: 1000 orders with 3 lines each
    rt.block_on(async {
        let mut next_line = 1;
        for id in 1..=1000 {
            let lines = ["A1", "A2", "B1"]
                .iter()
                .enumerate()
                .map(|(i, code)| {
                    OrderLine::new(Sku::new(*code, format!("Product {code}")), 1)
                        .with_id(LineId::new(next_line + i as u32))
                        .with_sort_order(10 * (i as i32 + 1))
                })
                .collect();
            next_line += 3;
            store.seed_order(Order::new(OrderId::new(id), lines)).await;
        }
    });
    let service = OrderService::new(store);

    c.bench_function("domain/get_order_1000_orders", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.get_order(OrderId::new(500)).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_update_existing_line,
    bench_add_then_delete_line,
    bench_get_order_large_store,
);
criterion_main!(benches);
