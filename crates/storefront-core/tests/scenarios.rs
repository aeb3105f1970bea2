//! End-to-end cart scenarios against the public API.

use storefront_core::prelude::*;

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

fn id(n: u64) -> ProductId {
    ProductId::new(n)
}

fn product(n: u64, cents: i64) -> Product {
    Product::new(id(n), format!("Product {n}"), usd(cents))
}

fn store_with(prices: &[(u64, i64)]) -> Storefront {
    let products: Vec<Product> = prices.iter().map(|&(n, cents)| product(n, cents)).collect();
    let detail = products[0].clone();
    Storefront::from_parts(&products, detail, Currency::USD, TaxRate::DEFAULT).unwrap()
}

fn assert_totals(store: &Storefront, subtotal: i64, tax: i64, total: i64) {
    let totals = store.totals();
    assert_eq!(totals.subtotal, usd(subtotal), "subtotal");
    assert_eq!(totals.tax, usd(tax), "tax");
    assert_eq!(totals.total, usd(total), "total");
}

fn assert_line(store: &Storefront, n: u64, count: u32, total: i64) {
    let line = store.cart().get(id(n)).expect("line item present");
    assert!(line.in_cart);
    assert_eq!(line.count, count);
    assert_eq!(line.total, usd(total));
}

fn assert_reset(store: &Storefront, n: u64) {
    let product = store.catalog().lookup(id(n)).unwrap();
    assert!(!product.in_cart);
    assert_eq!(product.count, 0);
    assert!(product.total.is_zero());
}

#[test]
fn test_scenarios_a_through_d() {
    let mut store = store_with(&[(1, 1000)]);

    // A: add
    store.add_to_cart(id(1)).unwrap();
    assert_eq!(store.cart().unique_item_count(), 1);
    assert_line(&store, 1, 1, 1000);
    assert_totals(&store, 1000, 100, 1100);
    store.verify().unwrap();

    // B: increment
    store.increment(id(1)).unwrap();
    assert_line(&store, 1, 2, 2000);
    assert_totals(&store, 2000, 200, 2200);
    store.verify().unwrap();

    // C: decrement
    store.decrement(id(1)).unwrap();
    assert_line(&store, 1, 1, 1000);
    assert_totals(&store, 1000, 100, 1100);
    store.verify().unwrap();

    // D: decrement at count 1 removes the item
    store.decrement(id(1)).unwrap();
    assert!(store.cart().is_empty());
    assert_reset(&store, 1);
    assert_totals(&store, 0, 0, 0);
    store.verify().unwrap();
}

#[test]
fn test_scenario_e_clear_cart() {
    let mut store = store_with(&[(1, 1000), (2, 500)]);

    store.add_to_cart(id(1)).unwrap();
    store.add_to_cart(id(2)).unwrap();
    store.increment(id(1)).unwrap();
    store.increment(id(2)).unwrap();
    store.decrement(id(2)).unwrap();
    assert_line(&store, 1, 2, 2000);
    assert_line(&store, 2, 1, 500);

    store.clear_cart().unwrap();

    assert!(store.cart().is_empty());
    assert_reset(&store, 1);
    assert_reset(&store, 2);
    assert!(store.totals().is_zero());
    store.verify().unwrap();
}

#[test]
fn test_add_then_remove_round_trip() {
    let mut store = store_with(&[(1, 1000), (2, 500)]);
    let before = store.catalog().lookup(id(2)).unwrap().clone();

    store.add_to_cart(id(2)).unwrap();
    store.remove_item(id(2)).unwrap();

    assert!(!store.cart().contains(id(2)));
    assert_eq!(store.catalog().lookup(id(2)).unwrap(), &before);
    assert!(store.totals().is_zero());
}

#[test]
fn test_cart_keeps_add_order() {
    let mut store = store_with(&[(1, 100), (2, 200), (3, 300)]);
    store.add_to_cart(id(3)).unwrap();
    store.add_to_cart(id(1)).unwrap();
    store.add_to_cart(id(2)).unwrap();

    let order: Vec<ProductId> = store.cart().items().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![id(3), id(1), id(2)]);
}

#[test]
fn test_unknown_ids_never_change_state() {
    let mut store = store_with(&[(1, 1000)]);
    store.add_to_cart(id(1)).unwrap();
    let before = store.snapshot();

    for command in [
        Command::SelectForDetail(id(9)),
        Command::AddToCart(id(9)),
        Command::OpenModal(id(9)),
        Command::Increment(id(9)),
        Command::Decrement(id(9)),
        Command::RemoveItem(id(9)),
    ] {
        assert!(!store.apply(command).is_applied(), "{command} should be ignored");
        assert_eq!(store.snapshot(), before);
    }
}

#[test]
fn test_invariants_hold_across_a_session() {
    let mut store = Storefront::new(&ProductFeed::sample().unwrap()).unwrap();
    let script = [
        "add:1", "add:3", "inc:3", "inc:3", "detail:3", "open:7", "add:7", "close", "dec:3",
        "inc:1", "remove:7", "add:7", "add:7", "dec:1", "dec:1", "inc:9", "clear", "add:8",
        "inc:8", "dec:8", "dec:8", "dec:8",
    ];

    for text in script {
        let command: Command = text.parse().unwrap();
        store.apply(command);
        store.verify().unwrap_or_else(|e| panic!("after {text}: {e}"));

        let totals = *store.totals();
        let expected_tax = TaxRate::DEFAULT.tax_on(totals.subtotal).unwrap();
        assert_eq!(totals.tax, expected_tax);
        assert_eq!(
            totals.total.amount_cents,
            totals.subtotal.amount_cents + totals.tax.amount_cents
        );
        let first = totals;
        let second = *store.compute_totals().unwrap();
        assert_eq!(first, second);
    }

    assert!(store.cart().is_empty());
    assert!(store.totals().is_zero());
}

#[test]
fn test_increment_is_bounded_only_by_arithmetic() {
    let mut store = store_with(&[(1, 1)]);
    store.add_to_cart(id(1)).unwrap();
    for _ in 0..12_000 {
        store.increment(id(1)).unwrap();
    }
    assert_line(&store, 1, 12_001, 12_001);
    store.verify().unwrap();

    let products = vec![Product::new(id(2), "Bullion", usd(i64::MAX / 3))];
    let detail = products[0].clone();
    let no_tax = TaxRate::from_basis_points(0);
    let mut store = Storefront::from_parts(&products, detail, Currency::USD, no_tax).unwrap();
    store.add_to_cart(id(2)).unwrap();
    store.increment(id(2)).unwrap();
    store.increment(id(2)).unwrap();
    let before = store.snapshot();

    assert!(matches!(store.increment(id(2)), Err(CommerceError::Overflow)));
    assert!(!store.apply(Command::Increment(id(2))).is_applied());
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.cart().get(id(2)).unwrap().count, 3);
}

#[test]
fn test_snapshot_serializes() {
    let mut store = store_with(&[(1, 1000)]);
    store.add_to_cart(id(1)).unwrap();
    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json["cart"][0]["count"], 1);
    assert_eq!(json["totals"]["total"]["amount_cents"], 1100);
    assert_eq!(json["item_count"], 1);
}
