use shopstore_core::{
    AttributeRecord, Attributes, Category, Discount, DiscountStatus, DiscountType, Entity, Media,
    MediaStatus, Order, OrderLineItem, OrderLineItemStatus, OrderStatus, Product, ProductStatus,
};

#[test]
fn new_entities_start_with_defaults_and_no_id() {
    let product = Product::new();
    assert_eq!(product.id(), "");
    assert_eq!(product.status_kind(), Some(ProductStatus::Draft));
    assert_eq!(product.price(), "0.00");
    assert_eq!(product.quantity(), "0");
    assert!(product.is_free());
    assert!(!product.is_soft_deleted());

    assert_eq!(Order::new().status_kind(), Some(OrderStatus::Pending));
    assert_eq!(
        OrderLineItem::new().status_kind(),
        Some(OrderLineItemStatus::Active)
    );
    assert_eq!(Media::new().status_kind(), Some(MediaStatus::Draft));
    assert!(Category::new().is_root());
    assert_eq!(Discount::new().discount_type(), Some(DiscountType::Amount));
}

#[test]
fn hydrated_entity_is_clean_until_a_value_changes() {
    let mut row = Attributes::new();
    row.insert("id".to_string(), "p-1".to_string());
    row.insert("title".to_string(), "Mug".to_string());
    row.insert("status".to_string(), "active".to_string());
    let mut product = Product::from_record(AttributeRecord::from_row(row));

    assert!(product.data_changed().is_empty());
    assert!(product.is_active());

    product.set_title("Mug");
    assert!(product.data_changed().is_empty());

    product.set_title("Big mug").set_price_float(7.5);
    let changed = product.data_changed();
    assert_eq!(changed.len(), 2);
    assert_eq!(changed["title"], "Big mug");
    assert_eq!(changed["price"], "7.50");

    product.mark_as_not_dirty();
    assert!(product.data_changed().is_empty());
    assert_eq!(product.title(), "Big mug");
}

#[test]
fn malformed_numbers_and_metas_read_as_zero_values() {
    let mut row = Attributes::new();
    row.insert("price".to_string(), "abc".to_string());
    row.insert("quantity".to_string(), "".to_string());
    row.insert("metas".to_string(), "not json".to_string());
    let item = OrderLineItem::from_record(AttributeRecord::from_row(row));

    assert_eq!(item.price_float(), 0.0);
    assert_eq!(item.quantity_int(), 0);
    assert!(item.metas().is_empty());
    assert_eq!(item.meta("missing"), "");
    assert_eq!(item.line_total(), 0.0);
}

#[test]
fn unknown_status_text_has_no_typed_status() {
    let mut row = Attributes::new();
    row.insert("status".to_string(), "archived".to_string());
    let order = Order::from_record(AttributeRecord::from_row(row));

    assert_eq!(order.status(), "archived");
    assert_eq!(order.status_kind(), None);
}

#[test]
fn order_final_states() {
    assert!(OrderStatus::Completed.is_final());
    assert!(OrderStatus::Cancelled.is_final());
    assert!(!OrderStatus::Pending.is_final());
    assert!(!OrderStatus::AwaitingPayment.is_final());
    assert_eq!(
        OrderStatus::parse("manual_verification_required"),
        Some(OrderStatus::ManualVerificationRequired)
    );
}

#[test]
fn discount_window_bounds_are_inclusive() {
    let mut discount = Discount::new();
    discount
        .set_status(DiscountStatus::Active)
        .set_starts_at("2024-01-01 00:00:00")
        .set_ends_at("2024-01-31 23:59:59");

    assert!(discount.is_applicable_at("2024-01-01 00:00:00"));
    assert!(discount.is_applicable_at("2024-01-31 23:59:59"));
    assert!(!discount.is_applicable_at("2023-12-31 23:59:59"));
    assert!(!discount.is_applicable_at("2024-02-01 00:00:00"));
}

#[test]
fn status_enums_serialize_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&OrderStatus::AwaitingFulfillment).unwrap(),
        "\"awaiting_fulfillment\""
    );
    let parsed: ProductStatus = serde_json::from_str("\"inactive\"").unwrap();
    assert_eq!(parsed, ProductStatus::Inactive);
    assert_eq!(String::from(MediaStatus::Active), "active");
}
