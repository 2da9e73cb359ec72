use super::*;

// ========== add_to_order ==========

#[test]
fn test_add_accumulates_and_normalizes_key() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);

    assert_eq!(ledger.add_to_order("Soda", 3).unwrap(), 3);
    assert_eq!(ledger.add_to_order("  SODA ", 2).unwrap(), 5);
    assert_eq!(ledger.pending().get("soda"), Some(5));
    assert_eq!(ledger.pending().len(), 1);
}

#[test]
fn test_add_unknown_item() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);

    let err = ledger.add_to_order("tea", 1).unwrap_err();
    assert!(matches!(err, LedgerError::ItemNotFound(ref k) if k == "tea"));
    assert!(err.is_not_found());
}

#[test]
fn test_add_rejects_non_positive_quantity() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);

    assert!(matches!(
        ledger.add_to_order("soda", 0),
        Err(LedgerError::InvalidQuantity(0))
    ));
    assert!(matches!(
        ledger.add_to_order("soda", -2),
        Err(LedgerError::InvalidQuantity(-2))
    ));
    assert!(ledger.pending().is_empty());
}

#[test]
fn test_add_rejects_blank_item() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);

    assert!(matches!(
        ledger.add_to_order("   ", 1),
        Err(LedgerError::InvalidArgument { field: Field::Item, .. })
    ));
}

#[test]
fn test_add_beyond_stock() {
    let (mut ledger, _) = ledger_with(&[("pizza", 1, "25.00")]);

    let err = ledger.add_to_order("pizza", 2).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientStock { ref item, requested: 2, available: 1 } if item == "pizza"
    ));
    assert!(ledger.pending().is_empty());
}

#[test]
fn test_add_counts_existing_pending_quantity() {
    let (mut ledger, _) = ledger_with(&[("soda", 5, "2.00")]);

    ledger.add_to_order("soda", 4).unwrap();
    assert!(ledger.add_to_order("soda", 2).is_err());
    assert_eq!(ledger.pending().get("soda"), Some(4));
    assert_eq!(ledger.add_to_order("soda", 1).unwrap(), 5);
}

// ========== adjust / remove / undo ==========

#[test]
fn test_adjust_updates_and_removes() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);
    ledger.add_to_order("soda", 3).unwrap();

    assert_eq!(
        ledger.adjust_order_quantity("soda", 2).unwrap(),
        QuantityChange::Updated(5)
    );
    assert_eq!(
        ledger.adjust_order_quantity("soda", -1).unwrap(),
        QuantityChange::Updated(4)
    );
    assert_eq!(
        ledger.adjust_order_quantity("soda", -4).unwrap(),
        QuantityChange::Removed
    );
    assert!(ledger.pending().is_empty());
    assert_eq!(
        ledger.last_removed(),
        Some(&RemovedLine {
            item: "soda".into(),
            quantity: 4
        })
    );
}

#[test]
fn test_adjust_missing_line() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);

    assert!(matches!(
        ledger.adjust_order_quantity("soda", 1),
        Err(LedgerError::NotInOrder(_))
    ));
}

#[test]
fn test_adjust_beyond_stock_leaves_state() {
    let (mut ledger, _) = ledger_with(&[("soda", 5, "2.00")]);
    ledger.add_to_order("soda", 3).unwrap();

    assert!(matches!(
        ledger.adjust_order_quantity("soda", 3),
        Err(LedgerError::InsufficientStock { requested: 6, available: 5, .. })
    ));
    assert_eq!(ledger.pending().get("soda"), Some(3));
}

#[test]
fn test_remove_is_idempotent() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00")]);
    ledger.add_to_order("soda", 3).unwrap();

    assert!(ledger.remove_from_order("SODA"));
    assert!(!ledger.remove_from_order("soda"));
    assert!(!ledger.remove_from_order("never-added"));
    // a no-op removal does not clobber the undo slot
    assert_eq!(ledger.last_removed().map(|l| l.quantity), Some(3));
}

#[test]
fn test_undo_restores_exact_quantity_once() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00"), ("fries", 4, "3.50")]);
    ledger.add_to_order("soda", 3).unwrap();
    ledger.add_to_order("fries", 1).unwrap();
    ledger.remove_from_order("soda");

    let restored = ledger.undo_last_removal().unwrap().unwrap();
    assert_eq!(restored.item, "soda");
    assert_eq!(restored.quantity, 3);
    assert_eq!(ledger.pending().get("soda"), Some(3));

    assert!(ledger.undo_last_removal().unwrap().is_none());
    assert_eq!(ledger.pending().get("soda"), Some(3));
}

#[test]
fn test_undo_keeps_only_latest_removal() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00"), ("fries", 4, "3.50")]);
    ledger.add_to_order("soda", 3).unwrap();
    ledger.add_to_order("fries", 2).unwrap();
    ledger.remove_from_order("soda");
    ledger.remove_from_order("fries");

    assert_eq!(ledger.undo_last_removal().unwrap().unwrap().item, "fries");
    assert!(ledger.undo_last_removal().unwrap().is_none());
    assert_eq!(ledger.pending().get("soda"), None);
}

#[test]
fn test_undo_checks_combined_quantity() {
    let (mut ledger, _) = ledger_with(&[("soda", 5, "2.00")]);
    ledger.add_to_order("soda", 3).unwrap();
    ledger.remove_from_order("soda");
    ledger.add_to_order("soda", 4).unwrap();

    // 4 pending + 3 restored > 5 on hand
    assert!(matches!(
        ledger.undo_last_removal(),
        Err(LedgerError::InsufficientStock { requested: 7, available: 5, .. })
    ));
    assert!(ledger.last_removed().is_some());

    ledger.restock_or_define_item("soda", 2, Decimal::ZERO, "", "").unwrap();
    assert!(ledger.undo_last_removal().unwrap().is_some());
    assert_eq!(ledger.pending().get("soda"), Some(7));
}

#[test]
fn test_clear_order() {
    let (mut ledger, _) = ledger_with(&[("soda", 10, "2.00"), ("fries", 4, "3.50")]);
    ledger.add_to_order("soda", 3).unwrap();
    ledger.add_to_order("fries", 1).unwrap();
    ledger.remove_from_order("fries");

    ledger.clear_order();
    assert!(ledger.pending().is_empty());
    assert!(ledger.undo_last_removal().unwrap().is_none());
    assert_eq!(ledger.item("soda").unwrap().quantity, 10);
}

// ========== restock / price ==========

#[test]
fn test_restock_creates_item_with_defaults() {
    let (mut ledger, catalog) = ledger_with(&[]);

    let outcome = ledger
        .restock_or_define_item(" Chicken Wings ", 12, dec("8.50"), "", "  ")
        .unwrap();
    assert_eq!(outcome, RestockOutcome::Created);

    let item = ledger.item("chicken wings").unwrap();
    assert_eq!(item.quantity, 12);
    assert_eq!(item.price, dec("8.50"));
    assert_eq!(item.description, shared::models::DEFAULT_DESCRIPTION);
    assert_eq!(item.category, shared::models::DEFAULT_CATEGORY);
    assert_eq!(catalog.snapshot().get("chicken wings"), Some(item));
}

#[test]
fn test_restock_zero_price_keeps_existing_price() {
    let (mut ledger, catalog) = ledger_with(&[("fries", 3, "3.50")]);

    let outcome = ledger
        .restock_or_define_item("fries", 5, Decimal::ZERO, "", "")
        .unwrap();
    assert_eq!(outcome, RestockOutcome::Updated { quantity: 8 });

    let item = ledger.item("fries").unwrap();
    assert_eq!(item.price, dec("3.50"));
    assert_eq!(item.description, shared::models::DEFAULT_DESCRIPTION);
    assert_eq!(catalog.snapshot()["fries"].quantity, 8);
}

#[test]
fn test_restock_overwrites_supplied_fields() {
    let (mut ledger, _) = ledger_with(&[("fries", 3, "3.50")]);

    ledger
        .restock_or_define_item("fries", 0, dec("4.00"), "Crinkle cut", "Sides")
        .unwrap();

    let item = ledger.item("fries").unwrap();
    assert_eq!(item.quantity, 3);
    assert_eq!(item.price, dec("4.00"));
    assert_eq!(item.description, "Crinkle cut");
    assert_eq!(item.category, "Sides");
}

#[test]
fn test_restock_rejects_negative_input() {
    let (mut ledger, catalog) = ledger_with(&[("fries", 3, "3.50")]);

    assert!(matches!(
        ledger.restock_or_define_item("fries", -1, Decimal::ZERO, "", ""),
        Err(LedgerError::InvalidArgument { field: Field::Quantity, .. })
    ));
    assert!(matches!(
        ledger.restock_or_define_item("fries", 1, dec("-0.01"), "", ""),
        Err(LedgerError::InvalidArgument { field: Field::Price, .. })
    ));
    assert_eq!(ledger.item("fries").unwrap().quantity, 3);
    assert_eq!(catalog.save_count(), 0);
}

#[test]
fn test_restock_save_failure_restores_item() {
    let (mut ledger, catalog) = ledger_with(&[("fries", 3, "3.50")]);
    catalog.set_failing(true);

    let err = ledger
        .restock_or_define_item("fries", 5, dec("9.99"), "", "")
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(ledger.item("fries").unwrap().quantity, 3);
    assert_eq!(ledger.item("fries").unwrap().price, dec("3.50"));

    let err = ledger
        .restock_or_define_item("onion rings", 5, dec("4.00"), "", "")
        .unwrap_err();
    assert!(err.is_persistence());
    assert!(ledger.item("onion rings").is_none());
}

#[test]
fn test_update_item_price() {
    let (mut ledger, catalog) = ledger_with(&[("soda", 10, "2.00")]);

    ledger.update_item_price("Soda", dec("2.25")).unwrap();
    assert_eq!(ledger.item("soda").unwrap().price, dec("2.25"));
    assert_eq!(catalog.snapshot()["soda"].price, dec("2.25"));

    assert!(matches!(
        ledger.update_item_price("tea", dec("1.00")),
        Err(LedgerError::ItemNotFound(_))
    ));
    assert!(matches!(
        ledger.update_item_price("soda", dec("-1")),
        Err(LedgerError::InvalidArgument { field: Field::Price, .. })
    ));

    catalog.set_failing(true);
    assert!(ledger.update_item_price("soda", dec("3.00")).is_err());
    assert_eq!(ledger.item("soda").unwrap().price, dec("2.25"));
}

#[test]
fn test_low_stock_items_sorted() {
    let (ledger, _) = ledger_with(&[("soda", 10, "2.00"), ("fries", 2, "3.50"), ("burger", 5, "9.00")]);

    let low = ledger.low_stock_items(5);
    let keys: Vec<_> = low.iter().map(|i| i.item.as_str()).collect();
    assert_eq!(keys, vec!["burger", "fries"]);
    assert_eq!(low[1].quantity, 2);
    assert!(ledger.low_stock_items(0).is_empty());
}
