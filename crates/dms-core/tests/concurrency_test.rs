//! Integration test: concurrent queries and registration against one handler

use std::sync::Arc;
use std::thread;

use dms_core::{AliasResolver, ConversionRegistry, ErrorKind, MapHandler};

#[derive(Debug, Clone, PartialEq)]
struct Order {
    number: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Invoice {
    reference: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Receipt {
    reference: String,
}

fn setup() -> (Arc<AliasResolver>, Arc<ConversionRegistry>, MapHandler) {
    let resolver = Arc::new(AliasResolver::new());
    resolver.register::<Order>("Shop.Order").unwrap();
    resolver.register::<Invoice>("Billing.Invoice").unwrap();

    let registry = Arc::new(ConversionRegistry::new());
    registry.register_fn(|o: &Order| Invoice {
        reference: format!("INV-{:05}", o.number),
    });

    let handler = MapHandler::new(registry.clone(), resolver.clone());
    (resolver, registry, handler)
}

#[test]
fn concurrent_queries_share_one_handler() {
    let (_, _, handler) = setup();

    thread::scope(|scope| {
        for worker in 0..8_u32 {
            let handler = &handler;
            scope.spawn(move || {
                for i in 0..100_u32 {
                    let number = worker * 1000 + i;
                    let invoice: Invoice = handler
                        .map_into(&Order { number }, "Shop.Order", "Billing.Invoice")
                        .unwrap();
                    assert_eq!(invoice.reference, format!("INV-{number:05}"));
                }
            });
        }
    });
}

#[test]
fn registration_during_query_phase_becomes_visible() -> anyhow::Result<()> {
    let (resolver, registry, handler) = setup();
    let invoice = Invoice {
        reference: "INV-00001".to_string(),
    };

    let err = handler
        .map(Some(&invoice), "Billing.Invoice", "Billing.Receipt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AliasNotFound);

    thread::scope(|scope| {
        scope.spawn(|| {
            resolver.register::<Receipt>("Billing.Receipt").unwrap();
            registry.register_fn(|i: &Invoice| Receipt {
                reference: i.reference.clone(),
            });
        });
        scope.spawn(|| {
            for _ in 0..50 {
                let invoice = handler.map(
                    Some(&Order { number: 7 }),
                    "Shop.Order",
                    "Billing.Invoice",
                );
                assert!(invoice.is_ok_and(|mapped| mapped.is::<Invoice>()));
            }
        });
    });

    let receipt: Receipt = handler.map_into(&invoice, "Billing.Invoice", "Billing.Receipt")?;
    assert_eq!(receipt.reference, "INV-00001");
    Ok(())
}
