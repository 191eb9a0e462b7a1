use invoice_ledger::domain::identity::IdentityToken;
use invoice_ledger::domain::invoice::InvoiceStatus;
use invoice_ledger::error::LedgerError;
use proptest::prelude::*;
use tokio::runtime::Runtime;

mod common;

fn token() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..48)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn approve_succeeds_iff_identity_matches(buyer in token(), caller in token()) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = common::engine();
            let buyer = IdentityToken::new(buyer);
            let caller = IdentityToken::new(caller);
            engine
                .create_invoice(common::invoice(1, &common::identity(b"S"), &buyer))
                .await
                .unwrap();

            let result = engine.approve_invoice(1, &caller).await;
            let status = engine.invoice_info(1, &buyer).await.unwrap().status;

            if caller == buyer {
                prop_assert!(result.is_ok());
                prop_assert_eq!(status, InvoiceStatus::Approved);
            } else {
                let is_auth_error = matches!(result, Err(LedgerError::AuthorizationError { .. }));
                prop_assert!(is_auth_error);
                prop_assert_eq!(status, InvoiceStatus::Pending);
            }
            Ok(())
        })?;
    }

    #[test]
    fn second_assignment_always_conflicts(
        first_payer in 0i32..i32::MAX,
        second_payer in 0i32..i32::MAX,
        second_identity in token(),
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = common::engine();
            let buyer = common::identity(b"B");
            let payer = common::identity(b"P");
            engine
                .create_invoice(common::invoice(1, &common::identity(b"S"), &buyer))
                .await
                .unwrap();
            engine
                .create_payment_request(common::payment_request(5, 1, &buyer))
                .await
                .unwrap();
            engine
                .assign_payment_request(5, first_payer, payer.clone())
                .await
                .unwrap();

            let result = engine
                .assign_payment_request(5, second_payer, IdentityToken::new(second_identity))
                .await;
            let is_conflict = matches!(result, Err(LedgerError::ConflictError(_)));
            prop_assert!(is_conflict);

            // the original payer still proves identity; the row is unchanged
            let view = engine.payment_info(5, first_payer, &payer).await.unwrap();
            prop_assert_eq!(view.discount_rate, 3);
            let unchanged = engine
                .payment_info(5, first_payer.wrapping_add(1), &payer)
                .await;
            prop_assert!(unchanged.is_ok());
            Ok(())
        })?;
    }

    #[test]
    fn duplicate_invoice_never_mutates(price in any::<i32>(), other_price in any::<i32>()) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let engine = common::engine();
            let buyer = common::identity(b"B");
            let mut first = common::invoice(9, &common::identity(b"S"), &buyer);
            first.price = price;
            engine.create_invoice(first).await.unwrap();

            let mut second = common::invoice(9, &common::identity(b"S2"), &common::identity(b"B2"));
            second.price = other_price;
            let result = engine.create_invoice(second).await;
            let is_duplicate = matches!(result, Err(LedgerError::DuplicateKeyError { key: 9, .. }));
            prop_assert!(is_duplicate);

            let view = engine.invoice_info(9, &buyer).await.unwrap();
            prop_assert_eq!(view.price, price);
            Ok(())
        })?;
    }
}
