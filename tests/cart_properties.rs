//! Property tests for cart mutation sequences.
//!
//! Random sequences of add/increment/decrement/remove/clear are applied to a cart and
//! the invariants are checked after every single step.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;

use cartwheel::prelude::*;

fn price() -> impl Strategy<Value = Decimal> {
    // Two decimal places, up to 999.99
    (0_i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn product_id() -> impl Strategy<Value = ProductId> {
    (1_u64..6).prop_map(ProductId::new)
}

fn action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        3 => (product_id(), price(), 1_u32..4).prop_map(|(id, price, quantity)| {
            CartAction::Add(NewLineItem::new(id, price).with_quantity(quantity))
        }),
        2 => product_id().prop_map(CartAction::Increment),
        3 => product_id().prop_map(CartAction::Decrement),
        1 => product_id().prop_map(CartAction::Remove),
        1 => Just(CartAction::Clear),
    ]
}

fn rounding() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Nearest),
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
    ]
}

fn recomputed_total(cart: &Cart) -> Decimal {
    let sum: Decimal = cart
        .items()
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity.get()))
        .sum();

    cart.rounding().round(sum)
}

proptest! {
    #[test]
    fn invariants_hold_after_every_action(
        mode in rounding(),
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let mut cart = Cart::default().with_rounding(mode);

        for action in actions {
            let total = cart.apply(action)?;

            // No zero quantities can be represented, but check the count anyway.
            prop_assert!(cart.items().iter().all(|line| line.quantity.get() >= 1));

            let ids: HashSet<ProductId> = cart.items().iter().map(|line| line.id).collect();
            prop_assert_eq!(ids.len(), cart.len());

            prop_assert_eq!(total, recomputed_total(&cart));
            prop_assert_eq!(total, cart.total());
        }
    }

    #[test]
    fn add_twice_matches_add_then_increment(id in product_id(), price in price()) {
        let item = NewLineItem::new(id, price);

        let mut twice = Cart::default();
        twice.add(item.clone())?;
        twice.add(item.clone())?;

        let mut incremented = Cart::default();
        incremented.add(item)?;
        incremented.increment(id);

        prop_assert_eq!(twice.len(), 1);
        prop_assert_eq!(twice.quantity_of(id), 2);
        prop_assert_eq!(twice, incremented);
    }

    #[test]
    fn clear_always_empties(actions in prop::collection::vec(action(), 0..20)) {
        let mut cart = Cart::default();

        for action in actions {
            cart.apply(action)?;
        }

        prop_assert_eq!(cart.clear(), Decimal::ZERO);
        prop_assert!(cart.is_empty());
        prop_assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn single_unit_decrement_removes_then_noops(id in product_id(), price in price()) {
        let mut cart = Cart::default();
        cart.add(NewLineItem::new(id, price))?;

        cart.decrement(id);
        prop_assert!(cart.get(id).is_none());

        let before = cart.clone();
        cart.decrement(id);
        prop_assert_eq!(cart, before);
    }
}
