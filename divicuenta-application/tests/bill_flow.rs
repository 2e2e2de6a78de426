mod support;

use divicuenta_application::{
    BillSession, DinerValidationError, HistoryLedger, NewDiner, PaymentUpdate,
};
use divicuenta_domain::{DinerId, ItemId, Money};
use divicuenta_i18n as i18n;
use rstest::{fixture, rstest};
use support::{FixedClock, MemoryStore, SequentialIds};

struct Fixture {
    store: MemoryStore,
    clock: FixedClock,
    ids: SequentialIds,
}

#[fixture]
fn env() -> Fixture {
    Fixture {
        store: MemoryStore::new(),
        clock: FixedClock::default(),
        ids: SequentialIds::default(),
    }
}

fn diner<'a>(name: &'a str) -> NewDiner<'a> {
    NewDiner {
        name,
        email: "",
        phone: "912345678",
    }
}

/// Pizza shared by A and B, soda for A only.
fn pizza_night<'a>(session: &mut BillSession<'a>) -> (ItemId, ItemId, DinerId, DinerId) {
    session.set_restaurant("La Picá");
    let pizza = session.add_item("Pizza", Money::from_i64(10_000)).id.clone();
    let soda = session.add_item("Soda", Money::from_i64(2_000)).id.clone();
    let a = session.add_diner(diner("Ana")).expect("valid diner").id.clone();
    let b = session.add_diner(diner("Beto")).expect("valid diner").id.clone();
    session.toggle(&pizza, &a);
    session.toggle(&pizza, &b);
    session.toggle(&soda, &a);
    (pizza, soda, a, b)
}

#[rstest]
fn oversized_typed_price_is_capped(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let item = session.add_placeholder_item().id.clone();
    assert!(session.set_item_price_from_input(&item, "99999999999999999999"));
    let ana = session.add_diner(diner("Ana")).expect("valid diner").id.clone();
    session.toggle(&item, &ana);

    let allocation = session.allocate();

    assert_eq!(session.items()[0].price, Money::MAX_PRICE);
    assert_eq!(allocation.diner_bills[0].subtotal, Money::MAX_PRICE);
    assert_eq!(
        allocation.diner_bills[0].total,
        Money::from_i64(1_099_999_999_999)
    );
    assert_eq!(allocation.bill_total.total, Money::from_i64(1_099_999_999_999));
}

#[rstest]
fn live_and_history_allocations_match(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    pizza_night(&mut session);
    let live = session.allocate();

    let mut ledger = HistoryLedger::open(&env.store, &env.clock, &env.ids).expect("open ledger");
    let entry_id = ledger.add_entry(session.snapshot()).expect("add entry").id.clone();

    let recorded = ledger.allocation(&entry_id).expect("entry exists");
    assert_eq!(recorded, live);
    assert_eq!(live.diner_bills[0].total, Money::from_i64(7_700));
    assert_eq!(live.diner_bills[1].total, Money::from_i64(5_500));

    let entry = ledger.find(&entry_id).expect("entry exists");
    assert_eq!(entry.total, Money::from_i64(13_200));
    assert_eq!(entry.restaurant, "La Picá");
    assert_eq!(entry.date, env.clock.0);
    assert!(entry.payments.values().all(|paid| !paid));
    assert_eq!(entry.payments.len(), 2);
}

#[rstest]
fn history_is_detached_from_live_session(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let (pizza, soda, a, _) = pizza_night(&mut session);

    let mut ledger = HistoryLedger::open(&env.store, &env.clock, &env.ids).expect("open ledger");
    let entry_id = ledger.add_entry(session.snapshot()).expect("add entry").id.clone();
    let before = ledger.allocation(&entry_id).expect("entry exists");

    session.rename_item(&pizza, "Pizza grande");
    session.set_item_price(&pizza, Money::from_i64(99_000));
    session.delete_item(&soda);
    session.toggle(&pizza, &a);
    session.reset();

    assert_eq!(ledger.allocation(&entry_id), Some(before));
    let entry = ledger.find(&entry_id).expect("entry exists");
    assert_eq!(entry.items.len(), 2);
    assert_eq!(entry.items[0].name, "Pizza");
}

#[rstest]
fn deleting_item_removes_it_everywhere(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let (_, soda, a, _) = pizza_night(&mut session);

    assert!(session.delete_item(&soda));

    assert!(session.assignment().diners_for(&soda).is_none());
    let allocation = session.allocate();
    let bill = allocation.bill_for(&a).expect("diner bill");
    assert!(bill.lines.iter().all(|line| line.item_id != soda));
    assert_eq!(bill.subtotal, Money::from_i64(5_000));
    assert_eq!(allocation.bill_total.total, Money::from_i64(11_000));
}

#[rstest]
fn deleting_only_item_clears_assignment_gate(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let cake = session.add_item("Torta", Money::from_i64(1_000)).id.clone();
    let a = session.add_diner(diner("Ana")).expect("valid diner").id.clone();
    session.toggle(&cake, &a);
    assert!(session.has_assignments());

    session.delete_item(&cake);

    assert!(!session.has_assignments());
    let bill = session.allocate().diner_bills.remove(0);
    assert_eq!(
        (bill.subtotal, bill.tip, bill.total),
        (Money::zero(), Money::zero(), Money::zero())
    );
}

#[rstest]
fn re_added_diner_starts_without_assignments(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let (pizza, _, _, _) = pizza_night(&mut session);

    let again = session.add_diner(diner("Ana")).expect("valid diner").id.clone();

    assert!(!session.assignment().is_assigned(&pizza, &again));
    let allocation = session.allocate();
    assert_eq!(
        allocation.bill_for(&again).map(|bill| bill.total),
        Some(Money::zero())
    );
}

#[rstest]
fn invalid_diner_leaves_session_untouched(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let err = session
        .add_diner(NewDiner {
            name: "Ana",
            email: "",
            phone: "",
        })
        .expect_err("contact required");

    assert_eq!(err, DinerValidationError::MissingContact);
    assert!(session.diners().is_empty());
}

#[rstest]
fn diners_for_item_lists_sharing_diners(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let (pizza, soda, _, _) = pizza_night(&mut session);

    let pizza_names: Vec<&str> = session
        .diners_for_item(&pizza)
        .into_iter()
        .map(|diner| diner.name.as_str())
        .collect();
    assert_eq!(pizza_names, ["Ana", "Beto"]);
    assert_eq!(session.diners_for_item(&soda).len(), 1);
    assert!(session.diners_for_item(&ItemId::from("missing")).is_empty());
}

#[rstest]
fn snapshot_defaults_restaurant_and_prunes_stale_keys(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let item = session.add_placeholder_item().id.clone();
    assert_eq!(session.items()[0].name, i18n::PLACEHOLDER_ITEM);
    session.set_item_price_from_input(&item, "$4.500");
    let a = session.add_diner(diner("Ana")).expect("valid diner").id.clone();
    session.toggle(&item, &a);
    session.toggle(&ItemId::from("ghost"), &a);

    let snapshot = session.snapshot();

    assert_eq!(snapshot.restaurant, i18n::UNNAMED_BILL);
    assert_eq!(snapshot.total, Money::from_i64(4_950));
    assert_eq!(snapshot.assignments.len(), 1);
}

#[rstest]
fn confirm_requires_items_and_diners(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    assert!(!session.can_confirm());
    session.add_item("Café", Money::from_i64(2_500));
    assert!(!session.can_confirm());
    session.add_diner(diner("Ana")).expect("valid diner");
    assert!(session.can_confirm());

    session.reset();
    assert!(!session.can_confirm());
    assert!(session.assignment().is_empty());
    assert_eq!(session.restaurant(), "");
}

#[rstest]
fn full_payment_round_trip(env: Fixture) {
    let mut session = BillSession::new(&env.ids);
    let (_, _, a, b) = pizza_night(&mut session);
    let mut ledger = HistoryLedger::open(&env.store, &env.clock, &env.ids).expect("open ledger");
    let entry_id = ledger.add_entry(session.snapshot()).expect("add entry").id.clone();

    assert_eq!(
        ledger.set_payment_status(&entry_id, &a, true).expect("update"),
        PaymentUpdate::Applied
    );
    let partial = ledger.summary(&entry_id).expect("summary");
    assert_eq!(partial.paid_amount, Money::from_i64(7_700));
    assert_eq!(partial.remaining_amount, Money::from_i64(5_500));
    assert!(!partial.is_fully_paid);

    ledger.set_payment_status(&entry_id, &b, true).expect("update");
    let settled = ledger.summary(&entry_id).expect("summary");
    assert!(settled.is_fully_paid);
    assert_eq!(settled.remaining_amount, Money::zero());
}
