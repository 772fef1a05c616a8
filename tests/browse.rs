use carlot::app::{handle_event, Action, BrowseState, Event, Phase};
use carlot::domain::{
    Condition, Dimension, FilterChoice, FilterSet, FuelType, NewListing, SortKey, Transmission,
};
use carlot::query::query;
use carlot::session::{self, FileSessionSlot, SessionContext};
use carlot::storage::{seed, JsonStorage, MemoryStorage, Storage};
use carlot::domain::{AppointmentStatus, ListingStatus};
use carlot::{
    book_viewing, sell_listing, set_appointment_status, update_listing, withdraw_listing, Dashboard,
    Listing, ListingUpdate, MarketplaceError, ViewingRequest,
};
use chrono::NaiveDate;

fn every_choice(brands: &[String]) -> Vec<FilterChoice> {
    let mut choices: Vec<FilterChoice> = brands.iter().cloned().map(FilterChoice::Brand).collect();
    choices.extend(Transmission::ALL.iter().copied().map(FilterChoice::Transmission));
    choices.extend(FuelType::ALL.iter().copied().map(FilterChoice::FuelType));
    choices.extend(Condition::ALL.iter().copied().map(FilterChoice::Condition));
    choices
}

fn ids(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

fn navigated(actions: &[Action]) -> &str {
    match actions {
        [Action::Navigate { location }] => location,
        other => panic!("expected one navigation, got {other:?}"),
    }
}

fn loaded(store: &dyn Storage, location: &str) -> BrowseState {
    let mut state = BrowseState::new("/buy", SortKey::Newest);
    handle_event(&mut state, store, &Event::Load { location: location.to_string() }).unwrap();
    state
}

#[test]
fn toggling_twice_restores_the_filter_set() {
    let store = MemoryStorage::seeded();
    let mut start = FilterSet::for_brand("Porsche");
    start.set_year_range(Some(2019), None).unwrap();
    start.toggle(FilterChoice::FuelType(FuelType::Hybrid));

    for choice in every_choice(&store.unique_brands().unwrap()) {
        let mut filters = start.clone();
        filters.toggle(choice.clone());
        assert_ne!(filters, start, "{choice:?} had no effect");
        filters.toggle(choice.clone());
        assert_eq!(filters, start, "{choice:?} did not toggle back");
    }
}

#[test]
fn extra_dimension_only_narrows() {
    let catalog = seed::listings();
    let brands: Vec<String> = catalog.iter().map(|l| l.brand.clone()).collect();

    for term in ["", "a", "sedan", "tesla"] {
        for sort in SortKey::ALL.iter().copied() {
            let wide = query(&catalog, term, &FilterSet::default(), sort);
            for choice in every_choice(&brands) {
                let mut filters = FilterSet::default();
                filters.toggle(choice);
                let narrow = query(&catalog, term, &filters, sort);
                assert!(narrow.iter().all(|l| wide.contains(l)));
            }

            let mut priced = FilterSet::default();
            priced.set_price_range(Some(40_000), Some(70_000)).unwrap();
            let narrow = query(&catalog, term, &priced, sort);
            assert!(narrow.iter().all(|l| wide.contains(l)));
        }
    }
}

#[test]
fn equal_sort_keys_keep_input_order() {
    let template = seed::listings().remove(0);
    let listings: Vec<Listing> = ["a", "b", "c", "d"]
        .iter()
        .enumerate()
        .map(|(i, suffix)| Listing {
            id: format!("dup-{suffix}"),
            price: if i == 2 { 10_000 } else { 30_000 },
            ..template.clone()
        })
        .collect();

    let by_price = query(&listings, "", &FilterSet::default(), SortKey::PriceLowHigh);
    assert_eq!(ids(&by_price), ["dup-c", "dup-a", "dup-b", "dup-d"]);

    let by_date = query(&listings, "", &FilterSet::default(), SortKey::Newest);
    assert_eq!(ids(&by_date), ["dup-a", "dup-b", "dup-c", "dup-d"]);
}

#[test]
fn cleared_dimensions_equal_unrestricted() {
    let catalog = seed::listings();
    let mut filters = FilterSet::default();
    filters.set_price_range(None, Some(60_000)).unwrap();
    let ranges_only = filters.clone();

    filters.toggle(FilterChoice::Brand("BMW".into()));
    filters.toggle(FilterChoice::Transmission(Transmission::Manual));
    for dimension in [Dimension::Brand, Dimension::Transmission, Dimension::FuelType, Dimension::Condition] {
        filters.clear_dimension(dimension);
    }

    assert_eq!(filters, ranges_only);
    for sort in SortKey::ALL.iter().copied() {
        assert_eq!(
            query(&catalog, "", &filters, sort),
            query(&catalog, "", &ranges_only, sort)
        );
    }
}

#[test]
fn applied_search_survives_the_url() {
    let store = MemoryStorage::seeded();

    for term in ["tesla", "model y", "4x4 & more", "café+bar", "100%"] {
        let mut state = loaded(&store, "/buy");
        let (_, actions) = handle_event(&mut state, &store, &Event::SubmitSearch(term.into())).unwrap();

        let reloaded = loaded(&store, navigated(&actions));
        assert_eq!(reloaded.applied_search(), term);
        assert_eq!(reloaded.applied(), state.applied());
        assert_eq!(reloaded.results(), state.results());
    }
}

#[test]
fn brand_shortcut_survives_the_url() {
    let store = MemoryStorage::seeded();
    let mut state = loaded(&store, "/buy?search=sedan");
    let (_, actions) = handle_event(&mut state, &store, &Event::BrowseBrand("Mercedes-Benz".into())).unwrap();

    assert_eq!(navigated(&actions), "/buy?brand=Mercedes-Benz");
    let reloaded = loaded(&store, navigated(&actions));
    assert_eq!(reloaded.applied(), &FilterSet::for_brand("Mercedes-Benz"));
    assert_eq!(reloaded.applied_search(), "");
    assert_eq!(reloaded.results(), state.results());
}

#[test]
fn two_listing_catalog() {
    let catalog: Vec<Listing> = seed::listings()
        .into_iter()
        .filter(|l| l.id == "car-1" || l.id == "car-2")
        .collect();
    let none = FilterSet::default();

    let bmw = query(&catalog, "", &FilterSet::for_brand("BMW"), SortKey::Newest);
    assert_eq!(ids(&bmw), ["car-1"]);

    let cheapest = query(&catalog, "", &none, SortKey::PriceLowHigh);
    assert_eq!(ids(&cheapest), ["car-1", "car-2"]);
    assert_eq!((cheapest[0].price, cheapest[1].price), (45_000, 58_000));
    assert_eq!(ids(&query(&catalog, "", &none, SortKey::PriceHighLow)), ["car-2", "car-1"]);
    assert_eq!(ids(&query(&catalog, "", &none, SortKey::Oldest)), ["car-1", "car-2"]);
    assert_eq!(ids(&query(&catalog, "", &none, SortKey::MileageLowHigh)), ["car-2", "car-1"]);

    let tesla = query(&catalog, "tesla", &none, SortKey::Newest);
    assert_eq!(ids(&tesla), ["car-2"]);

    let mut pricey = FilterSet::default();
    pricey.set_price_range(Some(50_000), None).unwrap();
    assert_eq!(ids(&query(&catalog, "", &pricey, SortKey::Newest)), ["car-2"]);
}

#[test]
fn reset_after_apply_restores_everything() {
    let store = MemoryStorage::seeded();
    let full = loaded(&store, "/buy");

    let mut state = loaded(&store, "/buy");
    handle_event(&mut state, &store, &Event::Toggle(FilterChoice::Brand("Tesla".into()))).unwrap();
    handle_event(&mut state, &store, &Event::SubmitSearch("model".into())).unwrap();
    handle_event(&mut state, &store, &Event::ChangeSort(SortKey::PriceHighLow)).unwrap();
    assert_eq!(state.results().len(), 1);

    let (_, actions) = handle_event(&mut state, &store, &Event::Reset).unwrap();
    assert_eq!(navigated(&actions), "/buy");
    assert_eq!(state.sort(), SortKey::Newest);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.applied().is_unrestricted());
    assert_eq!(state.results(), full.results());

    handle_event(&mut state, &store, &Event::Load { location: "/buy".into() }).unwrap();
    assert_eq!(state.results(), full.results());
}

#[test]
fn toggled_brands_stay_out_of_the_url() {
    let store = MemoryStorage::seeded();
    let mut state = loaded(&store, "/buy");
    handle_event(&mut state, &store, &Event::Toggle(FilterChoice::Brand("BMW".into()))).unwrap();
    handle_event(&mut state, &store, &Event::Toggle(FilterChoice::Brand("Audi".into()))).unwrap();

    let (_, actions) = handle_event(&mut state, &store, &Event::SubmitSearch("luxury".into())).unwrap();
    assert_eq!(navigated(&actions), "/buy?search=luxury");
    assert_eq!(state.applied().brands.len(), 2);
}

fn roadster() -> NewListing {
    NewListing {
        title: "Weekend Roadster in Great Shape".to_string(),
        brand: "Mazda".to_string(),
        model: "MX-5".to_string(),
        year: Some(2018),
        price: Some(19_500),
        mileage: 31_000,
        fuel_type: FuelType::Gasoline,
        transmission: Transmission::Manual,
        description: "Soft top replaced last year, garage kept, never tracked.".to_string(),
        features: vec!["Soft Top".to_string()],
        images: vec!["https://img.example/mx5.jpg".to_string()],
        condition: Condition::Good,
        seller_id: "user-1".to_string(),
        seller_name: "John Smith".to_string(),
        seller_phone: None,
        location: "Boise, ID".to_string(),
    }
}

#[test]
fn json_store_changes_reach_the_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut store = JsonStorage::open(path.clone(), true).unwrap();
    let mut state = loaded(&store, "/buy");

    let created = store.create_listing(roadster()).unwrap();
    assert_eq!(created.id, "car-11");

    let (render, _) = handle_event(&mut state, &store, &Event::StoreChanged).unwrap();
    assert!(render);
    assert_eq!(state.results()[0].id, "car-11");

    let (render, _) = handle_event(&mut state, &store, &Event::StoreChanged).unwrap();
    assert!(!render);

    let reopened = JsonStorage::open(path, true).unwrap();
    assert_eq!(reopened.unique_brands().unwrap().len(), 11);
    assert!(store.delete_listing("car-11").unwrap());
    assert_eq!(store.create_listing(roadster()).unwrap().id, "car-12");
}

#[test]
fn login_then_book_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonStorage::open(dir.path().join("catalog.json"), true).unwrap();
    let mut slot = FileSessionSlot::new(dir.path().join("session.json"));

    let request = ViewingRequest {
        listing_id: "car-3".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        time: "14:00".to_string(),
        notes: None,
    };
    let anonymous = SessionContext::restore(&slot).unwrap();
    assert!(matches!(
        book_viewing(&mut store, &anonymous, request.clone()),
        Err(MarketplaceError::Unauthenticated)
    ));

    let rejected = session::login(&store, &mut slot, "emily@example.com", "wrong").unwrap();
    assert!(!rejected.is_active());

    session::login(&store, &mut slot, "emily@example.com", "password123").unwrap();
    let restored = SessionContext::restore(&FileSessionSlot::new(dir.path().join("session.json"))).unwrap();
    let appointment = book_viewing(&mut store, &restored, request).unwrap();

    assert_eq!(appointment.buyer_id, "user-2");
    assert_eq!(appointment.seller_id, store.listing("car-3").unwrap().unwrap().seller_id);
    let mine = store.appointments_for_user("user-2").unwrap();
    assert!(mine.iter().any(|a| a.id == appointment.id));

    session::logout(&mut slot).unwrap();
    assert!(!SessionContext::restore(&slot).unwrap().is_active());
}

#[test]
fn seller_lifecycle_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut store = JsonStorage::open(path.clone(), true).unwrap();
    let mut slot = FileSessionSlot::new(dir.path().join("session.json"));

    let seller = session::register(&mut store, &mut slot, "Ana Lima", "ana@example.com", "hunter22").unwrap();
    let listed = sell_listing(&mut store, &seller, roadster()).unwrap();
    assert_eq!(listed.seller_name, "Ana Lima");

    let buyer = session::login(&store, &mut slot, "emily@example.com", "password123").unwrap();
    let request = ViewingRequest {
        listing_id: listed.id.clone(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        time: "09:00".to_string(),
        notes: None,
    };
    let booked = book_viewing(&mut store, &buyer, request).unwrap();
    let confirmed = set_appointment_status(&mut store, &seller, &booked.id, AppointmentStatus::Confirmed).unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let sold = ListingUpdate {
        price: Some(18_000),
        status: Some(ListingStatus::Sold),
    };
    update_listing(&mut store, &seller, &listed.id, sold).unwrap();
    let err = withdraw_listing(&mut store, &buyer, &listed.id).unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));

    let reopened = JsonStorage::open(path, true).unwrap();
    let dashboard = Dashboard::load(&reopened, &seller).unwrap();
    assert_eq!(dashboard.listings.len(), 1);
    assert_eq!(dashboard.listings[0].status, ListingStatus::Sold);
    assert_eq!(dashboard.available_value(), 0);
    assert_eq!(dashboard.appointments[0].status, AppointmentStatus::Confirmed);
    assert!(dashboard.transactions.is_empty());

    withdraw_listing(&mut store, &seller, &listed.id).unwrap();
    assert!(Dashboard::load(&store, &seller).unwrap().listings.is_empty());
}
