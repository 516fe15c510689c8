use propfolio::search::{apply, sort_favorites, FilterCriteria, SortKey};
use propfolio::storage::{shared, MemoryStorage};
use propfolio::{parse_search_response, FavoriteStore, FavoritesService, PropertyRecord, UserId};

fn ids(records: &[PropertyRecord]) -> Vec<&str> {
    records.iter().map(|r| r.property_id.as_str()).collect()
}

#[test]
fn ingest_filter_and_refilter() {
    let records = parse_search_response(
        r#"{"props": [
            {"propertyId": "a", "bedrooms": 3, "price": 300000},
            {"propertyId": "b", "bedrooms": 2, "price": 200000},
            {"propertyId": "c", "bedrooms": 4, "price": 400000, "lotArea": -1}
        ]}"#,
    )
    .unwrap();

    let three_beds = apply(&records, &FilterCriteria { min_beds: Some(3.0), ..Default::default() });
    assert_eq!(ids(&three_beds), ["a", "c"]);

    let with_lot = apply(
        &three_beds,
        &FilterCriteria { min_lot_area: Some(100.0), ..Default::default() },
    );
    assert_eq!(ids(&with_lot), ["a"]);
}

#[test]
fn favorites_sorted_by_price_and_rooms() {
    let service = FavoritesService::new(FavoriteStore::new(shared(MemoryStorage::new())));
    let user = UserId::new("kate");

    let listings = [
        PropertyRecord::new("p1").with_price(500_000.0).with_bedrooms(3.0).with_bathrooms(2.0),
        PropertyRecord::new("p2").with_price(250_000.0).with_bedrooms(3.0).with_bathrooms(1.0),
        PropertyRecord::new("p3").with_price(750_000.0).with_bedrooms(2.0).with_bathrooms(4.0),
    ];
    for listing in &listings {
        assert!(service.toggle_favorite(&user, listing).unwrap());
    }

    let by_price = service.favorites(&user, "", Some(SortKey::Price));
    let prices: Vec<f64> = by_price.iter().map(|f| f.snapshot.price_or_zero()).collect();
    assert_eq!(prices, [250_000.0, 500_000.0, 750_000.0]);

    let mut by_rooms = service.favorites(&user, "", None);
    sort_favorites(&mut by_rooms, SortKey::Rooms);
    let rooms: Vec<(f64, f64)> = by_rooms
        .iter()
        .map(|f| (f.snapshot.bedrooms_or_zero(), f.snapshot.bathrooms_or_zero()))
        .collect();
    assert_eq!(rooms, [(2.0, 4.0), (3.0, 1.0), (3.0, 2.0)]);
}

#[test]
fn search_results_are_flagged_after_filtering() {
    let service = FavoritesService::new(FavoriteStore::new(shared(MemoryStorage::new())));
    let user = UserId::new("kate");
    let records = vec![
        PropertyRecord::new("a").with_listing_status("FOR_SALE"),
        PropertyRecord::new("b").with_listing_status("FOR_RENT"),
        PropertyRecord::new("c").with_listing_status("for_sale"),
    ];
    service.toggle_favorite(&user, &records[2]).unwrap();

    let criteria = FilterCriteria { listing_status: Some("For_Sale".to_string()), ..Default::default() };
    let flagged = service.search_results_with_favorite_flags(Some(&user), &apply(&records, &criteria));

    let view: Vec<(&str, bool)> = flagged
        .iter()
        .map(|f| (f.record.property_id.as_str(), f.is_favorited))
        .collect();
    assert_eq!(view, [("a", false), ("c", true)]);
}
