//! URL mirroring of the search state and the page-reset rule.
use proptest::prelude::*;

use skillbridge_web::models::query::{QueryChange, QueryState, SortKey};

#[test]
fn test_round_trip_of_documented_example() {
    let state = QueryState {
        category: Some("Graphics & Design".to_string()),
        page: 2,
        ..QueryState::new("logo design")
    };

    let qs = state.to_query_string();
    assert_eq!(qs, "q=logo+design&category=Graphics+%26+Design&page=2");
    assert_eq!(QueryState::from_query_str(&qs), state);
}

#[test]
fn test_defaults_are_left_out_of_the_url() {
    let state = QueryState::new("webs");
    assert_eq!(state.href("/search"), "/search?q=webs");
    assert_eq!(QueryState::default().href("/search"), "/search");
}

#[test]
fn test_request_params_always_carry_the_page() {
    let params = QueryState::new("logo").to_request_params();
    assert!(params.contains(&("page", "1".to_string())));
    assert!(!params.iter().any(|(k, _)| *k == "category"));
}

#[test]
fn test_malformed_values_only_drop_their_own_key() {
    let state = QueryState::from_query_str(
        "q=%20logo%20&minPrice=abc&maxPrice=200&page=0&sortBy=bogus&category=",
    );
    assert_eq!(state.text, "logo");
    assert_eq!(state.min_price, None);
    assert_eq!(state.max_price, Some(200.0));
    assert_eq!(state.page, 1);
    assert_eq!(state.sort_key, SortKey::Relevance);
    assert_eq!(state.category, None);
}

#[test]
fn test_all_recognized_keys_are_parsed() {
    let state = QueryState::from_query_str(
        "q=logo&category=Graphics+%26+Design&subcategory=Logo+Design&minPrice=10&maxPrice=99.5\
         &deliveryTime=3&minRating=4.5&sortBy=price_low&page=4",
    );
    assert_eq!(state.category.as_deref(), Some("Graphics & Design"));
    assert_eq!(state.subcategory.as_deref(), Some("Logo Design"));
    assert_eq!(state.min_price, Some(10.0));
    assert_eq!(state.max_price, Some(99.5));
    assert_eq!(state.delivery_time_days, Some(3));
    assert_eq!(state.min_rating, Some(4.5));
    assert_eq!(state.sort_key, SortKey::PriceLow);
    assert_eq!(state.page, 4);
}

#[test]
fn test_filter_change_resets_page() {
    let state = QueryState {
        page: 5,
        ..QueryState::new("logo")
    };

    let next = state.apply([QueryChange::Sort(SortKey::Rating)]);
    assert_eq!(next.page, 1);
    assert_eq!(next.sort_key, SortKey::Rating);
    assert_eq!(next.text, "logo");

    let next = state.apply([QueryChange::MinPrice(Some(25.0))]);
    assert_eq!(next.page, 1);
}

#[test]
fn test_page_change_keeps_filters() {
    let state = QueryState {
        category: Some("Data".to_string()),
        min_rating: Some(4.0),
        ..QueryState::new("etl")
    };

    let next = state.apply([QueryChange::Page(3)]);
    assert_eq!(next.page, 3);
    assert_eq!(next.category, state.category);
    assert_eq!(next.min_rating, state.min_rating);
    assert_eq!(next.text, state.text);
}

#[test]
fn test_mixed_changes_still_reset_page() {
    let state = QueryState {
        page: 2,
        ..QueryState::new("logo")
    };
    let next = state.apply([QueryChange::Page(7), QueryChange::Category(Some("Data".into()))]);
    assert_eq!(next.page, 1);
}

#[test]
fn test_clear_filters_keeps_only_text() {
    let state = QueryState::from_query_str("q=logo&category=Data&minPrice=5&sortBy=newest&page=3");
    assert!(state.has_filters());
    let cleared = state.cleared();
    assert_eq!(cleared, QueryState::new("logo"));
    assert_eq!(cleared.href("/search"), "/search?q=logo");
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9&=+%?#/]([a-zA-Z0-9 &=+%?#/]{0,14}[a-zA-Z0-9&=+%?#/])?"
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_state() -> impl Strategy<Value = QueryState> {
    (
        prop_oneof![Just(String::new()), arb_text()],
        prop::option::of(arb_text()),
        prop::option::of(arb_text()),
        prop::option::of(0u32..100_000),
        prop::option::of(0.0f64..100_000.0),
        prop::option::of(1u32..60),
        prop::option::of(0u8..=10),
        arb_sort(),
        1u32..500,
    )
        .prop_map(
            |(text, category, subcategory, min, max, days, rating, sort_key, page)| QueryState {
                text,
                category,
                subcategory,
                min_price: min.map(f64::from),
                max_price: max,
                delivery_time_days: days,
                min_rating: rating.map(|r| f64::from(r) / 2.0),
                sort_key,
                page,
            },
        )
}

proptest! {
    #[test]
    fn prop_url_round_trip(state in arb_state()) {
        let decoded = QueryState::from_query_str(&state.to_query_string());
        prop_assert_eq!(decoded, state);
    }

    #[test]
    fn prop_non_page_change_resets_page(state in arb_state(), sort in arb_sort()) {
        prop_assert_eq!(state.apply([QueryChange::Sort(sort)]).page, 1);
    }

    #[test]
    fn prop_page_change_preserves_everything_else(state in arb_state(), page in 1u32..1000) {
        let next = state.apply([QueryChange::Page(page)]);
        prop_assert_eq!(next.page, page);
        prop_assert_eq!(QueryState { page: state.page, ..next }, state);
    }
}
