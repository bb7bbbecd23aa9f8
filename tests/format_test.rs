//! Star and price rendering used by the result cards.
use skillbridge_web::search::format::{StarRating, format_price};

fn stars(full: u8, half: u8, empty: u8) -> StarRating {
    StarRating { full, half, empty }
}

#[test]
fn test_whole_rating_has_no_half_star() {
    assert_eq!(StarRating::from_rating(4.0), stars(4, 0, 1));
}

#[test]
fn test_fractional_rating_has_one_half_star() {
    assert_eq!(StarRating::from_rating(4.5), stars(4, 1, 0));
    assert_eq!(StarRating::from_rating(3.2), stars(3, 1, 1));
}

#[test]
fn test_zero_rating_is_all_empty() {
    assert_eq!(StarRating::from_rating(0.0), stars(0, 0, 5));
}

#[test]
fn test_out_of_range_ratings_are_clamped() {
    assert_eq!(StarRating::from_rating(7.3), stars(5, 0, 0));
    assert_eq!(StarRating::from_rating(-1.0), stars(0, 0, 5));
    assert_eq!(StarRating::from_rating(f64::NAN), stars(0, 0, 5));
}

#[test]
fn test_price_has_no_fraction_and_groups_thousands() {
    assert_eq!(format_price(1250.0, "USD"), "$1,250");
    assert_eq!(format_price(99.6, "USD"), "$100");
    assert_eq!(format_price(5.0, "USD"), "$5");
    assert_eq!(format_price(1_234_567.0, "EUR"), "€1,234,567");
}

#[test]
fn test_price_with_unknown_currency_uses_code() {
    assert_eq!(format_price(40.0, "CHF"), "CHF 40");
}

#[test]
fn test_price_style_does_not_follow_the_currency_locale() {
    assert_eq!(format_price(1250.0, "EUR"), "€1,250");
    assert_eq!(format_price(1250.0, "GBP"), "£1,250");
    assert_eq!(format_price(-1250.0, "USD"), "-$1,250");
}
