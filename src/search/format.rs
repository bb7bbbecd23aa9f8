use serde::Serialize;

pub const MAX_STARS: u8 = 5;

/// How a rating is drawn: full, half and empty stars out of [`MAX_STARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, f64::from(MAX_STARS))
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = u8::from(rating.fract() != 0.0);
        Self {
            full,
            half,
            empty: MAX_STARS - full - half,
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" => Some("¥"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency string in en-US style whatever the currency: symbol first,
/// thousands grouped with `,`, no fractional digits. `$1,250`, `€1,250`,
/// or `CHF 99` for codes without a known symbol.
pub fn format_price(amount: f64, currency: &str) -> String {
    let amount = if amount.is_finite() { amount.round() } else { 0.0 };
    let sign = if amount < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", amount.abs());
    let grouped = group_thousands(&digits);

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}"),
        None => format!("{sign}{currency} {grouped}"),
    }
}
