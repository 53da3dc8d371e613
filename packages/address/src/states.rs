//! USPS state and territory codes.

/// The 50 states, the District of Columbia, and the inhabited
/// territories, sorted for binary search.
pub const STATE_CODES: &[&str] = &[
    "AK", "AL", "AR", "AS", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "GU", "HI", "IA",
    "ID", "IL", "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MP", "MS", "MT",
    "NC", "ND", "NE", "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "PR", "RI", "SC",
    "SD", "TN", "TX", "UT", "VA", "VI", "VT", "WA", "WI", "WV", "WY",
];

/// Returns `true` if `token` is a two-letter USPS state or territory
/// code, ignoring case.
#[must_use]
pub fn is_state_code(token: &str) -> bool {
    if token.len() != 2 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    STATE_CODES
        .binary_search(&token.to_ascii_uppercase().as_str())
        .is_ok()
}
