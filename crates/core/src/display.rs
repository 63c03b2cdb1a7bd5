//! Badge counts shown next to the cart and wishlist icons.

/// Counts above this are shown as `"5+"`.
pub const BADGE_CAP: usize = 5;

/// Render a count for a badge using the default cap of five.
///
/// ```
/// use plantomart_core::display_count;
///
/// assert_eq!(display_count(0), "0");
/// assert_eq!(display_count(5), "5");
/// assert_eq!(display_count(6), "5+");
/// ```
#[must_use]
pub fn display_count(count: usize) -> String {
    display_count_capped(count, BADGE_CAP)
}

/// Render a count, collapsing anything above `cap` to `"{cap}+"`.
#[must_use]
pub fn display_count_capped(count: usize, cap: usize) -> String {
    if count > cap {
        format!("{cap}+")
    } else {
        count.to_string()
    }
}

/// Badge text, or `None` when the badge should be hidden (empty list).
#[must_use]
pub fn badge(count: usize, cap: usize) -> Option<String> {
    (count > 0).then(|| display_count_capped(count, cap))
}
