//! Full-page navigation seam.

/// Performs a full-page navigation to a route on the current origin.
///
/// Navigation is treated as always succeeding; browser implementations log
/// failures instead of returning them.
pub trait Navigator {
    fn navigate(&self, route: &str);
}
