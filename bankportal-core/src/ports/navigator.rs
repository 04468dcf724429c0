//! Navigator port - client-side routing

/// Moves the client to another route
///
/// The HTTP interceptor uses this to send the user to `/login` when the
/// session expires; the route guard uses it for role redirects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}
