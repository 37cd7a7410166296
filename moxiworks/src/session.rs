//! Session cookie continuity.
//!
//! The platform hands out a session cookie on first contact and expects it
//! back on later requests. A [`Session`] keeps the first cookie it sees and
//! ignores every later one.

use std::fmt;
use std::sync::OnceLock;

/// Holds the session cookie for one client.
///
/// The slot is written at most once: [`set_if_absent`](Self::set_if_absent)
/// is a no-op once a value is stored. Whichever response arrives first wins,
/// which is not necessarily the first request issued.
///
/// Sessions are owned by the client that created them. Clients cloned from
/// one another share a session; independently built clients do not, so two
/// sets of credentials in one process never exchange cookies.
#[derive(Default)]
pub struct Session {
    cookie: OnceLock<String>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored cookie, if any.
    pub fn get(&self) -> Option<&str> {
        self.cookie.get().map(String::as_str)
    }

    /// Stores the given `set-cookie` values unless a cookie is already held.
    ///
    /// Values are kept verbatim, joined with `"; "` when a response carries
    /// more than one. An empty list leaves the session untouched. Returns
    /// `true` if this call stored the cookie.
    pub fn set_if_absent<I, S>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.cookie.get().is_some() {
            return false;
        }

        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() {
            return false;
        }

        self.cookie.set(joined).is_ok()
    }
}

// Cookie values are credentials in their own right.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_cookie", &self.cookie.get().is_some())
            .finish()
    }
}
