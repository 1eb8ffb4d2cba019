//! Screen navigation requests.
//!
//! Screens never navigate themselves; they return a `Route` and whatever
//! hosts them (the binary here) acts on it.

use crate::models::SessionToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Graph { token: SessionToken },
    Registration,
}
