//! Screen gateway: each screen owns its state, its reducer and the flow that
//! drives it.

pub mod graph;
pub mod login;

pub use graph::{GraphEvent, GraphScreen, GraphState, LoadStatus};
pub use login::{LoginEvent, LoginScreen, LoginState};
