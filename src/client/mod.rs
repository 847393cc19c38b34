//! Client side of the article service: HTTP calls and terminal views.

pub mod api;
pub mod view;

pub use api::{ArticleClient, ClientError};
pub use view::{Outcome, UiState, render};
