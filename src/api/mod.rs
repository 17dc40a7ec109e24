pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

pub use error::{AppResult, CheckError};
pub use routes::create_router;

use std::sync::Arc;

use crate::classifier::ListingClassifier;
use crate::pipeline::ListingChecker;

/// Shared application state. The classifier is loaded once at start-up and
/// is `None` when the artifact could not be read.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<ListingChecker>,
    pub classifier: Option<Arc<dyn ListingClassifier>>,
}
