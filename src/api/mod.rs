pub mod ml;
pub mod models;
pub mod search;

pub use ml::MlApi;
pub use search::SearchApi;
