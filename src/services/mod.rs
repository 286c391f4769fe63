pub mod providers;
pub mod request_id;

pub use providers::{http::HttpMovieApi, MovieApi};
