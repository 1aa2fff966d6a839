pub mod geocode;
pub mod map_ref;
pub mod place;
pub mod request;
pub mod response;
pub mod route;
