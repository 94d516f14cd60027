pub mod duration;
pub mod extract;
pub mod resource;

mod geometry;
mod pairing;
mod route;
mod trip;

pub use pairing::pair;
pub use route::Route;
pub use trip::{Trip, TripState};
