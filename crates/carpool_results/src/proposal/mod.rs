pub mod address;
pub mod criteria;
pub mod matching;
pub mod meters;
#[allow(clippy::module_inception)]
pub mod proposal;
pub mod route_filters;
pub mod waypoint;
pub mod week;
