//! Request matching and response equivalence utilities.

mod body;
mod headers;

pub use body::{bodies_equivalent, body_matches, compare_bodies};
pub use headers::{header_map_to_hashmap, header_mismatches, headers_intersects, HeaderMismatch};
