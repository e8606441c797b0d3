mod filter;
mod lookup;
mod normalize;

pub use filter::filter_items;
pub use lookup::find_by_scan;
pub use normalize::normalize;
