pub use collapse::{collapse, CollapsedRepeat, RepeatAnnotation};
pub use counter::{count_in_region, count_in_regions, Containment, DedupScope};
pub use engine::Engine;
pub use filter::FragmentFilter;
pub use rate::RateBasis;
pub use segment::segment;

pub mod collapse;
pub mod counter;
pub mod engine;
pub mod filter;
pub mod model;
pub mod rate;
pub mod report;
pub mod segment;
