pub mod logging;

// Rule-driven query transforms: rewrite, synonym, bag
pub mod transform;
