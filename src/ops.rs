//! Pipeable operators. Each operator is a plain struct holding its source;
//! the work happens in an observer that wraps the downstream subscriber when
//! the pipeline is subscribed.
pub mod catch_error;
pub mod combine_latest;
pub mod debounce;
pub mod filter;
pub mod map;
pub mod map_err;
pub mod merge_map;
pub mod switch_map;
pub mod tap;
pub mod with_latest_from;
