//! Unit test modules.

mod completion_test;
mod heatmap_test;
mod normalize_test;
mod validation_test;
mod views_test;
