pub mod metrics;
pub mod pages;
pub mod system;
