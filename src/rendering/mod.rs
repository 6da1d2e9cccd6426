pub mod mockup;

pub use mockup::MockupRenderer;
