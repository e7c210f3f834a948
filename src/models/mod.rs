pub mod content;
pub mod editor;
pub mod style;
pub mod suggestion;
