pub mod navigation;
pub mod screens;
pub mod session;
pub mod terminal;
