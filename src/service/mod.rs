pub mod audit;
pub mod preview;
pub mod role_panel;
