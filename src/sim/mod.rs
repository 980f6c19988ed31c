pub mod catalog;
pub mod economy;
pub mod intent;
pub mod reducer;
pub mod state;
pub mod views;
