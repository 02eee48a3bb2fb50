pub mod meals;
pub mod menu;
