pub mod bundle;
pub mod controller;
pub mod logic;
pub mod menu;
pub mod settings;
pub mod state;
pub mod surface;
pub mod text;
