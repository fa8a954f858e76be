pub mod catalog;
pub mod details;
pub mod genres;
pub mod recommendations;
pub mod search;
pub mod surprise;
