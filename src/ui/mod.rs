/// Presentation layer: egui widgets over the data layer.

pub mod pages;
pub mod panels;
pub mod plot;
pub mod table;
