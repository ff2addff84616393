pub mod filters;
pub mod html;
pub mod links;
