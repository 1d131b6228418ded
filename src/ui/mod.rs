pub mod gallery;
pub mod panels;
