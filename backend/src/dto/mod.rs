pub mod classification;
pub mod document;
pub mod search;
pub mod upload;
