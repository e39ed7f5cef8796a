//! Renders a multi-year calendar as a PDF: a cover page followed by one page
//! per month, each carrying a column of clickable tabs that jump to every
//! year and to every month of the displayed year.

pub mod calendar;
pub mod color;
pub mod config;
pub mod destination;
pub mod document;
pub mod error;
pub mod layout;
pub mod render;

pub use config::Config;
pub use document::{generate, render_document, Assembler, Document, Stage, Summary};
pub use error::{Error, ErrorKind, Result};
