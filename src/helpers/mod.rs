pub mod time;
pub mod url;
