pub mod common;

mod fetch_and_decode;
