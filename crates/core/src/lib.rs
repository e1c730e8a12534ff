#![forbid(unsafe_code)]

pub mod badges;
pub mod catalog;
pub mod error;
pub mod games;
pub mod model;
pub mod question_bank;
pub mod time;

pub use time::Clock;
