//! GPX building blocks

pub mod gpx;
pub mod position;
pub mod tracker;

#[cfg(test)]
mod tests;
