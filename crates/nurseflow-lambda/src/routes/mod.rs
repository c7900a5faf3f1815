pub mod analyze;
pub mod health;
pub mod score;
pub mod vitals;
