pub mod expand;
pub mod health;
