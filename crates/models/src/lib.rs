pub mod errors;
pub mod db;
pub mod soft_delete;
pub mod category;
pub mod property;
pub mod user;
pub mod post;
pub mod favourite_post;

pub use soft_delete::SoftDelete;

#[cfg(test)]
mod tests;
