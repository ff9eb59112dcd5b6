pub mod card;
pub mod catalog;
pub mod category;
pub mod player;
pub mod question;
