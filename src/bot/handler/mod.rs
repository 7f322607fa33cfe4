pub mod interaction;
pub mod member;
pub mod message;
pub mod voice;
