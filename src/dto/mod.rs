pub mod billing;
pub mod chats;
pub mod clients;
pub mod products;
pub mod settings;
