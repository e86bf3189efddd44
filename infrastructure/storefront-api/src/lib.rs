pub mod cart_service;
pub mod client;
pub mod dto;
