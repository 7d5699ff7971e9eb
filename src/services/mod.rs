// src/services/mod.rs
pub mod chatbot;
pub mod openai;
