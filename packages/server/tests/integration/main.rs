mod chat;
mod document;
