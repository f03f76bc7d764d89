mod chat_adapter;
mod end_to_end;
mod engine;
