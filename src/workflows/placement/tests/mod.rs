mod common;
mod pipeline;
mod screening;
