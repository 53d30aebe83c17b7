pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod page_fit;
pub mod selection;

#[cfg(test)]
pub mod testing;
