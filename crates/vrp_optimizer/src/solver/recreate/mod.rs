pub mod best_insertion;
pub mod cheapest_insertion;
pub mod recreate_context;
pub mod recreate_solution;
pub mod recreate_strategy;
