// Public API - what other modules can use
pub use handlers::{
    correct_hole_scores, create_match, get_match, get_match_scores, get_tournament_stats,
    list_match_formats, list_matches, submit_hole_scores,
};

mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;
