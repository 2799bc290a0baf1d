// Route exports
pub mod matching;
pub mod postings;

pub use matching::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matching::configure)
            .configure(postings::configure),
    );
}
