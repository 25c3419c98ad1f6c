pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::batch::handlers as batch;
use crate::coverage::handlers as coverage;
use crate::sentence::handlers as sentence;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Coverage API (single cover-letter flow)
        .route("/api/v1/jd/parse", post(coverage::handle_parse_jd))
        .route(
            "/api/v1/coverage/check",
            post(coverage::handle_check_coverage),
        )
        // Sentence editor API
        .route("/api/v1/sentence/locate", post(sentence::handle_locate))
        .route("/api/v1/sentence/improve", post(sentence::handle_improve))
        .route("/api/v1/sentence/replace", post(sentence::handle_replace))
        // Batch API
        .route("/api/v1/batch", post(batch::handle_create_batch))
        .route("/api/v1/batch/:id", get(batch::handle_batch_status))
        .route(
            "/api/v1/batch/:id/documents",
            post(batch::handle_upload_documents),
        )
        .route(
            "/api/v1/batch/:id/documents/:doc_id",
            delete(batch::handle_delete_document),
        )
        .route("/api/v1/batch/:id/jd", post(batch::handle_set_job_description))
        .route(
            "/api/v1/batch/:id/weights",
            patch(batch::handle_adjust_weight),
        )
        .route(
            "/api/v1/batch/:id/weights/reset",
            post(batch::handle_reset_weights),
        )
        .route("/api/v1/batch/:id/score", post(batch::handle_score_batch))
        .route("/api/v1/batch/:id/results", get(batch::handle_batch_results))
        // Session API
        .route(
            "/api/v1/session/:id",
            get(session::handle_load_session)
                .put(session::handle_save_session)
                .delete(session::handle_clear_session),
        )
        .with_state(state)
}
