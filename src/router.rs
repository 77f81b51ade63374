use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Store;
use crate::handlers::{appointment, medication};

/// Shared router state. Handlers open their own session from `store`.
#[derive(Clone)]
pub struct InfomedState {
    pub store: Store,
}

impl InfomedState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

pub fn infomed_router(state: InfomedState) -> Router {
    Router::new()
        .route("/add_medicamento", post(medication::add_medication))
        .route("/get_medicamentos", get(medication::list_medications))
        .route("/get_medicamento", get(medication::find_medication))
        .route("/del_medicamento", delete(medication::delete_medication_by_name))
        .route("/del_medicamento_id", delete(medication::delete_medication_by_id))
        .route("/add_consulta", post(appointment::add_appointment))
        .route("/get_consultas", get(appointment::list_appointments))
        .route("/get_consulta", get(appointment::get_appointment))
        .route("/update_consulta", put(appointment::update_appointment))
        .route("/del_consulta_id", delete(appointment::delete_appointment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
