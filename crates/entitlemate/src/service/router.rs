use super::CatalogService;
use crate::filters::FilterSelection;
use crate::loader::EntitlementSource;
use crate::render::html::{render_page, PageLinks};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// `GET /`, `GET /api/v1/catalog` and `POST /reload` over one shared catalog.
pub fn catalog_router<S>(service: Arc<CatalogService<S>>) -> Router
where
    S: EntitlementSource + 'static,
{
    Router::new()
        .route("/", get(page_handler::<S>))
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/reload", post(reload_handler::<S>))
        .with_state(service)
}

pub(crate) async fn page_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String>
where
    S: EntitlementSource + 'static,
{
    let selection = FilterSelection::from_query_pairs(pairs);
    let state = service.state().await;
    Html(render_page(&state.view(&selection), PageLinks::default()))
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response
where
    S: EntitlementSource + 'static,
{
    let selection = FilterSelection::from_query_pairs(pairs);
    let state = service.state().await;
    axum::Json(state.view(&selection)).into_response()
}

pub(crate) async fn reload_handler<S>(State(service): State<Arc<CatalogService<S>>>) -> Redirect
where
    S: EntitlementSource + 'static,
{
    service.reload().await;
    Redirect::to("/")
}
