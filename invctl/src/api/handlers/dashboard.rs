use axum::{Json, extract::State};

use crate::{
    AppState,
    analytics::kpis,
    api::models::{dashboard::DashboardResponse, users::SessionUser},
    db::handlers::Products,
    errors::Result,
};

/// Dashboard KPIs, alerts and chart series
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn get_dashboard(State(state): State<AppState>, current_user: SessionUser) -> Result<Json<DashboardResponse>> {
    let products = {
        let mut file = state.products.lock().await;
        Products::new(&mut file).all().await?
    };

    Ok(Json(kpis::build_dashboard(products)))
}
