use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Lucky Draw Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::rounds::list_rounds,
        crate::routes::rounds::create_round,
        crate::routes::rounds::update_round,
        crate::routes::rounds::delete_round,
        crate::routes::prizes::list_prizes,
        crate::routes::prizes::create_prize,
        crate::routes::prizes::update_prize,
        crate::routes::prizes::delete_prize,
        crate::routes::pool::get_pool,
        crate::routes::pool::set_pool,
        crate::routes::pool::generate_pool,
        crate::routes::pool::import_pool,
        crate::routes::register::register_status,
        crate::routes::register::submit_registration,
        crate::routes::register::set_registration_open,
        crate::routes::register::clear_registrations,
        crate::routes::config::get_config,
        crate::routes::config::update_config,
        crate::routes::control::start_rolling,
        crate::routes::control::stop_rolling,
        crate::routes::control::get_state,
        crate::routes::control::patch_state,
        crate::routes::control::qrcode_status,
        crate::routes::control::toggle_qrcode,
        crate::routes::draw::draw,
        crate::routes::draw::reset,
        crate::routes::ws::ws_handler,
    ),
    components(
        schemas(
            crate::dao::models::Round,
            crate::dao::models::Prize,
            crate::dao::models::PoolType,
            crate::dao::models::WinnerRecord,
            crate::dao::models::DrawState,
            crate::dao::models::Config,
            crate::dao::models::NumberPoolConfig,
            crate::dao::models::FontSizes,
            crate::dao::models::DisplaySettings,
            crate::dao::models::FontColors,
            crate::dao::models::RegisterSettings,
            crate::dto::health::HealthResponse,
            crate::dto::snapshot::FullState,
            crate::dto::ws::DisplayEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Rounds and prizes management"),
        (name = "pool", description = "Preset number pool management"),
        (name = "register", description = "Live check-in roster"),
        (name = "control", description = "Display session control"),
        (name = "draw", description = "Draw engine and resets"),
        (name = "displays", description = "WebSocket push channel for displays"),
    )
)]
pub struct ApiDoc;
