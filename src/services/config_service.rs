//! Configuration reads and partial updates.

use tracing::info;

use crate::{
    dto::config::{ConfigResponse, ConfigUpdateRequest},
    error::ServiceError,
    state::SharedState,
};

/// The stored configuration.
pub async fn get_config(state: &SharedState) -> ConfigResponse {
    ConfigResponse {
        config: state.store().load_config(),
    }
}

/// Merge a partial update into the stored configuration.
///
/// Only provided top-level keys are touched; nested objects are shallow
/// merged field by field, and the calibration map is replaced wholesale (an
/// empty map clears it).
pub async fn update_config(
    state: &SharedState,
    request: ConfigUpdateRequest,
) -> Result<ConfigResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut config = store.load_config();

    if let Some(allow_repeat_win) = request.allow_repeat_win {
        config.allow_repeat_win = allow_repeat_win;
    }
    if let Some(numbers_per_row) = request.numbers_per_row {
        config.numbers_per_row = numbers_per_row;
    }
    if let Some(patch) = request.number_pool_config {
        let rules = &mut config.number_pool_config;
        if let Some(start) = patch.start {
            rules.start = start;
        }
        if let Some(end) = patch.end {
            rules.end = end;
        }
        if let Some(contains) = patch.exclude_contains {
            rules.exclude_contains = contains;
        }
        if let Some(exact) = patch.exclude_exact {
            rules.exclude_exact = exact;
        }
    }
    if let Some(patch) = request.font_sizes {
        let sizes = &mut config.font_sizes;
        if let Some(prize_level) = patch.prize_level {
            sizes.prize_level = prize_level;
        }
        if let Some(prize_name) = patch.prize_name {
            sizes.prize_name = prize_name;
        }
        if let Some(sponsor) = patch.sponsor {
            sizes.sponsor = sponsor;
        }
        if let Some(number_card) = patch.number_card {
            sizes.number_card = number_card;
        }
    }
    if let Some(patch) = request.display_settings {
        let settings = &mut config.display_settings;
        if let Some(show_quantity) = patch.show_quantity {
            settings.show_quantity = show_quantity;
        }
        if let Some(show_sponsor) = patch.show_sponsor {
            settings.show_sponsor = show_sponsor;
        }
        if let Some(show_number_border) = patch.show_number_border {
            settings.show_number_border = show_number_border;
        }
        if let Some(mask_phone) = patch.mask_phone {
            settings.mask_phone = mask_phone;
        }
    }
    if let Some(patch) = request.font_colors {
        let colors = &mut config.font_colors;
        if let Some(prize_name) = patch.prize_name {
            colors.prize_name = prize_name;
        }
        if let Some(sponsor) = patch.sponsor {
            colors.sponsor = sponsor;
        }
        if let Some(number_card) = patch.number_card {
            colors.number_card = number_card;
        }
    }
    if let Some(patch) = request.register_settings {
        let settings = &mut config.register_settings;
        if let Some(length) = patch.length {
            settings.length = length;
        }
        if let Some(allow_letters) = patch.allow_letters {
            settings.allow_letters = allow_letters;
        }
    }
    if let Some(calibration) = request.calibration {
        config.calibration = (!calibration.is_empty()).then_some(calibration);
    }

    store.save_config(&config)?;
    info!("configuration updated");
    Ok(ConfigResponse { config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::FileStore,
        dto::config::{ConfigUpdateRequest, DisplaySettingsPatch},
        state::{AppState, SharedState},
    };

    fn temp_state() -> SharedState {
        let dir = std::env::temp_dir().join(format!("lucky-draw-test-{}", uuid::Uuid::new_v4()));
        AppState::new(FileStore::new(dir))
    }

    #[tokio::test]
    async fn display_toggle_merge_touches_only_provided_fields() {
        let state = temp_state();
        let request = ConfigUpdateRequest {
            display_settings: Some(DisplaySettingsPatch {
                show_number_border: Some(false),
                mask_phone: Some(true),
                ..DisplaySettingsPatch::default()
            }),
            ..ConfigUpdateRequest::default()
        };

        let response = update_config(&state, request).await.unwrap();
        assert!(!response.config.display_settings.show_number_border);
        assert!(response.config.display_settings.mask_phone);
        assert!(response.config.display_settings.show_quantity);
        assert!(response.config.display_settings.show_sponsor);

        let stored = state.store().load_config();
        assert!(!stored.display_settings.show_number_border);
        assert!(stored.display_settings.mask_phone);

        let _ = std::fs::remove_dir_all(state.store().data_dir());
    }
}
