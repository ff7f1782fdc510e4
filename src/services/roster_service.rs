//! Live check-in roster: open/close, submissions, clearing.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::{
    dao::models::RegisterSettings,
    dto::{
        common::OkResponse,
        register::{RegisterStatusResponse, RegistrationOpenResponse, RegistrationOutcome},
    },
    error::ServiceError,
    state::SharedState,
};

/// Current roster and registration status.
pub async fn status(state: &SharedState) -> RegisterStatusResponse {
    let roster = state.store().load_roster();
    let config = state.store().load_config();
    RegisterStatusResponse {
        is_open: roster.is_open,
        count: roster.registrations.len(),
        registrations: roster.registrations,
        register_settings: config.register_settings,
        version: roster.cleared_at,
    }
}

/// Submit one identifier; the outcome carries a participant-facing message.
///
/// Shape violations and duplicates are reported through the outcome rather
/// than the error body, since the check-in page renders the message directly.
pub async fn submit(state: &SharedState, employee_id: &str) -> Result<RegistrationOutcome, ServiceError> {
    let _gate = state.lock_writes().await;

    let config = state.store().load_config();
    let normalized = match validate_identifier(employee_id, &config.register_settings) {
        Ok(normalized) => normalized,
        Err(message) => {
            return Ok(RegistrationOutcome {
                success: false,
                message,
            });
        }
    };

    let store = state.store();
    let mut roster = store.load_roster();
    if !roster.is_open {
        return Ok(RegistrationOutcome {
            success: false,
            message: "Registration is closed".into(),
        });
    }
    if roster.registrations.contains(&normalized) {
        return Ok(RegistrationOutcome {
            success: false,
            message: "This ID is already registered".into(),
        });
    }

    roster.registrations.push(normalized.clone());
    store.save_roster(&roster)?;

    info!(id = %normalized, total = roster.registrations.len(), "registration accepted");
    Ok(RegistrationOutcome {
        success: true,
        message: "Registered successfully".into(),
    })
}

/// Open or close registration.
pub async fn set_open(
    state: &SharedState,
    is_open: bool,
) -> Result<RegistrationOpenResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut roster = store.load_roster();
    roster.is_open = is_open;
    store.save_roster(&roster)?;
    info!(is_open, "registration toggled");
    Ok(RegistrationOpenResponse {
        success: true,
        is_open,
    })
}

/// Clear every registration and bump the version marker so connected
/// check-in pages detect the wipe.
pub async fn clear(state: &SharedState) -> Result<OkResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut roster = store.load_roster();
    roster.registrations.clear();
    roster.cleared_at = epoch_millis();
    store.save_roster(&roster)?;
    info!("roster cleared");
    Ok(OkResponse::ok())
}

/// Normalize and validate an identifier against the configured shape,
/// returning the participant-facing rejection message on failure.
fn validate_identifier(raw: &str, settings: &RegisterSettings) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("ID must not be empty".into());
    }

    let normalized = if settings.allow_letters {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    };

    let shape_ok = if settings.allow_letters {
        normalized
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    } else {
        normalized.bytes().all(|b| b.is_ascii_digit())
    };
    if !shape_ok {
        return Err(if settings.allow_letters {
            "ID may only contain letters and digits".into()
        } else {
            "ID may only contain digits".into()
        });
    }

    if normalized.len() != settings.length {
        return Err(if settings.allow_letters {
            format!("ID must be {} letters or digits", settings.length)
        } else {
            format!("ID must be {} digits", settings.length)
        });
    }

    Ok(normalized)
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_only() -> RegisterSettings {
        RegisterSettings {
            length: 6,
            allow_letters: false,
        }
    }

    #[test]
    fn digits_only_settings_reject_letters() {
        assert!(validate_identifier("A12345", &digits_only()).is_err());
        assert_eq!(
            validate_identifier("012345", &digits_only()).as_deref(),
            Ok("012345")
        );
    }

    #[test]
    fn length_is_enforced_exactly() {
        assert!(validate_identifier("12345", &digits_only()).is_err());
        assert!(validate_identifier("1234567", &digits_only()).is_err());
    }

    #[test]
    fn letters_are_uppercased_when_allowed() {
        let settings = RegisterSettings {
            length: 6,
            allow_letters: true,
        };
        assert_eq!(
            validate_identifier("ab12cd", &settings).as_deref(),
            Ok("AB12CD")
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            validate_identifier("  012345  ", &digits_only()).as_deref(),
            Ok("012345")
        );
    }
}
