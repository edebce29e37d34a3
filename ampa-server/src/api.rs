use ampa_core::error::{AmpaError, AmpaResult};
use axum::Router;

pub mod cron;
pub mod hooks;
pub mod well_known;

pub fn setup_api_routes(router: Router) -> Router {
    let router = cron::setup_cron(router);
    let router = hooks::setup_hooks(router);
    well_known::setup_well_known(router)
}

/// Gate for the externally-triggered endpoints. A configured secret must be
/// presented verbatim as a bearer token; with no secret configured the
/// endpoint is open, which is how development deployments run.
pub(crate) fn authorize_shared_secret(
    secret: Option<&str>,
    provided: Option<&str>,
) -> AmpaResult<()> {
    match secret {
        Some(expected) if provided != Some(expected) => {
            warn!("rejected trigger call with a missing or invalid shared secret");
            Err(AmpaError::AccessDenied)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn open_when_no_secret_configured() {
        assert!(authorize_shared_secret(None, None).is_ok());
        assert!(authorize_shared_secret(None, Some("anything")).is_ok());
    }

    #[test]
    fn matching_secret_is_accepted() {
        assert!(authorize_shared_secret(Some("s3cret"), Some("s3cret")).is_ok());
    }

    #[test]
    fn missing_or_wrong_secret_is_denied() {
        assert!(matches!(
            authorize_shared_secret(Some("s3cret"), None),
            Err(AmpaError::AccessDenied)
        ));
        assert!(matches!(
            authorize_shared_secret(Some("s3cret"), Some("nope")),
            Err(AmpaError::AccessDenied)
        ));
    }
}
