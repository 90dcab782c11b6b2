use crate::error::WellnessError;
use actix_web::HttpRequest;
use wellness_scheduler_infra::WellnessContext;

pub const TRIGGER_KEY_HEADER: &str = "wellness-trigger-key";

/// Only the external scheduler holding the lifecycle trigger key may start a run
pub fn protect_trigger_route(req: &HttpRequest, ctx: &WellnessContext) -> Result<(), WellnessError> {
    let key = req
        .headers()
        .get(TRIGGER_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            WellnessError::Unauthorized(format!(
                "Missing the `{}` header",
                TRIGGER_KEY_HEADER
            ))
        })?;

    if key != ctx.config.lifecycle_trigger_key {
        return Err(WellnessError::Unauthorized(
            "Invalid lifecycle trigger key provided".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn it_checks_the_trigger_key() {
        let mut ctx = WellnessContext::create_inmemory();
        ctx.config.lifecycle_trigger_key = "secret".into();

        let req = TestRequest::default().to_http_request();
        assert!(protect_trigger_route(&req, &ctx).is_err());

        let req = TestRequest::default()
            .insert_header((TRIGGER_KEY_HEADER, "wrong"))
            .to_http_request();
        assert!(protect_trigger_route(&req, &ctx).is_err());

        let req = TestRequest::default()
            .insert_header((TRIGGER_KEY_HEADER, "secret"))
            .to_http_request();
        assert!(protect_trigger_route(&req, &ctx).is_ok());
    }
}
