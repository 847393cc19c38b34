use actix_cors::Cors;

/// Any origin may call the API. No cookies are issued, so credentials stay off.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
