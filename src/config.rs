use envconfig::Envconfig;

#[derive(Envconfig)]
pub struct Config {
    #[envconfig(from = "DATABASE_URL")]
    pub database_url: String,

    #[envconfig(from = "BIND_ADDR", default = "0.0.0.0:3000")]
    pub bind_addr: String,

    /// Session lifetime; defaults to one week.
    #[envconfig(from = "SESSION_TTL_HOURS", default = "168")]
    pub session_ttl_hours: i64,
}
