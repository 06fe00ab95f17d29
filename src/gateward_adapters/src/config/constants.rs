pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "GATEWARD_AUTH__JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "GATEWARD_DATABASE__URL";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "GATEWARD_EMAIL_CLIENT__AUTH_TOKEN";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
