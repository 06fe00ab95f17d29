pub mod use_cases;

pub use use_cases::{
    request_password_reset::{
        RESET_EMAIL_SUBJECT, RESET_EMAIL_TEMPLATE, RequestPasswordResetError,
        RequestPasswordResetUseCase,
    },
    set_password::{SetPasswordError, SetPasswordUseCase},
};
