use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // URL Errors
    #[error("Invalid URL")]
    InvalidUrl,

    // Cookie Errors
    #[error("Object is a dictionary, not a list")]
    CookieJarNotAList,
    #[error("Invalid cookie data")]
    CookieInvalidData,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::InvalidUrl => -300,

            // Custom codes, kept clear of Chromium's net_error_list.h ranges
            NetError::CookieJarNotAList => -10100,
            NetError::CookieInvalidData => -10101,

            NetError::Unknown(code) => *code,
        }
    }

    /// Whether the error comes from misuse of the API rather than bad input.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, NetError::CookieJarNotAList)
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -300 => NetError::InvalidUrl,
            -10100 => NetError::CookieJarNotAList,
            -10101 => NetError::CookieInvalidData,
            _ => NetError::Unknown(code),
        }
    }
}

impl From<url::ParseError> for NetError {
    fn from(_: url::ParseError) -> Self {
        NetError::InvalidUrl
    }
}
