use chromiumoxide::error::CdpError;
use derive_more::{Display, From};

/// Failures of the automation capability itself, independent of what is being automated.
#[derive(Debug, Display, From)]
pub enum BrowserError {
    #[display(fmt = "failed to launch browser: {}", _0)]
    #[from(ignore)]
    Launch(String),

    #[display(fmt = "devtools protocol error: {}", _0)]
    Cdp(CdpError),

    #[display(fmt = "script evaluation failed: {}", _0)]
    #[from(ignore)]
    Script(String),

    #[display(fmt = "no element matches '{}'", selector)]
    #[from(ignore)]
    ElementNotFound { selector: String },

    #[display(fmt = "'{}' is not a frame with an accessible document", selector)]
    #[from(ignore)]
    NotAFrame { selector: String },
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::Cdp(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
