//! One-shot alerts carried across a POST/redirect/GET in a short-lived cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::adapters::views::components::{AlertKind, alert};

const FLASH_COOKIE: &str = "console_flash";
const FLASH_TTL_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: AlertKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
        }
    }

    pub fn to_html(&self) -> String {
        alert(self.kind, &self.message)
    }

    /// Stores the alert for the next page render.
    pub fn set(self, jar: CookieJar) -> CookieJar {
        let Ok(json) = serde_json::to_vec(&self) else {
            return jar;
        };
        let cookie = Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(json)))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/admin")
            .max_age(time::Duration::seconds(FLASH_TTL_SECS))
            .build();
        jar.add(cookie)
    }

    /// Reads and clears the pending alert. Tampered cookies are dropped.
    pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return (jar, None);
        };
        let flash = URL_SAFE_NO_PAD
            .decode(cookie.value())
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Flash>(&bytes).ok());
        let removal = Cookie::build((FLASH_COOKIE, "")).path("/admin").build();
        (jar.remove(removal), flash)
    }
}
