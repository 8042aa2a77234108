use crate::domain::token::SESSION_COOKIE_NAME;

// Attributes applied to the session cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieSettings {
    pub max_age_seconds: u64,
    pub secure: bool,
}

impl CookieSettings {
    // `Set-Cookie` value carrying a freshly issued token.
    pub fn session_cookie(&self, token: &str) -> String {
        self.render(token, self.max_age_seconds)
    }

    // `Set-Cookie` value that makes the browser drop the session cookie.
    pub fn expired_cookie(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE_NAME}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
