//! Session Cookie
//!
//! 会话 cookie 的属性策略。签发与清除使用同一组属性，浏览器才会覆盖原 cookie。

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::DeployEnvironment;

/// 会话 cookie 策略
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
    same_site: SameSite,
}

impl SessionCookie {
    /// 生产环境跨站携带 cookie，需要 `Secure` + `SameSite=None`
    pub fn new(name: impl Into<String>, environment: DeployEnvironment) -> Self {
        let (secure, same_site) = if environment.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Strict)
        };

        Self {
            name: name.into(),
            secure,
            same_site,
        }
    }

    /// 携带令牌的 cookie
    pub fn issue(&self, token: String, max_age_secs: i64) -> Cookie<'static> {
        self.build(token, max_age_secs)
    }

    /// 清除 cookie：空值 + `Max-Age=0`
    pub fn clear(&self) -> Cookie<'static> {
        self.build(String::new(), 0)
    }

    /// 从请求 cookie 中取出令牌，空值视为不存在
    pub fn token_from(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn build(&self, value: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .path("/")
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(max_age_secs))
            .build()
    }
}
