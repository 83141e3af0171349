use axum_extra::extract::cookie::{Cookie, PrivateCookieJar};

pub const FLASH_COOKIE: &str = "tripbudget_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(FlashLevel::Success),
            "warning" => Some(FlashLevel::Warning),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    fn encode(&self) -> String {
        format!("{}|{}", self.level.as_str(), self.message)
    }

    fn decode(raw: &str) -> Option<Self> {
        let (level, message) = raw.split_once('|')?;
        Some(Self {
            level: FlashLevel::parse(level)?,
            message: message.to_string(),
        })
    }
}

/// Template-facing view of the pending notice.
#[derive(Debug, Clone, Default)]
pub struct FlashView {
    pub show: bool,
    pub level: String,
    pub message: String,
}

impl From<Option<Flash>> for FlashView {
    fn from(flash: Option<Flash>) -> Self {
        match flash {
            Some(flash) => Self {
                show: true,
                level: flash.level.as_str().to_string(),
                message: flash.message,
            },
            None => Self::default(),
        }
    }
}

pub fn push(jar: PrivateCookieJar, level: FlashLevel, message: impl Into<String>) -> PrivateCookieJar {
    let flash = Flash {
        level,
        message: message.into(),
    };
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true),
    )
}

/// Reads the pending notice and removes it from the jar.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, FlashView) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, FlashView::default());
    };
    let flash = Flash::decode(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_keeps_pipes_in_message() {
        let flash = Flash {
            level: FlashLevel::Danger,
            message: "a|b".into(),
        };
        assert_eq!(Flash::decode(&flash.encode()), Some(flash));
    }

    #[test]
    fn unknown_level_is_dropped() {
        assert_eq!(Flash::decode("loud|hello"), None);
        assert_eq!(Flash::decode("no separator"), None);
    }

    #[test]
    fn view_of_nothing_is_hidden() {
        assert!(!FlashView::from(None).show);
    }
}
