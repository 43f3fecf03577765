/// The language of the output class names.
///
/// The full set of languages is supported for the built-in classifier IDs
/// `default`, `food` and `explicit`. Class names of custom classifiers are
/// not translated, and the response may fall back to English when no
/// translation exists.
///
/// The options builder accepts any string for the language, so tags outside
/// this list are passed through untouched. Use this enum when the tag is
/// known up front:
///
/// ```
/// use visual_recognition::model::{AcceptLanguage, ClassifyOptions};
///
/// let opts = ClassifyOptions::builder()
///     .accept_language(AcceptLanguage::PtBr)
///     .build();
/// assert_eq!(opts.accept_language(), Some("pt-br"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptLanguage {
    En,
    Ar,
    De,
    Es,
    Fr,
    It,
    Ja,
    Ko,
    PtBr,
    ZhCn,
    ZhTw,
}

impl AcceptLanguage {
    /// Every documented tag, in the service's order.
    pub const ALL: [AcceptLanguage; 11] = [
        Self::En,
        Self::Ar,
        Self::De,
        Self::Es,
        Self::Fr,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::PtBr,
        Self::ZhCn,
        Self::ZhTw,
    ];

    /// Wire value sent in the `Accept-Language` header.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::PtBr => "pt-br",
            Self::ZhCn => "zh-cn",
            Self::ZhTw => "zh-tw",
        }
    }
}

impl std::fmt::Display for AcceptLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`AcceptLanguage::from_str`] for tags outside the documented set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[Visual Recognition] unsupported accept-language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl std::str::FromStr for AcceptLanguage {
    type Err = UnknownLanguage;

    /// Case-insensitive; `_` is accepted in place of `-` (`zh_CN`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == norm)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl From<AcceptLanguage> for String {
    fn from(lang: AcceptLanguage) -> Self {
        lang.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_tags() {
        for lang in AcceptLanguage::ALL {
            assert_eq!(lang.as_str().parse::<AcceptLanguage>(), Ok(lang));
        }
        assert_eq!("ZH_cn".parse::<AcceptLanguage>(), Ok(AcceptLanguage::ZhCn));
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = "tlh".parse::<AcceptLanguage>().unwrap_err();
        assert_eq!(err, UnknownLanguage("tlh".into()));
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&AcceptLanguage::ZhTw).unwrap();
        assert_eq!(json, "\"zh-tw\"");
        let back: AcceptLanguage = serde_json::from_str("\"pt-br\"").unwrap();
        assert_eq!(back, AcceptLanguage::PtBr);
    }
}
