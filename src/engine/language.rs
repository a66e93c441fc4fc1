//! Input language detection

use crate::core::constants::language::UNKNOWN;
use whatlang::Info;

/// Detect the language of `text`
///
/// Returns an ISO 639-1 code where one exists, otherwise the ISO 639-3 code
/// reported by the detector. Returns "unknown" when nothing could be detected
/// or the detector is not confident, which is common for inputs of a word or
/// two.
pub fn detect_language(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return UNKNOWN.to_string();
    }

    language_code(whatlang::detect(text))
}

fn language_code(info: Option<Info>) -> String {
    match info {
        Some(info) if info.is_reliable() => {
            let code = info.lang().code();
            iso_639_1(code).unwrap_or(code).to_string()
        }
        _ => UNKNOWN.to_string(),
    }
}

fn iso_639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatlang::{Lang, Script};

    #[test]
    fn test_blank_is_unknown() {
        assert_eq!(detect_language(""), "unknown");
        assert_eq!(detect_language("   \n"), "unknown");
    }

    #[test]
    fn test_no_letters_is_unknown() {
        assert_eq!(detect_language("12345 !!! ???"), "unknown");
    }

    #[test]
    fn test_script_based_languages() {
        assert_eq!(detect_language("こんにちは、注文をキャンセルしたいです。"), "ja");
        assert_eq!(detect_language("안녕하세요, 주문을 취소하고 싶습니다."), "ko");
    }

    #[test]
    fn test_latin_sentence() {
        assert_eq!(
            detect_language(
                "Hola, me gustaría cancelar mi pedido porque llegó dañado y quiero un reembolso completo lo antes posible."
            ),
            "es"
        );
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(iso_639_1("cmn"), Some("zh"));
        assert_eq!(iso_639_1("aka"), Some("ak"));
        assert_eq!(iso_639_1("xyz"), None);
    }

    #[test]
    fn test_unreliable_detection_is_unknown() {
        let guess = Info::new(Script::Latin, Lang::Uzb, 0.3);
        assert_eq!(language_code(Some(guess)), "unknown");

        let confident = Info::new(Script::Latin, Lang::Aka, 1.0);
        assert_eq!(language_code(Some(confident)), "ak");
        assert_eq!(language_code(None), "unknown");
    }
}
