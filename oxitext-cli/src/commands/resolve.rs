//! Resolve command implementation.

use crate::utils::lookup_options;
use oxitext::{Encoding, Profile, TextError, normalize};
use serde::{Deserialize, Serialize};

/// JSON output for a label lookup.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ResolveJson {
    label: String,
    normalized: String,
    profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    single_byte: Option<bool>,
}

fn resolve(label: &str, email: bool, allow_replacement: bool) -> ResolveJson {
    let options = lookup_options(email, allow_replacement);
    let found = Encoding::lookup(label, options);
    ResolveJson {
        label: label.to_string(),
        normalized: normalize(label),
        profile: match options.profile {
            Profile::Web => "web".to_string(),
            Profile::Email => "email".to_string(),
        },
        encoding: found.map(|e| e.name().to_string()),
        single_byte: found.map(Encoding::is_single_byte),
    }
}

pub fn cmd_resolve(
    label: &str,
    email: bool,
    allow_replacement: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = resolve(label, email, allow_replacement);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.encoding {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => Err(TextError::unknown_encoding(label).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_profiles() {
        let web = resolve(" ISO-8859-1 ", false, false);
        assert_eq!(web.normalized, "iso-8859-1");
        assert_eq!(web.encoding.as_deref(), Some("windows-1252"));
        assert_eq!(web.single_byte, Some(true));

        let email = resolve("ISO-8859-1", true, false);
        assert_eq!(email.profile, "email");
        assert_eq!(email.encoding.as_deref(), Some("iso-8859-1"));

        assert_eq!(resolve("replacement", false, false).encoding, None);
        assert_eq!(
            resolve("replacement", false, true).encoding.as_deref(),
            Some("replacement")
        );
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(resolve("sjis", false, false))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(value["encoding"], "shift_jis");
        assert_eq!(value["single_byte"], false);

        // Unknown labels leave the optional fields out
        let value = serde_json::to_value(resolve("nonsense", false, false))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(value.get("encoding").is_none());
        assert_eq!(value["profile"], "web");
    }
}
