//! Labels command implementation.

use crate::utils::encoding_for;
use oxitext::{Encoding, labels};
use serde::{Deserialize, Serialize};

/// JSON serializable encoding with its labels.
#[derive(Debug, Serialize, Deserialize)]
struct EncodingJson {
    name: String,
    single_byte: bool,
    labels: Vec<String>,
}

impl EncodingJson {
    fn from_encoding(encoding: Encoding) -> Self {
        Self {
            name: encoding.name().to_string(),
            single_byte: encoding.is_single_byte(),
            labels: labels()
                .filter(|&(_, canonical)| canonical == encoding.name())
                .map(|(label, _)| label.to_string())
                .collect(),
        }
    }
}

fn collect(filter: Option<&str>) -> Result<Vec<EncodingJson>, Box<dyn std::error::Error>> {
    match filter {
        Some(label) => {
            let encoding = encoding_for(label, true)?;
            Ok(vec![EncodingJson::from_encoding(encoding)])
        }
        None => Ok(Encoding::all().map(EncodingJson::from_encoding).collect()),
    }
}

pub fn cmd_labels(filter: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let encodings = collect(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&encodings)?);
        return Ok(());
    }

    for encoding in &encodings {
        let kind = if encoding.single_byte { "sbcs" } else { "mbcs" };
        if encoding.labels.is_empty() {
            // Reachable through the email profile only
            println!("{:<16} {}  (email)", encoding.name, kind);
        } else {
            println!("{:<16} {}  {}", encoding.name, kind, encoding.labels.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_encodings_listed() {
        let all = collect(None).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(all.len(), Encoding::all().count());
        let total: usize = all.iter().map(|e| e.labels.len()).sum();
        assert_eq!(total, labels().count());
    }

    #[test]
    fn test_filter() {
        let gbk = collect(Some("GBK")).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(gbk.len(), 1);
        assert_eq!(gbk[0].name, "gbk");
        assert!(gbk[0].labels.iter().any(|l| l == "x-gbk"));

        let utf7 = collect(Some("utf-7")).unwrap_or_else(|e| panic!("{e}"));
        assert!(utf7[0].labels.is_empty());

        assert!(collect(Some("nonsense")).is_err());
    }
}
