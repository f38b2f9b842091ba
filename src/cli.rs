use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::{
    phonetic::{DistanceKind, EncoderKind},
    search::WishlistFormat,
};

/// Pick the best matching variant of every hit in saved search responses
#[derive(Parser, Debug)]
#[command(name = "slsearch", version)]
pub struct CliArgs {
    /// Search text the responses were retrieved for
    #[arg(short, long, env = "SLS_QUERY")]
    pub query: String,

    /// Saved wishlist to annotate hits with
    #[arg(short, long, env = "SLS_WISHLIST")]
    pub wishlist: Option<String>,

    /// Wishlist storage format (default: comma)
    #[arg(long, env = "SLS_WISHLIST_FORMAT")]
    pub wishlist_format: Option<WishlistFormat>,

    /// Phonetic encoder (default: double-metaphone)
    #[arg(short, long, env = "SLS_ENCODER")]
    pub encoder: Option<EncoderKind>,

    /// Edit distance (default: levenshtein)
    #[arg(short, long, env = "SLS_DISTANCE")]
    pub distance: Option<DistanceKind>,

    /// Pretty print output, `--pretty=false` to force compact
    #[arg(
        short,
        long,
        env = "SLS_PRETTY",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub pretty: Option<bool>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "SLS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search response files, stdin when none
    pub inputs: Vec<PathBuf>,
}

#[derive(Serialize, Debug, Default)]
pub struct ConfigOverrides {
    selector: SelectorOverrides,
    wishlist: WishlistOverrides,
    output: OutputOverrides,
}

#[derive(Serialize, Debug, Default)]
struct SelectorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    encoder: Option<EncoderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<DistanceKind>,
}

#[derive(Serialize, Debug, Default)]
struct WishlistOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<WishlistFormat>,
}

#[derive(Serialize, Debug, Default)]
struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pretty: Option<bool>,
}

impl CliArgs {
    /// Only the settings given on the command line or environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            selector: SelectorOverrides {
                encoder: self.encoder,
                distance: self.distance,
            },
            wishlist: WishlistOverrides {
                format: self.wishlist_format,
            },
            output: OutputOverrides {
                pretty: self.pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::load_config;

    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "slsearch",
            "--query",
            "smal",
            "--encoder",
            "verbatim",
            "--wishlist-format",
            "json",
            "a.json",
            "b.json",
        ])
        .unwrap();

        assert_eq!(args.query, "smal");
        assert_eq!(args.encoder, Some(EncoderKind::Verbatim));
        assert_eq!(args.distance, None);
        assert_eq!(args.wishlist_format, Some(WishlistFormat::Json));
        assert_eq!(args.inputs, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_overrides_skip_unset() {
        let args = CliArgs::try_parse_from(["slsearch", "-q", "hat", "-d", "damerau-levenshtein"])
            .unwrap();

        let value = serde_json::to_value(args.overrides()).unwrap();
        assert_eq!(
            value,
            json!({
                "selector": {"distance": "damerau_levenshtein"},
                "wishlist": {},
                "output": {},
            })
        );
    }

    #[test]
    fn test_bare_pretty_flag() {
        let args =
            CliArgs::try_parse_from(["slsearch", "-q", "hat", "--pretty", "a.json"]).unwrap();
        assert_eq!(args.pretty, Some(true));
        assert_eq!(args.inputs, vec![PathBuf::from("a.json")]);

        let args = CliArgs::try_parse_from(["slsearch", "-q", "hat", "--pretty=false"]).unwrap();
        assert_eq!(args.pretty, Some(false));

        let args = CliArgs::try_parse_from(["slsearch", "-q", "hat"]).unwrap();
        assert_eq!(args.pretty, None);
    }

    #[test]
    fn test_overrides_apply() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(file.path(), "[selector]\nencoder = \"verbatim\"\n").unwrap();

        let args = CliArgs::try_parse_from(["slsearch", "-q", "hat", "-e", "double-metaphone"])
            .unwrap();
        let config = load_config(Some(file.path()), args.overrides()).unwrap();
        assert_eq!(config.selector.encoder, EncoderKind::DoubleMetaphone);
    }
}
