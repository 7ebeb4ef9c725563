use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::InputArgs;

impl ArgumentType for InputArgs {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        fn normalize(token: &str) -> String {
            if token.eq_ignore_ascii_case("stdin") {
                return "-".to_string();
            }
            // `@stdin` forces a file literally named "stdin".
            token.strip_prefix('@').unwrap_or(token).to_string()
        }

        let mut inputs = Vec::new();
        if let Some(v) = val {
            for token in v.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                inputs.push(normalize(token));
            }
        }

        Some(Ok(InputArgs(inputs)))
    }

    fn default_value() -> Option<Self> {
        Some(InputArgs::default())
    }
}
