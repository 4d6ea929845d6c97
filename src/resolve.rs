use anyhow::{bail, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::context::ContextEnv;

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z0-9_]+|\{[^}]*\})").expect("env reference pattern is valid")
});

/// Expand `$NAME` and `${NAME}` using `lookup`.
///
/// References `lookup` cannot resolve are left untouched, so the result can
/// still be handed to a shell that knows more than we do.
pub fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('$') {
        return input.to_string();
    }

    ENV_REF
        .replace_all(input, |caps: &Captures| {
            let raw = &caps[1];
            let name = raw
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or(raw);
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolves `{token}` placeholders in config paths.
pub struct Resolver<'a> {
    pub ctx: &'a ContextEnv,
}

impl<'a> Resolver<'a> {
    pub fn new(ctx: &'a ContextEnv) -> Self {
        Self { ctx }
    }

    pub fn resolve(&self, input: &str) -> Result<String> {
        // Fast path
        if !input.contains('{') {
            return Ok(input.to_string());
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                bail!("unclosed token in string: {input}");
            };

            let token = &after[..end];
            let repl = self
                .token_value(token)
                .ok_or_else(|| anyhow::anyhow!("unknown token: {{{token}}} in: {input}"))?;

            out.push_str(&repl);
            rest = &after[end + 1..];
        }
        out.push_str(rest);

        Ok(out)
    }

    fn token_value(&self, token: &str) -> Option<String> {
        match token {
            "home" => Some(self.ctx.home.to_string_lossy().to_string()),
            "config_dir" => self
                .ctx
                .config_dir()
                .map(|p| p.to_string_lossy().to_string()),
            "config_path" => self
                .ctx
                .config_path()
                .map(|p| p.to_string_lossy().to_string()),
            "xdg_config_home" => Some(self.ctx.xdg_config_home.to_string_lossy().to_string()),
            _ => None,
        }
    }
}
